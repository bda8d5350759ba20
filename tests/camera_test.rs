use cgmath::{Deg, EuclideanSpace, Point3, Rad, Vector3};
use flow_orrery::camera::{Camera, CameraController, Projection};
use winit::event::{DeviceId, ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::common::test_utils::{assert_close, assert_vec3_close};

mod common;

fn projection() -> Projection {
    Projection::new(1600, 900, Deg(55.0), 0.1, 1000.0)
}

fn notch(controller: &mut CameraController, lines: f32) {
    controller.handle_scroll(&MouseScrollDelta::LineDelta(0.0, lines));
}

#[test]
fn looking_at_reproduces_the_eye_position() {
    let camera = Camera::looking_at([-90.0, 140.0, 140.0], [0.0, 0.0, 0.0]);
    assert_vec3_close(
        camera.position().to_vec(),
        Vector3::new(-90.0, 140.0, 140.0),
    );
    assert_close(camera.distance, (90.0f32 * 90.0 + 2.0 * 140.0 * 140.0).sqrt());
}

#[test]
fn looking_at_an_offset_target() {
    let camera = Camera::looking_at([5.0, 0.0, 10.0], [5.0, 0.0, 0.0]);
    assert_eq!(camera.target, Point3::new(5.0, 0.0, 0.0));
    assert_close(camera.distance, 10.0);
    assert_close(camera.pitch.0, 0.0);
    assert_vec3_close(camera.position().to_vec(), Vector3::new(5.0, 0.0, 10.0));
}

#[test]
fn update_keeps_the_pitch_off_the_poles() {
    let mut controller = CameraController::new(0.005, 1.0);
    let mut camera = Camera::new([0.0, 0.0, 0.0], 10.0, Rad(0.0), Deg(120.0));
    controller.update(&mut camera, &projection());
    assert!(camera.pitch.0 < std::f32::consts::FRAC_PI_2);
    assert!(camera.pitch.0 > 1.5);
}

#[test]
fn scrolling_zooms_within_the_limits() {
    let projection = projection();
    let mut controller = CameraController::new(0.005, 1.0);
    controller.set_distance_limits(24.0, 800.0);
    let mut camera = Camera::looking_at([0.0, 0.0, 100.0], [0.0, 0.0, 0.0]);

    notch(&mut controller, 1.0);
    controller.update(&mut camera, &projection);
    assert_close(camera.distance, 95.0);

    for _ in 0..40 {
        notch(&mut controller, 1.0);
        controller.update(&mut camera, &projection);
    }
    assert_close(camera.distance, 24.0);

    for _ in 0..80 {
        notch(&mut controller, -1.0);
        controller.update(&mut camera, &projection);
    }
    assert_close(camera.distance, 800.0);
}

#[test]
fn a_wheel_notch_zooms_the_same_however_often_update_runs() {
    let projection = projection();
    let start = Camera::looking_at([0.0, 0.0, 100.0], [0.0, 0.0, 0.0]);

    let mut batched = CameraController::new(0.005, 1.0);
    let mut once = start;
    notch(&mut batched, 1.0);
    notch(&mut batched, 1.0);
    batched.update(&mut once, &projection);

    let mut stepped = CameraController::new(0.005, 1.0);
    let mut each = start;
    for _ in 0..2 {
        notch(&mut stepped, 1.0);
        stepped.update(&mut each, &projection);
        // idle frames in between change nothing
        stepped.update(&mut each, &projection);
    }

    assert_close(once.distance, 100.0 * 0.95 * 0.95);
    assert_close(each.distance, once.distance);
}

#[test]
fn right_drag_pans_by_the_pixel_size_at_the_target() {
    let projection = projection();
    let per_pixel = 2.0 * 100.0 * (55.0f32.to_radians() / 2.0).tan() / 900.0;
    assert_close(projection.units_per_pixel(100.0), per_pixel);

    let mut controller = CameraController::new(0.005, 1.0);
    let mut camera = Camera::looking_at([0.0, 0.0, 100.0], [0.0, 0.0, 0.0]);
    let device_id = unsafe { DeviceId::dummy() };
    controller.handle_window_events(&WindowEvent::MouseInput {
        device_id,
        state: ElementState::Pressed,
        button: MouseButton::Right,
    });
    controller.handle_mouse(10.0, 0.0);
    controller.handle_window_events(&WindowEvent::MouseInput {
        device_id,
        state: ElementState::Released,
        button: MouseButton::Right,
    });
    // motion without a held button is ignored
    controller.handle_mouse(50.0, 50.0);
    controller.update(&mut camera, &projection);

    assert_vec3_close(camera.target.to_vec(), Vector3::new(-10.0 * per_pixel, 0.0, 0.0));
    assert_close(camera.distance, 100.0);
    assert_close(camera.yaw.0, std::f32::consts::FRAC_PI_2);
}

#[test]
fn reset_restores_the_saved_camera() {
    let mut controller = CameraController::new(0.005, 1.0);
    let saved = Camera::looking_at([-90.0, 140.0, 140.0], [0.0, 0.0, 0.0]);
    controller.save_state(&saved);

    let mut camera = saved;
    camera.yaw = Rad(1.0);
    camera.distance = 30.0;
    notch(&mut controller, 3.0);
    controller.reset(&mut camera);
    // pending input is dropped as well
    controller.update(&mut camera, &projection());

    assert_eq!(camera, saved);
}

#[test]
fn projection_ignores_a_zero_height() {
    let mut projection = projection();
    assert_close(projection.aspect(), 1600.0 / 900.0);
    projection.resize(800, 800);
    assert_close(projection.aspect(), 1.0);
    projection.resize(800, 0);
    assert_close(projection.aspect(), 1.0);
}
