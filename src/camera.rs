//! Orbit camera, projection and the mouse controller driving them.
//!
//! The camera always looks at a target point and sits on a sphere around it,
//! described by a distance and two angles. Left-drag rotates around the target,
//! the mouse wheel zooms and right-drag pans the target.

use std::f32::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3, perspective};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;
const ZOOM_STEP: f32 = 0.95;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub target: Point3<f32>,
    pub distance: f32,
    /// Angle around the Y axis, measured from +X towards +Z.
    pub yaw: Rad<f32>,
    /// Elevation above the XZ plane.
    pub pitch: Rad<f32>,
}

impl Camera {
    pub fn new<T: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        target: T,
        distance: f32,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            target: target.into(),
            distance,
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// Places the camera at `position` looking at `target`.
    pub fn looking_at<P: Into<Point3<f32>>, T: Into<Point3<f32>>>(position: P, target: T) -> Self {
        let position = position.into();
        let target = target.into();
        let offset = position - target;
        let distance = offset.magnitude();
        if distance <= f32::EPSILON {
            return Self::new(target, 0.0, Rad(0.0), Rad(0.0));
        }
        let yaw = Rad(offset.z.atan2(offset.x));
        let pitch = Rad((offset.y / distance).clamp(-1.0, 1.0).asin());
        Self {
            target,
            distance,
            yaw,
            pitch,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        self.target
            + Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw) * self.distance
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position(), self.target, Vector3::unit_y())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    height: u32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            height: height.max(1),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
            self.height = height;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// World units covered by one pixel of the viewport at `distance` from the eye.
    pub fn units_per_pixel(&self, distance: f32) -> f32 {
        2.0 * distance * (self.fovy.0 / 2.0).tan() / self.height as f32
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Collects mouse input between frames and applies it to a [`Camera`] in `update`.
#[derive(Debug)]
pub struct CameraController {
    rotate_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
    rotate: (f32, f32),
    pan: (f32, f32),
    scroll: f32,
    dragging: Option<MouseButton>,
    saved: Option<Camera>,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            min_distance: 1.0,
            max_distance: f32::MAX,
            rotate: (0.0, 0.0),
            pan: (0.0, 0.0),
            scroll: 0.0,
            dragging: None,
            saved: None,
        }
    }

    pub fn set_distance_limits(&mut self, min_distance: f32, max_distance: f32) {
        self.min_distance = min_distance.min(max_distance);
        self.max_distance = max_distance.max(min_distance);
    }

    /// Remembers `camera` as the state [`reset`](Self::reset) returns to.
    pub fn save_state(&mut self, camera: &Camera) {
        self.saved = Some(*camera);
    }

    /// Restores the saved camera and drops any pending input.
    pub fn reset(&mut self, camera: &mut Camera) {
        if let Some(saved) = self.saved {
            *camera = saved;
        }
        self.rotate = (0.0, 0.0);
        self.pan = (0.0, 0.0);
        self.scroll = 0.0;
    }

    /// Raw mouse motion, only applied while a button is held.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        match self.dragging {
            Some(MouseButton::Left) => {
                self.rotate.0 += dx as f32;
                self.rotate.1 += dy as f32;
            }
            Some(MouseButton::Right) => {
                self.pan.0 += dx as f32;
                self.pan.1 += dy as f32;
            }
            _ => (),
        }
    }

    pub fn handle_scroll(&mut self, delta: &MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, scroll) => *scroll,
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / 100.0,
        };
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => match (state, button) {
                (ElementState::Pressed, MouseButton::Left | MouseButton::Right) => {
                    self.dragging = Some(*button)
                }
                (ElementState::Released, _) if self.dragging == Some(*button) => {
                    self.dragging = None
                }
                _ => (),
            },
            WindowEvent::MouseWheel { delta, .. } => self.handle_scroll(delta),
            WindowEvent::Focused(false) => self.dragging = None,
            _ => (),
        }
    }

    /// Applies the input gathered since the last call.
    ///
    /// Input is applied as is, independent of the frame time.
    pub fn update(&mut self, camera: &mut Camera, projection: &Projection) {
        camera.yaw += Rad(self.rotate.0 * self.rotate_speed);
        camera.pitch += Rad(self.rotate.1 * self.rotate_speed);
        camera.pitch = Rad(camera.pitch.0.clamp(-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2));
        self.rotate = (0.0, 0.0);

        if self.pan != (0.0, 0.0) {
            let forward = (camera.target - camera.position()).normalize();
            let right = forward.cross(Vector3::unit_y()).normalize();
            let up = right.cross(forward);
            // the point under the cursor stays under the cursor
            let scale = projection.units_per_pixel(camera.distance);
            camera.target += (-right * self.pan.0 + up * self.pan.1) * scale;
            self.pan = (0.0, 0.0);
        }

        if self.scroll != 0.0 {
            // each wheel notch scales the distance by ZOOM_STEP^zoom_speed
            let factor = ZOOM_STEP.powf(self.zoom_speed * self.scroll);
            camera.distance = (camera.distance * factor).clamp(self.min_distance, self.max_distance);
            self.scroll = 0.0;
        }
    }
}

// We need this for Rust to store our data correctly for the shaders
#[repr(C)]
// This is so we can store this in a buffer
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    inv_proj: [[f32; 4]; 4],
    inv_view: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
            inv_proj: Matrix4::identity().into(),
            inv_view: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position().to_homogeneous().into();
        let view = camera.calc_matrix();
        let proj = projection.calc_matrix();
        self.view_proj = (proj * view).into();
        self.inv_proj = proj.invert().unwrap_or_else(Matrix4::identity).into();
        self.inv_view = view.invert().unwrap_or_else(Matrix4::identity).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera state plus the GPU buffer and bind group that expose it to shaders.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: CameraController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    /// Recomputes the uniform from the camera and projection and uploads it.
    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue, projection: &Projection) {
        self.uniform.update_view_proj(&self.camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
