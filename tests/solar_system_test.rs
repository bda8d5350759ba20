use std::f32::consts::FRAC_PI_2;

use cgmath::{Quaternion, Rad, Rotation3, Vector3};
use flow_orrery::solar::{
    OrreryState, SolarSystem,
    catalog::{self, EARTH, MERCURY, PLANETS, PLUTO, SATURN, SUN, URANUS},
};

use crate::common::test_utils::{
    assert_close, assert_vec3_close, orbit_position, planet_without_gpu, stand_in,
};

mod common;

fn system_without_gpu() -> SolarSystem {
    let planets = PLANETS.iter().map(planet_without_gpu).collect();
    SolarSystem::from_parts(stand_in(), SUN.spin, planets)
}

#[test]
fn catalog_is_ordered_by_distance() {
    assert_eq!(PLANETS.len(), 9);
    assert!(PLANETS.windows(2).all(|pair| pair[0].distance < pair[1].distance));
    assert!(PLANETS.iter().all(|spec| spec.distance > SUN.radius));
}

#[test]
fn only_saturn_and_uranus_have_rings() {
    let ringed: Vec<_> = PLANETS
        .iter()
        .filter(|spec| spec.ring.is_some())
        .map(|spec| spec.name)
        .collect();
    assert_eq!(ringed, ["saturn", "uranus"]);

    let saturn_ring = SATURN.ring.map(|ring| (ring.inner_radius, ring.outer_radius));
    assert_eq!(saturn_ring, Some((10.0, 20.0)));
    let uranus_ring = URANUS.ring.map(|ring| (ring.inner_radius, ring.outer_radius));
    assert_eq!(uranus_ring, Some((7.0, 12.0)));
}

#[test]
fn catalog_lookup_ignores_case() {
    assert_eq!(catalog::planet("Earth"), Some(&EARTH));
    assert_eq!(catalog::planet("sun"), None);
}

#[test]
fn new_planet_sits_at_its_distance() {
    let planet = planet_without_gpu(&EARTH);
    assert_vec3_close(
        planet.world_position().unwrap(),
        Vector3::new(EARTH.distance, 0.0, 0.0),
    );
    assert!(planet.ring().is_none());
}

#[test]
fn ring_lies_in_the_orbital_plane() {
    let planet = planet_without_gpu(&SATURN);
    let ring = planet.ring().expect("saturn has a ring");
    let world = ring.get_world_transforms()[0];
    assert_vec3_close(world.position, Vector3::new(SATURN.distance, 0.0, 0.0));
    let expected = Quaternion::from_angle_x(Rad(-FRAC_PI_2));
    assert_vec3_close(world.rotation * Vector3::unit_z(), expected * Vector3::unit_z());
    assert_vec3_close(world.rotation * Vector3::unit_z(), Vector3::unit_y());
}

#[test]
fn planet_orbits_around_the_sun() {
    let mut planet = planet_without_gpu(&MERCURY);
    for frames in 1..=120 {
        planet.advance_frame();
        planet.update_world_transforms();
        if frames % 40 == 0 {
            assert_vec3_close(
                planet.world_position().unwrap(),
                orbit_position(MERCURY.distance, MERCURY.orbit, frames),
            );
        }
    }
}

#[test]
fn body_spins_on_top_of_its_orbit() {
    let mut planet = planet_without_gpu(&EARTH);
    let frames = 50;
    for _ in 0..frames {
        planet.advance_frame();
    }
    planet.update_world_transforms();

    let body = planet.body().unwrap().get_world_transforms()[0];
    let angle = (EARTH.orbit + EARTH.spin) * frames as f32;
    let expected = Quaternion::from_angle_y(Rad(angle));
    assert_vec3_close(body.rotation * Vector3::unit_x(), expected * Vector3::unit_x());

    let pivot = planet.pivot().get_local_transform(0).unwrap();
    let expected = Quaternion::from_angle_y(Rad(EARTH.orbit * frames as f32));
    assert_vec3_close(pivot.rotation * Vector3::unit_x(), expected * Vector3::unit_x());
    assert_vec3_close(pivot.position, Vector3::new(0.0, 0.0, 0.0));
}

#[test]
fn ring_follows_the_orbit_but_not_the_spin() {
    let mut planet = planet_without_gpu(&URANUS);
    let frames = 200;
    for _ in 0..frames {
        planet.advance_frame();
    }
    planet.update_world_transforms();

    let ring = planet.ring().unwrap().get_world_transforms()[0];
    let expected = Quaternion::from_angle_y(Rad(URANUS.orbit * frames as f32))
        * Quaternion::from_angle_x(Rad(-FRAC_PI_2));
    assert_vec3_close(ring.rotation * Vector3::unit_x(), expected * Vector3::unit_x());
    assert_vec3_close(ring.position, planet.world_position().unwrap());
}

#[test]
fn system_advances_every_body_once_per_frame() {
    let mut system = system_without_gpu();
    let frames = 30;
    for _ in 0..frames {
        system.advance_frame();
    }

    let sun = system.sun().get_world_transforms()[0];
    let expected = Quaternion::from_angle_y(Rad(SUN.spin * frames as f32));
    assert_vec3_close(sun.rotation * Vector3::unit_x(), expected * Vector3::unit_x());
    assert_vec3_close(sun.position, Vector3::new(0.0, 0.0, 0.0));

    for spec in PLANETS.iter() {
        let planet = system.planet(spec.name).unwrap();
        assert_vec3_close(
            planet.world_position().unwrap(),
            orbit_position(spec.distance, spec.orbit, frames),
        );
    }
}

#[test]
fn planets_keep_their_distance_from_the_sun() {
    let mut system = system_without_gpu();
    for _ in 0..500 {
        system.advance_frame();
    }
    for planet in system.planets() {
        let position = planet.world_position().unwrap();
        assert_close(position.y, 0.0);
        assert_close(
            (position.x * position.x + position.z * position.z).sqrt(),
            planet.spec.distance,
        );
    }
    // pluto barely moves
    let pluto = system.planet("pluto").unwrap().world_position().unwrap();
    assert!(pluto.x > PLUTO.distance * 0.99);
}

#[test]
fn state_counts_frames() {
    let mut state = OrreryState::default();
    assert_eq!(state.frames(), 0);
    for _ in 0..3 {
        state.record_frame();
    }
    assert_eq!(state.frames(), 3);
    assert!(state.frame_rate() >= 0.0);
    assert_eq!(state.frame_rate(), 0.0);
}

#[test]
fn system_finds_planets_by_name() {
    let system = system_without_gpu();
    assert_eq!(system.planet("Saturn").map(|planet| planet.spec), Some(SATURN));
    assert!(system.planet("sun").is_none());
    assert!(system.planet("vulcan").is_none());
}
