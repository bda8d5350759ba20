#![allow(dead_code)]

use flow_orrery::{
    Vector3,
    data_structures::scene_graph::{ContainerNode, SceneNode},
    solar::{Planet, catalog::BodySpec},
};

pub const EPSILON: f32 = 1e-3;

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_vec3_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual.x - expected.x).abs() <= EPSILON
            && (actual.y - expected.y).abs() <= EPSILON
            && (actual.z - expected.z).abs() <= EPSILON,
        "expected {expected:?}, got {actual:?}"
    );
}

/// An empty node standing in for a mesh, so planets can be built without a GPU.
pub fn stand_in() -> Box<dyn SceneNode> {
    Box::new(ContainerNode::new(1))
}

/// A planet made of stand-ins, with a ring stand-in if `spec` has a ring.
pub fn planet_without_gpu(spec: &BodySpec) -> Planet {
    let ring = spec.ring.map(|_| stand_in());
    Planet::new(*spec, stand_in(), ring)
}

/// Where a body orbiting around Y sits after `frames` steps of `orbit` radians.
pub fn orbit_position(distance: f32, orbit: f32, frames: u32) -> Vector3<f32> {
    let angle = orbit * frames as f32;
    Vector3::new(distance * angle.cos(), 0.0, -distance * angle.sin())
}
