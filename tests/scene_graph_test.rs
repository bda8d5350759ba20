use std::f32::consts::FRAC_PI_2;

use cgmath::{Quaternion, Rad, Rotation3, Vector3};
use flow_orrery::data_structures::{
    instance::Instance,
    scene_graph::{ContainerNode, SceneNode},
};

use crate::common::test_utils::{assert_vec3_close, stand_in};

mod common;

#[test]
fn composing_applies_the_child_inside_the_parent() {
    let mut parent = Instance::from(Vector3::new(1.0, 2.0, 3.0));
    parent.rotate_y(Rad(FRAC_PI_2));
    parent.scale = Vector3::new(2.0, 2.0, 2.0);
    let child = Instance::from(Vector3::new(1.0, 0.0, 0.0));

    let world = parent * child;

    // (1, 0, 0) scaled to (2, 0, 0), turned a quarter around Y to (0, 0, -2)
    assert_vec3_close(world.position, Vector3::new(1.0, 2.0, 1.0));
    assert_vec3_close(world.scale, Vector3::new(2.0, 2.0, 2.0));
}

#[test]
fn rotate_y_keeps_the_position_and_accumulates() {
    let mut instance = Instance::from(Vector3::new(62.0, 0.0, 0.0));
    for _ in 0..4 {
        instance.rotate_y(Rad(0.25));
    }
    assert_vec3_close(instance.position, Vector3::new(62.0, 0.0, 0.0));
    let expected = Quaternion::from_angle_y(Rad(1.0));
    assert_vec3_close(
        instance.rotation * Vector3::unit_x(),
        expected * Vector3::unit_x(),
    );
}

#[test]
fn rotate_x_turns_the_local_z_axis_up() {
    let mut instance = Instance::new();
    instance.rotate_x(Rad(-FRAC_PI_2));
    assert_vec3_close(instance.rotation * Vector3::unit_z(), Vector3::unit_y());
}

#[test]
fn world_transforms_follow_the_parent() {
    let mut pivot = ContainerNode::new(1);
    let mut child = stand_in();
    child.set_local_transform(0, Instance::from(Vector3::new(10.0, 0.0, 0.0)));
    pivot.add_child(child);

    pivot.set_local_transform_all(&mut |instance: &mut Instance| {
        instance.rotate_y(Rad(FRAC_PI_2))
    });
    pivot.update_world_transform_all();

    let world = pivot.get_children()[0].get_world_transforms();
    assert_eq!(world.len(), 1);
    assert_vec3_close(world[0].position, Vector3::new(0.0, 0.0, -10.0));
}

#[test]
fn nested_pivots_compose_their_rotations() {
    let mut outer = ContainerNode::new(1);
    let mut inner: Box<dyn SceneNode> = Box::new(ContainerNode::new(1));
    let mut leaf = stand_in();
    leaf.set_local_transform(0, Instance::from(Vector3::new(0.0, 0.0, 5.0)));
    let mut turn = Instance::from(Vector3::new(3.0, 0.0, 0.0));
    turn.rotate_y(Rad(FRAC_PI_2));
    inner.set_local_transform(0, turn);
    inner.add_child(leaf);
    outer.add_child(inner);

    outer.update_world_transform_all();

    let leaf_world = outer.get_children()[0].get_children()[0].get_world_transforms();
    assert_vec3_close(leaf_world[0].position, Vector3::new(8.0, 0.0, 0.0));
}

#[test]
fn local_transform_is_readable_and_bounds_checked() {
    let mut node = ContainerNode::new(2);
    let placed = Instance::from(Vector3::new(1.0, 1.0, 1.0));
    node.set_local_transform(1, placed);
    node.set_local_transform(5, placed);

    assert_eq!(node.get_local_transform(0), Some(Instance::new()));
    assert_eq!(node.get_local_transform(1), Some(placed));
    assert_eq!(node.get_local_transform(5), None);
}

#[test]
fn mismatched_ranges_leave_world_transforms_untouched() {
    let mut node = ContainerNode::new(1);
    node.set_local_transform(0, Instance::from(Vector3::new(4.0, 0.0, 0.0)));

    let parents = [Instance::new(), Instance::new()];
    node.update_world_transforms(0..2, &parents);
    assert_eq!(node.get_world_transforms(), vec![Instance::new()]);

    node.update_world_transforms(3..4, &parents[..1]);
    assert_eq!(node.get_world_transforms(), vec![Instance::new()]);

    node.update_world_transform_all();
    assert_vec3_close(
        node.get_world_transforms()[0].position,
        Vector3::new(4.0, 0.0, 0.0),
    );
}
