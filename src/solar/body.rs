//! A planet: its pivot at the sun's centre, the sphere and an optional ring.
//!
//! The pivot carries the orbit. The sphere and ring are children placed
//! `distance` away along X, so turning the pivot moves them around the sun
//! while the sphere's own rotation only spins it in place. The ring is a
//! sibling of the sphere and therefore keeps its orientation while the
//! sphere spins.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Rad, Vector3};

use crate::{
    context::InitContext,
    data_structures::{
        geometry,
        instance::Instance,
        scene_graph::{ContainerNode, ModelNode, SceneNode, Shading},
    },
    resources::load_textured_model,
    solar::catalog::{BodySpec, RING_SEGMENTS, SPHERE_SEGMENTS},
};

const BODY: usize = 0;
const RING: usize = 1;

pub struct Planet {
    pub spec: BodySpec,
    pivot: ContainerNode,
}

impl Planet {
    /// Hangs `body` and `ring` below a fresh pivot and moves both out to the
    /// planet's distance. The ring is laid flat into the XZ plane.
    pub fn new(
        spec: BodySpec,
        mut body: Box<dyn SceneNode>,
        ring: Option<Box<dyn SceneNode>>,
    ) -> Self {
        let offset = Vector3::new(spec.distance, 0.0, 0.0);
        let mut pivot = ContainerNode::new(1);

        body.set_local_transform(0, Instance::from(offset));
        pivot.add_child(body);

        if let Some(mut ring) = ring {
            let mut placement = Instance::from(offset);
            placement.rotate_x(Rad(-FRAC_PI_2));
            ring.set_local_transform(0, placement);
            pivot.add_child(ring);
        }

        pivot.update_world_transform_all();
        Self { spec, pivot }
    }

    /// Turns the pivot by the orbit step and the body by the spin step.
    ///
    /// World transforms are not recomputed here, see
    /// [`update_world_transforms`](Self::update_world_transforms).
    pub fn advance_frame(&mut self) {
        let orbit = Rad(self.spec.orbit);
        let spin = Rad(self.spec.spin);
        self.pivot
            .set_local_transform_all(&mut |instance: &mut Instance| instance.rotate_y(orbit));
        if let Some(body) = self.pivot.get_children_mut().get_mut(BODY) {
            body.set_local_transform_all(&mut |instance: &mut Instance| instance.rotate_y(spin));
        }
    }

    pub fn update_world_transforms(&mut self) {
        self.pivot.update_world_transform_all();
    }

    pub fn pivot(&self) -> &dyn SceneNode {
        &self.pivot
    }

    pub fn pivot_mut(&mut self) -> &mut dyn SceneNode {
        &mut self.pivot
    }

    pub fn body(&self) -> Option<&dyn SceneNode> {
        self.pivot.get_children().get(BODY).map(|node| node.as_ref())
    }

    pub fn ring(&self) -> Option<&dyn SceneNode> {
        self.pivot.get_children().get(RING).map(|node| node.as_ref())
    }

    /// Centre of the planet in world space, as of the last world transform update.
    pub fn world_position(&self) -> Option<Vector3<f32>> {
        self.body()
            .and_then(|body| body.get_world_transforms().first().map(|world| world.position))
    }
}

/// Builds a lit sphere for `spec`, plus its ring if it has one, and wraps them in a [`Planet`].
pub async fn create_planet(ctx: &InitContext, spec: &BodySpec) -> Planet {
    let sphere = geometry::sphere(spec.radius, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
    let model = load_textured_model(
        spec.name,
        &sphere,
        spec.texture,
        spec.fallback,
        &ctx.device,
        &ctx.queue,
    )
    .await;
    let body: Box<dyn SceneNode> =
        Box::new(ModelNode::from_model(1, &ctx.device, model, Shading::Lit));

    let ring = match &spec.ring {
        Some(ring) => {
            let data = geometry::ring(ring.inner_radius, ring.outer_radius, RING_SEGMENTS);
            let model = load_textured_model(
                &format!("{} ring", spec.name),
                &data,
                ring.texture,
                ring.fallback,
                &ctx.device,
                &ctx.queue,
            )
            .await;
            let node: Box<dyn SceneNode> =
                Box::new(ModelNode::from_model(1, &ctx.device, model, Shading::Transparent));
            Some(node)
        }
        None => None,
    };

    log::debug!("Created {} at distance {}", spec.name, spec.distance);
    Planet::new(*spec, body, ring)
}

/// The sun is a single unlit sphere at the origin.
pub async fn create_sun(ctx: &InitContext, spec: &BodySpec) -> Box<dyn SceneNode> {
    let sphere = geometry::sphere(spec.radius, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
    let model = load_textured_model(
        spec.name,
        &sphere,
        spec.texture,
        spec.fallback,
        &ctx.device,
        &ctx.queue,
    )
    .await;
    let mut sun = ModelNode::from_model(1, &ctx.device, model, Shading::Emissive);
    sun.update_world_transform_all();
    Box::new(sun)
}
