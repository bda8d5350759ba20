//! Scene graph and hierarchical scene organization.
//!
//! Provides the [`SceneNode`] trait and its two implementations: [`ContainerNode`],
//! an empty transform node used as a pivot, and [`ModelNode`], which owns a model
//! and the GPU instance buffer its world transforms are written to.

use std::ops::Range;

use log::warn;
use wgpu::{Device, util::DeviceExt};

use crate::{
    data_structures::{
        instance::{Instance, InstanceRaw},
        model,
    },
    render::{Instanced, Render},
};

/// Selects the pipeline a [`ModelNode`] is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shading {
    /// Diffuse lighting from the scene's point light.
    #[default]
    Lit,
    /// Unlit, the texture colour is the output colour.
    Emissive,
    /// Unlit, alpha-blended and visible from both sides.
    Transparent,
}

pub trait SceneNode {
    fn get_world_transforms(&self) -> Vec<Instance>;

    fn get_local_transform(&self, idx: usize) -> Option<Instance>;

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>>;

    fn add_child(&mut self, child: Box<dyn SceneNode>);

    fn set_local_transform(&mut self, idx: usize, instance: Instance);

    fn set_local_transform_all(&mut self, mutation: &mut dyn FnMut(&mut Instance));

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device);

    /**
     * Multiple instances of a parent can be passed down to multiple instances of multiple children.
     * The argument `parents_world_transform` with a matching `range` size provides control over which instances are transformed.
     */
    fn update_world_transforms(&mut self, range: Range<usize>, parents_world_transform: &[Instance]);

    fn update_world_transform_all(&mut self);

    fn get_render(&self) -> Render<'_>;
}

/// Shared by both node kinds: composes the parent transforms with the locals
/// in `range` and returns the resulting world transforms, or `None` if the
/// request does not fit the node.
fn compose_world_transforms(
    instances: &mut [(Instance, Instance)],
    range: Range<usize>,
    parents_world_transform: &[Instance],
) -> Option<Vec<Instance>> {
    if parents_world_transform.len() > instances.len() {
        warn!(
            "You tried to transform with len {}, but there are only {} instances to transform.",
            parents_world_transform.len(),
            instances.len()
        );
        return None;
    }
    let Some(targets) = instances.get_mut(range.clone()) else {
        warn!(
            "You tried to transform range {}..{}, which is out of bounds for parent len {}.",
            range.start,
            range.end,
            instances.len(),
        );
        return None;
    };
    let world_transforms = targets
        .iter_mut()
        .zip(parents_world_transform.iter())
        .map(|((local, world), parent)| {
            *world = parent * &*local;
            *world
        })
        .collect();
    Some(world_transforms)
}

fn identity_transforms(amount: usize) -> Vec<(Instance, Instance)> {
    (0..amount)
        .map(|_| (Instance::default(), Instance::default()))
        .collect()
}

/// An empty node whose only purpose is to carry a transform for its children.
pub struct ContainerNode {
    pub children: Vec<Box<dyn SceneNode>>,
    pub instances: Vec<(Instance, Instance)>,
}

impl ContainerNode {
    pub fn new(amount: usize) -> Self {
        Self {
            instances: identity_transforms(amount),
            children: vec![],
        }
    }
}

impl SceneNode for ContainerNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn set_local_transform(&mut self, idx: usize, instance: Instance) {
        if let Some((local, _)) = self.instances.get_mut(idx) {
            *local = instance;
        }
    }

    fn set_local_transform_all(&mut self, mutation: &mut dyn FnMut(&mut Instance)) {
        self.instances.iter_mut().for_each(|(local, _)| {
            mutation(local);
        });
    }

    fn get_world_transforms(&self) -> Vec<Instance> {
        self.instances.iter().map(|(_, world)| *world).collect()
    }

    fn update_world_transforms(&mut self, range: Range<usize>, parents_world_transform: &[Instance]) {
        let Some(world_transforms) =
            compose_world_transforms(&mut self.instances, range.clone(), parents_world_transform)
        else {
            return;
        };
        for child in self.children.iter_mut() {
            child.update_world_transforms(range.clone(), &world_transforms);
        }
    }

    fn update_world_transform_all(&mut self) {
        let range = 0..self.instances.len();
        let parents = vec![Instance::default(); range.len()];
        self.update_world_transforms(range, &parents);
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn get_local_transform(&self, idx: usize) -> Option<Instance> {
        self.instances.get(idx).map(|(local, _)| *local)
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device) {
        self.children
            .iter_mut()
            .for_each(|child| child.write_to_buffers(queue, device));
    }

    fn get_render(&self) -> Render<'_> {
        Render::Composed(self.children.iter().map(|child| child.get_render()).collect())
    }
}

/// A node that draws a model once per instance.
pub struct ModelNode {
    children: Vec<Box<dyn SceneNode>>,
    instance_buffer: wgpu::Buffer,
    instances: Vec<(Instance, Instance)>,
    model: model::Model,
    shading: Shading,
}

impl ModelNode {
    pub fn from_model(
        amount: usize,
        device: &Device,
        model: model::Model,
        shading: Shading,
    ) -> Self {
        let instances = identity_transforms(amount);

        let instance_data = instances
            .iter()
            .map(|(_, world)| world.to_raw())
            .collect::<Vec<_>>();

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            children: vec![],
            instance_buffer,
            instances,
            model,
            shading,
        }
    }
}

impl SceneNode for ModelNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn set_local_transform(&mut self, idx: usize, instance: Instance) {
        if let Some((local, _)) = self.instances.get_mut(idx) {
            *local = instance;
        }
    }

    fn set_local_transform_all(&mut self, mutation: &mut dyn FnMut(&mut Instance)) {
        self.instances
            .iter_mut()
            .for_each(|(local, _)| mutation(local));
    }

    fn get_world_transforms(&self) -> Vec<Instance> {
        self.instances.iter().map(|(_, world)| *world).collect()
    }

    fn update_world_transforms(&mut self, range: Range<usize>, parents_world_transform: &[Instance]) {
        let Some(world_transforms) =
            compose_world_transforms(&mut self.instances, range.clone(), parents_world_transform)
        else {
            return;
        };
        for child in self.children.iter_mut() {
            child.update_world_transforms(range.clone(), &world_transforms);
        }
    }

    fn update_world_transform_all(&mut self) {
        let range = 0..self.instances.len();
        let parents = vec![Instance::default(); range.len()];
        self.update_world_transforms(range, &parents);
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn get_local_transform(&self, idx: usize) -> Option<Instance> {
        self.instances.get(idx).map(|(local, _)| *local)
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device) {
        let raw_instances: Vec<InstanceRaw> = self
            .instances
            .iter()
            .map(|(_, world)| world.to_raw())
            .collect();
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&raw_instances),
        );
        self.children
            .iter_mut()
            .for_each(|child| child.write_to_buffers(queue, device));
    }

    fn get_render(&self) -> Render<'_> {
        let instanced = Instanced {
            instance: &self.instance_buffer,
            model: &self.model,
            amount: self.instances.len(),
        };
        let own = match self.shading {
            Shading::Lit => Render::Default(instanced),
            Shading::Emissive => Render::Emissive(instanced),
            Shading::Transparent => Render::Transparent(instanced),
        };
        if self.children.is_empty() {
            own
        } else {
            let mut renders = vec![own];
            renders.extend(self.children.iter().map(|child| child.get_render()));
            Render::Composed(renders)
        }
    }
}
