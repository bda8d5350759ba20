//! Render composition and pipeline batching.
//!
//! This module defines the [`Render`] enum, which is used by flows and scene
//! nodes to specify how they should be rendered. The engine uses `Render` to
//! sort objects into batches for the different pipelines (lit, emissive,
//! transparent) and to support custom per-object render passes such as the
//! star background.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the primary enum describing render operations
//! - [`Instanced<'a>`] contains data for instanced rendering (model + instance buffer)
//!

use crate::{
    context::Context,
    data_structures::{model::Model, scene_graph::SceneNode},
};

/// Data for instanced object rendering: a model and its instance buffer.
///
/// The instance buffer contains per-instance transformation data written by
/// the scene graph.
#[derive(Clone)]
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub model: &'a Model,
    pub amount: usize,
}

/// Closure invoked with the active render pass for draws the batches don't cover.
pub type CustomRender<'a> = Box<dyn 'a + FnOnce(&Context, &mut wgpu::RenderPass<'_>)>;

/// Specifies how a scene object should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Default(Instanced)` renders a single lit instanced object
/// - `Defaults(Vec<Instanced>)` renders a batch of lit instanced objects
/// - `Emissive(Instanced)` / `Emissives(..)` render unlit objects
/// - `Transparent(Instanced)` / `Transparents(..)` render alpha-blended, double-sided objects
/// - `Composed(Vec<Render>)` recursively renders composition of multiple renders
/// - `Custom(...)` invokes a user-defined closure for custom rendering
///
pub enum Render<'a> {
    None,
    Default(Instanced<'a>),
    Defaults(Vec<Instanced<'a>>),
    Emissive(Instanced<'a>),
    Emissives(Vec<Instanced<'a>>),
    Transparent(Instanced<'a>),
    Transparents(Vec<Instanced<'a>>),
    Composed(Vec<Render<'a>>),
    Custom(CustomRender<'a>),
}

/// Instanced draws collected from all flows, grouped by pipeline.
#[derive(Default)]
pub(crate) struct Batches<'a> {
    pub(crate) lit: Vec<Instanced<'a>>,
    pub(crate) emissive: Vec<Instanced<'a>>,
    pub(crate) transparent: Vec<Instanced<'a>>,
}

impl<'a> Render<'a> {
    /// Sorts instanced draws into `batches`; custom closures are executed right away.
    pub(crate) fn set_pipelines(
        self,
        ctx: &Context,
        render_pass: &mut wgpu::RenderPass<'_>,
        batches: &mut Batches<'a>,
    ) {
        match self {
            Render::Default(instanced) => batches.lit.push(instanced),
            Render::Defaults(mut vec) => batches.lit.append(&mut vec),
            Render::Emissive(instanced) => batches.emissive.push(instanced),
            Render::Emissives(mut vec) => batches.emissive.append(&mut vec),
            Render::Transparent(instanced) => batches.transparent.push(instanced),
            Render::Transparents(mut vec) => batches.transparent.append(&mut vec),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(ctx, render_pass, batches)),
            Render::Custom(f) => f(ctx, render_pass),
            Render::None => (),
        }
    }
}

impl<'a> From<&'a dyn SceneNode> for Render<'a> {
    fn from(sn: &'a dyn SceneNode) -> Self {
        sn.get_render()
    }
}
