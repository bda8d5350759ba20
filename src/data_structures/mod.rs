//! Engine data structures: models, textures, scene graphs, and instances.
//!
//! - `model` contains mesh and material definitions, GPU resources for 3D models
//! - `texture` contains GPU texture wrapper and creation utilities
//! - `geometry` generates sphere and ring meshes on the CPU
//! - `instance` holds per-instance transformation data
//! - `scene_graph` enables hierarchical scene organization

pub mod geometry;
pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
