//! flow-orrery
//!
//! An animated model of the solar system on top of a small, instancing-oriented
//! wgpu engine that runs natively and in the browser. The sun and nine planets
//! are textured spheres hung below pivot nodes of a scene graph; every rendered
//! frame turns each pivot (the orbit) and each body (its own spin) by a fixed
//! angle.
//!
//! High-level modules
//! - `camera`: orbit camera, controller and uniforms for view/projection
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: engine data models (geometry, meshes, instances, textures, scene graph)
//! - `flow`: high level flow control (scenes / update loops)
//! - `pipelines`: definitions for the render pipelines (lit, emissive, transparent, sky)
//! - `resources`: helpers to load textures and create GPU resources
//! - `render`: render composition for efficient pipeline reuse
//! - `solar`: the bodies of the solar system and the flows animating them
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod solar;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Point3, Quaternion, Rad, Vector3};
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;

/// Browser entry point, starts the solar system on the `canvas` element.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_web() -> Result<(), wasm_bindgen::JsValue> {
    flow::run(solar::flows()).map_err(|e| wasm_bindgen::JsValue::from_str(&format!("{e:#}")))
}
