//! Render pipelines and the uniforms they share.
//!
//! - `basic` is the lit pipeline (diffuse texture shaded by the point light)
//! - `emissive` draws unlit textured meshes
//! - `transparent` draws unlit, alpha-blended, double-sided meshes
//! - `sky` draws the cube-mapped background
//! - `light` holds the point light uniform

pub mod basic;
pub mod emissive;
pub mod light;
pub mod sky;
pub mod transparent;

/// All pipelines the frame loop switches between, created once with the context.
#[derive(Debug)]
pub struct Pipelines {
    pub basic: wgpu::RenderPipeline,
    pub emissive: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
    pub sky: wgpu::RenderPipeline,
    pub sky_bind_group_layout: wgpu::BindGroupLayout,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        light_bind_group_layout: &wgpu::BindGroupLayout,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let sky_bind_group_layout = sky::mk_sky_bind_group_layout(device);
        Self {
            basic: basic::mk_basic_pipeline(
                device,
                config,
                light_bind_group_layout,
                camera_bind_group_layout,
            ),
            emissive: emissive::mk_emissive_pipeline(
                device,
                config,
                light_bind_group_layout,
                camera_bind_group_layout,
            ),
            transparent: transparent::mk_transparent_pipeline(
                device,
                config,
                light_bind_group_layout,
                camera_bind_group_layout,
            ),
            sky: sky::mk_sky_pipeline(
                device,
                config,
                camera_bind_group_layout,
                &sky_bind_group_layout,
            ),
            sky_bind_group_layout,
        }
    }
}
