use instant::Duration;
use winit::event::{DeviceEvent, WindowEvent};

use crate::{
    context::{Context, InitContext},
    data_structures::texture::{Texture, create_default_sampler},
    flow::{GraphicsFlow, Out},
    pipelines::sky::mk_sky_bind_group,
    render::Render,
    resources::texture::load_cube_texture,
    solar::{
        OrreryState,
        catalog::{STARS, STARS_FALLBACK},
    },
};

/// The star background, a cube map with the same image on every face.
pub struct Starfield {
    _cube: Texture,
    bind_group: wgpu::BindGroup,
}

impl Starfield {
    pub async fn new(ctx: InitContext) -> Self {
        let cube = load_cube_texture([STARS; 6], STARS_FALLBACK, &ctx.device, &ctx.queue).await;
        let sampler = match &cube.sampler {
            Some(sampler) => sampler.clone(),
            None => create_default_sampler(&ctx.device),
        };
        let bind_group =
            mk_sky_bind_group(&ctx.device, &ctx.sky_bind_group_layout, &cube, &sampler);
        Self {
            _cube: cube,
            bind_group,
        }
    }
}

impl GraphicsFlow<OrreryState> for Starfield {
    fn on_init(&mut self, _: &mut Context, _: &mut OrreryState) -> Out {
        Out::Empty
    }

    fn on_update(&mut self, _: &Context, _: &mut OrreryState, _: Duration) -> Out {
        Out::Empty
    }

    fn on_tick(&mut self, _: &Context, _: &mut OrreryState) -> Out {
        Out::Empty
    }

    fn on_device_events(&mut self, _: &Context, _: &mut OrreryState, _: &DeviceEvent) -> Out {
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, _: &mut OrreryState, _: &WindowEvent) -> Out {
        Out::Empty
    }

    fn on_render(&self) -> Render<'_> {
        Render::Custom(Box::new(
            move |ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>| {
                render_pass.set_pipeline(&ctx.pipelines.sky);
                render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
                render_pass.set_bind_group(1, &self.bind_group, &[]);
                // one triangle covering the screen, positions come from the vertex index
                render_pass.draw(0..3, 0..1);
            },
        ))
    }
}
