use cgmath::{Deg, Rad};
use instant::Duration;
use winit::{
    event::{DeviceEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{
    camera::{Camera, Projection},
    context::{Context, InitContext},
    data_structures::{instance::Instance, scene_graph::SceneNode},
    flow::{GraphicsFlow, Out},
    pipelines::light::LightUniform,
    render::Render,
    solar::{
        OrreryState,
        body::{Planet, create_planet, create_sun},
        catalog::{self, PLANETS, SUN},
    },
};

/// The sun and every planet, advanced by one step per rendered frame.
pub struct SolarSystem {
    sun: Box<dyn SceneNode>,
    sun_spin: f32,
    planets: Vec<Planet>,
}

impl SolarSystem {
    pub async fn new(ctx: InitContext) -> Self {
        let sun = create_sun(&ctx, &SUN).await;
        let planets =
            futures::future::join_all(PLANETS.iter().map(|spec| create_planet(&ctx, spec))).await;
        log::info!("Solar system ready with {} planets", planets.len());
        Self::from_parts(sun, SUN.spin, planets)
    }

    /// Assembles a system from already built nodes.
    pub fn from_parts(mut sun: Box<dyn SceneNode>, sun_spin: f32, mut planets: Vec<Planet>) -> Self {
        sun.update_world_transform_all();
        planets.iter_mut().for_each(Planet::update_world_transforms);
        Self {
            sun,
            sun_spin,
            planets,
        }
    }

    /// One animation step: spin the sun, move every planet along its orbit
    /// and spin it, then recompute the world transforms.
    pub fn advance_frame(&mut self) {
        let spin = Rad(self.sun_spin);
        self.sun
            .set_local_transform_all(&mut |instance: &mut Instance| instance.rotate_y(spin));
        self.sun.update_world_transform_all();
        for planet in self.planets.iter_mut() {
            planet.advance_frame();
            planet.update_world_transforms();
        }
    }

    pub fn sun(&self) -> &dyn SceneNode {
        self.sun.as_ref()
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planet(&self, name: &str) -> Option<&Planet> {
        let spec = catalog::planet(name)?;
        self.planets.iter().find(|planet| planet.spec.name == spec.name)
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device) {
        self.sun.write_to_buffers(queue, device);
        for planet in self.planets.iter_mut() {
            planet.pivot_mut().write_to_buffers(queue, device);
        }
    }
}

impl GraphicsFlow<OrreryState> for SolarSystem {
    fn on_init(&mut self, ctx: &mut Context, _: &mut OrreryState) -> Out {
        ctx.window().set_title("Solar system");

        let camera = Camera::looking_at(catalog::CAMERA_EYE, [0.0, 0.0, 0.0]);
        ctx.camera.camera = camera;
        ctx.camera.controller.save_state(&camera);
        ctx.camera
            .controller
            .set_distance_limits(SUN.radius * 1.5, catalog::CAMERA_ZFAR * 0.8);
        ctx.projection = Projection::new(
            ctx.config.width,
            ctx.config.height,
            Deg(catalog::CAMERA_FOVY_DEG),
            catalog::CAMERA_ZNEAR,
            catalog::CAMERA_ZFAR,
        );
        ctx.camera.write_to_buffer(&ctx.queue, &ctx.projection);

        ctx.light.set(
            &ctx.queue,
            LightUniform::new(
                [0.0; 3],
                [1.0; 3],
                catalog::LIGHT_INTENSITY,
                catalog::LIGHT_RANGE,
            ),
        );
        ctx.clear_colour = wgpu::Color::BLACK;

        self.write_to_buffers(&ctx.queue, &ctx.device);
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, state: &mut OrreryState, _: Duration) -> Out {
        self.advance_frame();
        self.write_to_buffers(&ctx.queue, &ctx.device);
        state.record_frame();
        Out::Empty
    }

    fn on_tick(&mut self, _: &Context, state: &mut OrreryState) -> Out {
        log::debug!(
            "{:.1} fps, {} frames in total",
            state.frame_rate(),
            state.frames()
        );
        Out::Empty
    }

    fn on_device_events(&mut self, _: &Context, _: &mut OrreryState, _: &DeviceEvent) -> Out {
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, _: &mut OrreryState, event: &WindowEvent) -> Out {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state.is_pressed()
                    && !event.repeat
                    && event.physical_key == PhysicalKey::Code(KeyCode::KeyR) =>
            {
                Out::Configure(Box::new(|ctx: &mut Context| {
                    let camera = &mut ctx.camera;
                    camera.controller.reset(&mut camera.camera);
                    log::info!("Camera reset");
                }))
            }
            _ => Out::Empty,
        }
    }

    fn on_render(&self) -> Render<'_> {
        let mut renders = vec![self.sun.get_render()];
        renders.extend(self.planets.iter().map(|planet| planet.pivot().get_render()));
        Render::Composed(renders)
    }
}
