//! Flow control and application event loop.
//!
//! A "flow" is a self-contained part of the application (the planets, the star
//! background, ...) that reacts to input, updates its state and provides
//! renderable objects each frame. The event loop owns all flows and coordinates
//! rendering and event distribution.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<S>`] is the trait for scenes that handle events and rendering
//! - [`Out`] lets a flow reconfigure the [`Context`] after a lifecycle hook
//!
//! # Lifecycle Flow
//!
//! The event loop follows this pattern each frame:
//! 1. Collect window/device events, feed the camera controller
//! 2. Call `on_<device/window>_events` on all flows
//! 3. Update flow state (`on_update` every frame, `on_tick` periodically)
//! 4. Upload the camera uniform
//! 5. Call flows' `on_render()` and draw the batches (custom, emissive, lit, transparent)
//! 6. Present frame

use std::{iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    context::{Context, InitContext},
    data_structures::{model::DrawModel, texture::Texture},
    render::{Batches, Instanced, Render},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

///
/// This is the Output Type for every lifecycle hook.
///
/// `Out::Configure` can be used to modify the Context during runtime for instance to change the tick
/// speed, the clear colour or to reset the camera.
///
/// `Empty` is the default output used when nothing needs to change.
///
pub enum Out {
    Configure(Box<dyn FnOnce(&mut Context)>),
    Empty,
}

impl Default for Out {
    fn default() -> Self {
        Self::Empty
    }
}

impl Out {
    fn apply(self, ctx: &mut Context) {
        match self {
            Out::Configure(f) => f(ctx),
            Out::Empty => (),
        }
    }
}

/// Trait for implementing a renderable scene.
///
/// A `GraphicsFlow` manages a self-contained portion of the application:
/// rendering, input handling, animations, and state updates. The engine
/// coordinates multiple flows, passes events to them, and composes their renders.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created; configure context (camera, light, clear color, etc.)
/// 2. `on_window_events()` and `on_device_events()` are called for each winit input event
/// 3. `on_update()` is called every frame, before the frame is drawn
/// 4. `on_tick()` is called every `tick_duration_millis`
/// 5. `on_render()` is called each frame and specifies how to render `self`
///
pub trait GraphicsFlow<S> {
    /// Initialize the flow and configure the context.
    ///
    /// This is the place to configure things such as the default background
    /// colour, the light or the camera start position.
    fn on_init(&mut self, ctx: &mut Context, state: &mut S) -> Out;

    /// Update state every frame.
    ///
    /// Called every frame with the elapsed time `dt`. Use for animations and
    /// other per-frame logic.
    fn on_update(&mut self, ctx: &Context, state: &mut S, dt: Duration) -> Out;

    /// Update state periodically.
    ///
    /// Called every `tick_duration_millis` milliseconds (configurable via context).
    /// Use for logic that doesn't need to run every frame.
    fn on_tick(&mut self, ctx: &Context, state: &mut S) -> Out;

    /// Handle raw device events (mouse motion, raw keys).
    fn on_device_events(&mut self, ctx: &Context, state: &mut S, event: &DeviceEvent) -> Out;

    /// Handle window events (keyboard, mouse, window resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, state: &mut S, event: &WindowEvent) -> Out;

    /// Return renderable objects for this flow.
    ///
    /// Called each frame. Collect your objects into a [`Render`] and return it.
    /// The engine batches the renders of all flows per pipeline.
    fn on_render(&self) -> Render<'_>;
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an `InitContext` and asynchronously returns a
/// boxed `GraphicsFlow`. This allows lazy initialization and resource loading.
pub type FlowConstructor<S> = Box<dyn FnOnce(InitContext) -> FlowFuture<S>>;

pub type FlowFuture<S> = Pin<Box<dyn Future<Output = Box<dyn GraphicsFlow<S>>>>>;

/// Wraps an async builder into a [`FlowConstructor`].
///
/// ```ignore
/// let flows = vec![constructor(|ctx| async move {
///     Box::new(Starfield::new(ctx).await) as Box<dyn GraphicsFlow<OrreryState>>
/// })];
/// ```
pub fn constructor<S, F, Fut>(build: F) -> FlowConstructor<S>
where
    S: 'static,
    F: FnOnce(InitContext) -> Fut + 'static,
    Fut: Future<Output = Box<dyn GraphicsFlow<S>>> + 'static,
{
    Box::new(move |ctx| {
        let flow: FlowFuture<S> = Box::pin(build(ctx));
        flow
    })
}

/// Application state bundle: GPU context, app state, and surface status.
pub struct AppState<State: 'static> {
    pub(crate) ctx: Context,
    state: State,
    is_surface_configured: bool,
}

impl<State: Default> AppState<State> {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        Ok(Self {
            ctx,
            state: State::default(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn init_flows(&mut self, graphics_flows: &mut [Box<dyn GraphicsFlow<State>>]) {
        for flow in graphics_flows.iter_mut() {
            flow.on_init(&mut self.ctx, &mut self.state)
                .apply(&mut self.ctx);
        }
    }

    fn update(&mut self, graphics_flows: &mut [Box<dyn GraphicsFlow<State>>], dt: Duration) {
        for flow in graphics_flows.iter_mut() {
            flow.on_update(&self.ctx, &mut self.state, dt)
                .apply(&mut self.ctx);
        }
        let camera = &mut self.ctx.camera;
        camera
            .controller
            .update(&mut camera.camera, &self.ctx.projection);
        camera.write_to_buffer(&self.ctx.queue, &self.ctx.projection);
    }

    fn tick(&mut self, graphics_flows: &mut [Box<dyn GraphicsFlow<State>>]) {
        for flow in graphics_flows.iter_mut() {
            flow.on_tick(&self.ctx, &mut self.state)
                .apply(&mut self.ctx);
        }
    }

    fn render(
        &mut self,
        graphics_flows: &[Box<dyn GraphicsFlow<State>>],
    ) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // Custom renders (the background) draw while the batches are collected.
            let mut batches = Batches::default();
            for flow in graphics_flows.iter() {
                flow.on_render()
                    .set_pipelines(&self.ctx, &mut render_pass, &mut batches);
            }

            let passes = [
                (&self.ctx.pipelines.emissive, batches.emissive),
                (&self.ctx.pipelines.basic, batches.lit),
                (&self.ctx.pipelines.transparent, batches.transparent),
            ];
            for (pipeline, instances) in passes {
                if instances.is_empty() {
                    continue;
                }
                render_pass.set_pipeline(pipeline);
                for instanced in instances {
                    self.draw_instanced(&mut render_pass, instanced);
                }
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn draw_instanced(&self, render_pass: &mut wgpu::RenderPass<'_>, instanced: Instanced<'_>) {
        if instanced.amount == 0 || instanced.instance.size() == 0 {
            log::warn!("you attemted to render something with zero instances");
            return;
        }
        render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
        render_pass.draw_model_instanced(
            instanced.model,
            0..instanced.amount as u32,
            &self.ctx.camera.bind_group,
            &self.ctx.light.bind_group,
        );
    }
}

pub struct App<State: 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent<State>>,
    state: Option<AppState<State>>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow<State>>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConstructor<State>>>,
    last_time: Instant,
    time_since_tick: Duration,
}

impl<State: 'static> App<State> {
    fn new(
        event_loop: &EventLoop<FlowEvent<State>>,
        constructors: Vec<FlowConstructor<State>>,
    ) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            last_time: Instant::now(),
            time_since_tick: Duration::from_millis(0),
        })
    }
}

pub(crate) enum FlowEvent<State: 'static> {
    #[allow(dead_code)]
    Initialized {
        state: AppState<State>,
        flows: Vec<Box<dyn GraphicsFlow<State>>>,
    },
    #[allow(dead_code)]
    Failed(anyhow::Error),
}

impl<State: 'static + Default> App<State> {
    fn start(&mut self, mut app_state: AppState<State>, flows: Vec<Box<dyn GraphicsFlow<State>>>) {
        self.graphics_flows = flows;
        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);
        app_state.init_flows(&mut self.graphics_flows);
        app_state.ctx.window.request_redraw();
        self.last_time = Instant::now();
        self.state = Some(app_state);
    }
}

impl<State: 'static + Default> ApplicationHandler<FlowEvent<State>> for App<State> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructors) = self.constructors.take() else {
            // resumed again after a suspend, everything is set up already
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes();

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create a window: {e}");
                event_loop.exit();
                return;
            }
        };

        let init_future = async move {
            let app_state = AppState::new(window).await?;

            let flow_futures: Vec<_> = constructors
                .into_iter()
                // The clone in into() leverages the internal Arcs of Device and Queue and thus only clones the ref
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows: Vec<_> = futures::future::join_all(flow_futures).await;
            anyhow::Ok((app_state, flows))
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok((app_state, flows)) => self.start(app_state, flows),
                Err(e) => {
                    log::error!("App initialization failed: {e:#}");
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let event = match init_future.await {
                    Ok((state, flows)) => FlowEvent::Initialized { state, flows },
                    Err(e) => FlowEvent::Failed(e),
                };
                if proxy.send_event(event).is_err() {
                    log::error!("The event loop closed before the app was initialized");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent<State>) {
        match event {
            // This is the message from our wasm `spawn_local`
            FlowEvent::Initialized { state, flows } => self.start(state, flows),
            FlowEvent::Failed(e) => {
                log::error!("App initialization failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            state.ctx.camera.controller.handle_mouse(dx, dy);
        }
        for flow in self.graphics_flows.iter_mut() {
            flow.on_device_events(&state.ctx, &mut state.state, &event)
                .apply(&mut state.ctx);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        // general stuff
        state.ctx.camera.controller.handle_window_events(&event);

        for flow in self.graphics_flows.iter_mut() {
            flow.on_window_events(&state.ctx, &mut state.state, &event)
                .apply(&mut state.ctx);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                self.time_since_tick += dt;

                state.update(&mut self.graphics_flows, dt);
                if self.time_since_tick >= Duration::from_millis(state.ctx.tick_duration_millis) {
                    state.tick(&mut self.graphics_flows);
                    self.time_since_tick = Duration::from_millis(0);
                }

                match state.render(&self.graphics_flows) {
                    Ok(_) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Runs the flows built by `constructors` until the window is closed.
pub fn run<State: 'static + Default>(constructors: Vec<FlowConstructor<State>>) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info)?;
    }

    let event_loop: EventLoop<FlowEvent<State>> = EventLoop::with_user_event().build()?;

    let mut app: App<State> = App::new(&event_loop, constructors)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
