use std::{num::NonZeroUsize, sync::Arc};

use tracing::{debug, error, info, warn};
use vello::{
    AaConfig, RendererOptions,
    kurbo::Point,
    util::{RenderContext, RenderSurface},
    wgpu,
};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{
    Plot, PlotError, PlotLayout, Renderer, Result, SceneRenderer, SeriesPath, SeriesStore,
    ViewController,
};

/// Wheel pixels treated as one line of scroll.
const PIXELS_PER_LINE: f64 = 50.0;
const BORDER_STEP: i64 = 10;

pub(crate) struct PlotApp {
    layout: PlotLayout,
    store: SeriesStore,
    view: ViewController,
    renderer: SceneRenderer,
    handles: Vec<SeriesPath>,

    context: RenderContext,
    render_state: Option<RenderState>,
    renderers: Vec<Option<vello::Renderer>>,

    error: Option<PlotError>,
}

impl PlotApp {
    pub(crate) fn new(plot: Plot) -> Result<Self> {
        let Plot { layout, store } = plot;

        let mut view = ViewController::new(
            &layout,
            layout.width.round() as u32,
            layout.height.round() as u32,
        )?;
        view.fit(&store);

        Ok(Self {
            renderer: SceneRenderer::new(layout.style),
            layout,
            store,
            view,
            handles: Vec::new(),
            context: RenderContext::new(),
            render_state: None,
            renderers: Vec::new(),
            error: None,
        })
    }

    /// Runs the event loop until the window closes. This blocks.
    pub(crate) fn display(mut self) -> Result<()> {
        EventLoop::new()?.run_app(&mut self)?;
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlotError) {
        error!(%error, "shutting down");
        self.error = Some(error);
        event_loop.exit();
    }

    fn request_redraw(&self) {
        if let Some(RenderState { window, .. }) = &self.render_state {
            window.request_redraw();
        }
    }

    /// Uploads every series the renderer has not seen yet.
    fn sync_handles(&mut self) {
        for (_, series) in self.store.iter().skip(self.handles.len()) {
            self.handles.push(self.renderer.upload(series));
        }
    }

    fn create_render_state(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_inner_size(LogicalSize::new(self.layout.width, self.layout.height))
                    .with_resizable(true)
                    .with_title(self.layout.title.clone()),
            )?,
        );
        let size = window.inner_size();
        info!(
            width = size.width,
            height = size.height,
            scale_factor = window.scale_factor(),
            "window created"
        );

        let surface = pollster::block_on(self.context.create_surface(
            window.clone(),
            size.width,
            size.height,
            wgpu::PresentMode::AutoVsync,
        ))?;

        self.renderers
            .resize_with(self.context.devices.len(), || None);

        let id = surface.dev_id;
        if self.renderers[id].is_none() {
            let device_handle = &self.context.devices[id];
            let renderer = vello::Renderer::new(
                &device_handle.device,
                RendererOptions {
                    use_cpu: false,
                    antialiasing_support: [AaConfig::Area].iter().copied().collect(),
                    num_init_threads: NonZeroUsize::new(1),
                    pipeline_cache: None,
                },
            )?;
            self.renderers[id] = Some(renderer);
        }

        if let Err(error) = self.view.resize(size.width, size.height) {
            debug!(%error, "keeping configured viewport");
        }
        self.sync_handles();
        self.render_state = Some(RenderState { surface, window });
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Err(error) = self.view.resize(width, height) {
            debug!(%error, "skipping resize");
            return;
        }
        if let Some(RenderState { surface, window }) = &mut self.render_state {
            self.context.resize_surface(surface, width, height);
            window.request_redraw();
        }
    }

    fn adjust_border(&mut self, step: i64) {
        let border = (self.view.viewport().border() as i64 + step).max(0) as u32;
        match self.view.set_border(border) {
            Ok(()) => self.request_redraw(),
            Err(error) => warn!(%error, "border unchanged"),
        }
    }

    fn render(&mut self) -> Result<()> {
        self.sync_handles();

        let Some(RenderState { surface, .. }) = &self.render_state else {
            return Ok(());
        };

        self.renderer.draw(&self.handles, self.view.projection());

        let device_handle = &self.context.devices[surface.dev_id];
        let render_params = vello::RenderParams {
            base_color: self.renderer.style().background,
            width: surface.config.width,
            height: surface.config.height,
            antialiasing_method: AaConfig::Area,
        };

        let Some(renderer) = self.renderers[surface.dev_id].as_mut() else {
            return Ok(());
        };
        renderer.render_to_texture(
            &device_handle.device,
            &device_handle.queue,
            self.renderer.scene(),
            &surface.target_view,
            &render_params,
        )?;

        let surface_texture = surface.surface.get_current_texture()?;
        let mut encoder =
            device_handle
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Surface Blit"),
                });
        surface.blitter.copy(
            &device_handle.device,
            &mut encoder,
            &surface.target_view,
            &surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default()),
        );
        device_handle.queue.submit([encoder.finish()]);
        surface_texture.present();

        if let Err(error) = device_handle.device.poll(wgpu::PollType::Poll) {
            warn!(%error, "device poll failed");
        }
        Ok(())
    }
}

impl ApplicationHandler for PlotApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_state.is_some() {
            return;
        }

        if let Err(error) = self.create_render_state(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        match &self.render_state {
            Some(render_state) if render_state.window.id() == window_id => {}
            _ => return,
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    Key::Character("f") => {
                        self.view.fit(&self.store);
                        self.request_redraw();
                    }
                    Key::Character("[") => self.adjust_border(-BORDER_STEP),
                    Key::Character("]") => self.adjust_border(BORDER_STEP),
                    _ => {}
                }
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.view.begin_drag(),
                ElementState::Released => self.view.end_drag(),
            },
            WindowEvent::CursorLeft { .. } => self.view.cursor_left(),
            WindowEvent::CursorMoved { position, .. } => {
                if self.view.cursor_moved(Point::new(position.x, position.y)) {
                    self.request_redraw();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(delta) => delta.y / PIXELS_PER_LINE,
                };
                self.view.zoom(scroll);
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => match self.render() {
                Ok(()) => {}
                Err(PlotError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                    let viewport = self.view.viewport();
                    self.resize(viewport.width(), viewport.height());
                }
                Err(PlotError::Surface(wgpu::SurfaceError::Timeout)) => {
                    warn!("surface timed out, skipping frame");
                }
                Err(error) => self.fail(event_loop, error),
            },
            _ => {}
        }
    }
}

struct RenderState {
    surface: RenderSurface<'static>,
    window: Arc<Window>,
}
