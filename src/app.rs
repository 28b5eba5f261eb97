use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::atlas::{AtlasSource, DirSource, EmbeddedSource, TileAtlas};
use crate::config::{AppConfig, Options};
use crate::error::{AtlasError, Error};
use crate::renderer::Renderer;
use crate::scene::{RootContainer, populate_board};
use crate::window::window_attributes;

/// Load the atlases and lay out the board. Fails only when a board tile can
/// be resolved neither by name nor through the fallback.
pub fn build_scene(
    config: &AppConfig,
    source: &impl AtlasSource,
) -> Result<(TileAtlas, RootContainer), AtlasError> {
    let atlas = TileAtlas::load(&config.table, source);
    if !atlas.skipped().is_empty() {
        tracing::warn!(skipped = ?atlas.skipped(), "some atlases failed to load");
    }

    let mut root = RootContainer::new(config.design);
    let count = populate_board(&mut root, &atlas)?;
    tracing::info!(tiles = atlas.len(), sprites = count, "scene ready");
    Ok((atlas, root))
}

// ── AppContext ──────────────────────────────────────────────────────────────

/// Everything that lives for the duration of the window. Owned by the event
/// loop handler and passed explicitly; there is no global instance.
pub struct AppContext {
    pub config: AppConfig,
    pub atlas: TileAtlas,
    pub root: RootContainer,
    pub renderer: Renderer,
}

impl AppContext {
    fn new(window: Arc<Window>, config: AppConfig, source: &impl AtlasSource) -> Result<Self, Error> {
        let (atlas, root) = build_scene(&config, source)?;
        let background = config.window.background_rgba()?;
        let renderer = pollster::block_on(Renderer::new(window, &atlas, background))?;

        let mut ctx = Self { config, atlas, root, renderer };
        let size = ctx.renderer.size();
        ctx.resize(size);
        Ok(ctx)
    }

    /// Refit the root container and push the new transform to the GPU.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.renderer.resize(size);
        if self.root.resize(size.width as f32, size.height as f32) {
            self.renderer.set_root_transform(self.root.fit());
        }
        self.renderer.window.request_redraw();
    }

    fn redraw(&mut self) {
        let batches = self.root.batches();
        match self.renderer.render(&batches) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.renderer.window.inner_size();
                self.resize(size);
            }
            Err(e) => tracing::warn!("render error: {e}"),
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    config: AppConfig,
    assets: PathBuf,
    ctx: Option<AppContext>,
    /// First fatal error; surfaced from [`run`] after the loop exits.
    error: Option<Error>,
}

impl App {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<AppContext, Error> {
        let window = Arc::new(event_loop.create_window(window_attributes(&self.config.window))?);
        let source = DirSource::new(&self.assets).or(EmbeddedSource);
        AppContext::new(window, self.config.clone(), &source)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.ctx.is_some() {
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);

        match self.start(event_loop) {
            Ok(ctx) => self.ctx = Some(ctx),
            Err(e) => {
                tracing::error!("startup failed: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(ctx) = self.ctx.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => ctx.resize(size),

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                tracing::info!(scale_factor, "display scale factor changed");
            }

            WindowEvent::RedrawRequested => ctx.redraw(),

            _ => {}
        }
    }
}

/// Load configuration and run the demo until the window closes.
pub fn run(options: Options) -> Result<(), Error> {
    let config = options.load_config()?;
    tracing::info!(
        width = config.design.width,
        height = config.design.height,
        atlases = config.table.atlases.len(),
        tiles = config.table.tiles.len(),
        "configuration loaded"
    );

    let event_loop = EventLoop::new()?;
    let mut app = App { config, assets: options.asset_dir(), ctx: None, error: None };
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
