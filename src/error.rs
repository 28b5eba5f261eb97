use std::path::PathBuf;

use thiserror::Error;

/// Problems with the declarative configuration document. All of these are
/// fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("design size must be positive, finite and at most 1024 per axis, got {width}x{height}")]
    InvalidDesignSize { width: f32, height: f32 },

    #[error("tile '{tile}' references atlas {atlas}, but only {count} atlases are defined")]
    UnknownAtlas { tile: String, atlas: usize, count: usize },

    #[error("tile name '{0}' is defined more than once")]
    DuplicateTile(String),

    #[error("tile '{0}' has zero width or height")]
    EmptyTile(String),

    #[error("tile '{tile}' ({x},{y} {w}x{h} px) lies outside atlas '{atlas}' ({atlas_w}x{atlas_h} px)")]
    TileOutOfBounds {
        tile: String,
        atlas: String,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        atlas_w: u32,
        atlas_h: u32,
    },

    #[error("tile '{tile}' ({x},{y} {width}x{height} tiles) overflows pixel coordinates")]
    TileOverflow { tile: String, x: u32, y: u32, width: u32, height: u32 },

    #[error("the slice table has no '{0}' fallback tile")]
    NoSentinel(&'static str),

    #[error("invalid colour '{0}', expected #rrggbb")]
    InvalidColor(String),
}

/// Atlas loading and lookup failures.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("failed to decode atlas image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("atlas '{0}' has no image in this source")]
    NotFound(String),

    /// The fallback tile is not loaded; nothing sensible can be drawn.
    #[error("could not find '{sentinel}' to recover from missing texture '{requested}'")]
    MissingSentinel {
        sentinel: &'static str,
        requested: String,
    },
}

/// GPU setup failures.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Top-level error returned by [`crate::app::run`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Atlas(#[from] AtlasError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
