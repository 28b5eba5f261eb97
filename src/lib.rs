pub mod app;
pub mod atlas;
pub mod config;
pub mod error;
pub mod renderer;
pub mod scene;
pub mod viewport;
pub mod window;

/// Default `tiles-01` sheet, embedded at compile time.
pub const DEFAULT_SHEET: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/tiles-01.png"));

/// Atlas path the embedded sheet answers to.
pub const DEFAULT_SHEET_PATH: &str = "tiles-01.png";

pub use app::{AppContext, build_scene, run};
pub use atlas::{EmbeddedSource, SENTINEL, TILE_SIZE, TileAtlas};
pub use config::{AppConfig, Options};
pub use error::{AtlasError, ConfigError, Error};
pub use viewport::{DesignSize, ViewportFit};
