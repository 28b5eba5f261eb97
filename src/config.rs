use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::atlas::SliceTable;
use crate::error::ConfigError;
use crate::viewport::DesignSize;
use crate::window::WindowConfig;

/// Built-in configuration: a 9×9 board over the `tiles-01` atlas.
pub const DEFAULT_CONFIG: &str = include_str!("../resources/fruitboard.json");

/// Directory searched for atlas images when `--assets` is not given,
/// relative to the working directory. Images missing there fall back to the
/// embedded sheet.
pub const DEFAULT_ASSET_DIR: &str = "resources";

// ── AppConfig ─────────────────────────────────────────────────────────────────

/// Everything the demo reads at startup. Constant once loaded.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AppConfig {
    pub design: DesignSize,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(flatten)]
    pub table: SliceTable,
}

impl AppConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    /// Design size, background colour and slice table invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.design.validate()?;
        self.window.background_rgba()?;
        self.table.validate()
    }
}

// ── Options ───────────────────────────────────────────────────────────────────

/// Command-line options: `--config <file>` and `--assets <dir>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub assets: Option<PathBuf>,
}

impl Options {
    pub fn from_env() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    /// Unknown arguments are logged and ignored.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut opts = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => opts.config = args.next().map(PathBuf::from),
                "--assets" => opts.assets = args.next().map(PathBuf::from),
                other => tracing::warn!("ignoring unknown argument '{other}'"),
            }
        }
        opts
    }

    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        match &self.config {
            Some(path) => AppConfig::from_path(path),
            None => AppConfig::embedded(),
        }
    }

    pub fn asset_dir(&self) -> PathBuf {
        self.assets.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
