use serde::Deserialize;

use crate::error::ConfigError;

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Initial window settings.
///
/// The window is always resizable; `width × height` is only the size requested
/// at creation, in logical (DPI-independent) pixels.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Clear colour as `#rrggbb`.
    pub background: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "fruitboard".into(),
            width: 800,
            height: 800,
            background: "#1099bb".into(),
        }
    }
}

impl WindowConfig {
    pub fn background_rgba(&self) -> Result<[f32; 4], ConfigError> {
        parse_hex_color(&self.background)
    }
}

/// Parse `#rrggbb` (leading `#` optional) into normalised RGBA with alpha 1.
pub fn parse_hex_color(s: &str) -> Result<[f32; 4], ConfigError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?, 1.0])
}

// ── Tests ──────────────────────────────────────────────────────────────────────
