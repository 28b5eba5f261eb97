// ── Viewport fit math ─────────────────────────────────────────────────────────
//
// Fits the fixed design space inside the actual surface with one uniform scale
// factor, centred on whichever axis has slack (letterbox / pillarbox).

use serde::Deserialize;

use crate::error::ConfigError;

// ── DesignSize ────────────────────────────────────────────────────────────────

/// Logical authoring coordinate system, independent of the display resolution.
///
/// Both dimensions are strictly positive, finite and at most
/// [`DesignSize::MAX_EXTENT`]; construct through
/// [`DesignSize::new`] or deserialize and call [`DesignSize::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct DesignSize {
    pub width: f32,
    pub height: f32,
}

impl DesignSize {
    /// Largest accepted extent on either axis, in design units.
    pub const MAX_EXTENT: f32 = 1024.0;

    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Rejects zero, negative, non-finite and oversized dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0 && v <= Self::MAX_EXTENT;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidDesignSize { width: self.width, height: self.height })
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Number of whole design cells along each axis.
    pub fn cells(&self) -> (usize, usize) {
        (self.width.ceil() as usize, self.height.ceil() as usize)
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Screen rectangle (in surface pixels) covered by the scaled design space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── ViewportFit ───────────────────────────────────────────────────────────────

/// Uniform scale and centring offset applied to the root container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportFit {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ViewportFit {
    /// Identity transform, used before the first resize arrives.
    pub const IDENTITY: Self = Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 };

    /// Compute the fit of `design` inside a `screen_w × screen_h` surface.
    ///
    /// ```text
    /// if w/h > W/H:  scale = h / H     (wider than design: fit height)
    /// else:          scale = w / W     (taller or equal: fit width)
    /// offset_x = (w - W * scale) / 2
    /// offset_y = (h - H * scale) / 2
    /// ```
    pub fn compute(design: DesignSize, screen_w: f32, screen_h: f32) -> Self {
        let scale = if screen_w / screen_h > design.aspect_ratio() {
            screen_h / design.height
        } else {
            screen_w / design.width
        };

        Self {
            scale,
            offset_x: (screen_w - design.width * scale) / 2.0,
            offset_y: (screen_h - design.height * scale) / 2.0,
        }
    }

    /// The screen rectangle occupied by `design` under this fit.
    pub fn viewport(&self, design: DesignSize) -> Viewport {
        Viewport {
            x: self.offset_x,
            y: self.offset_y,
            width: design.width * self.scale,
            height: design.height * self.scale,
        }
    }

    /// Design-space point → surface pixels.
    pub fn to_screen(&self, point: [f32; 2]) -> [f32; 2] {
        [
            point[0] * self.scale + self.offset_x,
            point[1] * self.scale + self.offset_y,
        ]
    }

    /// Surface pixels → design-space point. Returns `None` for a zero scale
    /// (zero-area surface).
    pub fn to_design(&self, point: [f32; 2]) -> Option<[f32; 2]> {
        if self.scale == 0.0 {
            return None;
        }
        Some([
            (point[0] - self.offset_x) / self.scale,
            (point[1] - self.offset_y) / self.scale,
        ])
    }
}

impl Default for ViewportFit {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
