use std::collections::HashSet;

use serde::Deserialize;

use crate::error::ConfigError;

/// Edge length of one tile unit in pixels.
pub const TILE_SIZE: u32 = 16;

/// Reserved tile name returned when a lookup misses.
pub const SENTINEL: &str = "MISSINGTEX";

// ── AtlasInfo / TileInfo ─────────────────────────────────────────────────────

/// One packed source image.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AtlasInfo {
    pub name: String,
    /// Image locator, relative to the asset root.
    pub path: String,
    /// Declared pixel width.
    pub width: u32,
    /// Declared pixel height.
    pub height: u32,
}

/// A named rectangle inside an atlas, measured in tile units.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TileInfo {
    /// Index into the atlas list.
    pub atlas: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub name: String,
}

impl TileInfo {
    /// Pixel rectangle of this tile: origin and size scaled by [`TILE_SIZE`].
    ///
    /// `None` when any edge overflows `u32` pixel space.
    pub fn pixel_rect(&self) -> Option<TileRect> {
        let px = |v: u32| v.checked_mul(TILE_SIZE);
        let rect = TileRect {
            x: px(self.x)?,
            y: px(self.y)?,
            w: px(self.width)?,
            h: px(self.height)?,
        };
        rect.right()?;
        rect.bottom()?;
        Some(rect)
    }
}

/// Pixel rectangle within an atlas image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl TileRect {
    pub fn right(&self) -> Option<u32> {
        self.x.checked_add(self.w)
    }

    pub fn bottom(&self) -> Option<u32> {
        self.y.checked_add(self.h)
    }

    /// Normalised `(uv_min, uv_max)` within a `page_w × page_h` image.
    pub fn uv(&self, page_w: u32, page_h: u32) -> ([f32; 2], [f32; 2]) {
        let (pw, ph) = (page_w as f32, page_h as f32);
        let (x, y) = (self.x as f32, self.y as f32);
        (
            [x / pw, y / ph],
            [(x + self.w as f32) / pw, (y + self.h as f32) / ph],
        )
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        matches!((self.right(), self.bottom()), (Some(r), Some(b)) if r <= width && b <= height)
    }
}

// ── SliceTable ───────────────────────────────────────────────────────────────

/// The atlas list plus the tile list that carves those atlases up.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SliceTable {
    pub atlases: Vec<AtlasInfo>,
    pub tiles: Vec<TileInfo>,
}

impl SliceTable {
    pub fn new(atlases: Vec<AtlasInfo>, tiles: Vec<TileInfo>) -> Self {
        Self { atlases, tiles }
    }

    /// Check the invariants the loader relies on.
    ///
    /// Every tile must reference an existing atlas, be non-empty and lie
    /// inside its atlas's declared size. Names must be unique and the
    /// [`SENTINEL`] tile must be present. Duplicate names are rejected rather
    /// than silently overwritten.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.tiles.len());

        for tile in &self.tiles {
            let Some(atlas) = self.atlases.get(tile.atlas) else {
                return Err(ConfigError::UnknownAtlas {
                    tile: tile.name.clone(),
                    atlas: tile.atlas,
                    count: self.atlases.len(),
                });
            };

            if !seen.insert(tile.name.as_str()) {
                return Err(ConfigError::DuplicateTile(tile.name.clone()));
            }

            if tile.width == 0 || tile.height == 0 {
                return Err(ConfigError::EmptyTile(tile.name.clone()));
            }

            let Some(rect) = tile.pixel_rect() else {
                return Err(ConfigError::TileOverflow {
                    tile: tile.name.clone(),
                    x: tile.x,
                    y: tile.y,
                    width: tile.width,
                    height: tile.height,
                });
            };
            if !rect.fits_within(atlas.width, atlas.height) {
                return Err(ConfigError::TileOutOfBounds {
                    tile: tile.name.clone(),
                    atlas: atlas.name.clone(),
                    x: rect.x,
                    y: rect.y,
                    w: rect.w,
                    h: rect.h,
                    atlas_w: atlas.width,
                    atlas_h: atlas.height,
                });
            }
        }

        if !seen.contains(SENTINEL) {
            return Err(ConfigError::NoSentinel(SENTINEL));
        }
        Ok(())
    }

    /// Tiles belonging to atlas `index`, in table order.
    pub fn tiles_for(&self, index: usize) -> impl Iterator<Item = &TileInfo> {
        self.tiles.iter().filter(move |t| t.atlas == index)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
