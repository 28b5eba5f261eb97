pub mod table;

use std::collections::HashMap;
use std::path::PathBuf;

use image::RgbaImage;

pub use table::{AtlasInfo, SENTINEL, SliceTable, TILE_SIZE, TileInfo, TileRect};

use crate::error::AtlasError;
use crate::scene::Sprite;

// ── AtlasSource ──────────────────────────────────────────────────────────────

/// Where atlas images come from.
pub trait AtlasSource {
    fn load(&self, info: &AtlasInfo) -> Result<RgbaImage, AtlasError>;

    /// Try `self` first, then `fallback`.
    fn or<S: AtlasSource>(self, fallback: S) -> ChainSource<Self, S>
    where
        Self: Sized,
    {
        ChainSource { primary: self, fallback }
    }
}

/// Two sources tried in order. When both fail, the primary's error is
/// reported.
#[derive(Clone, Debug)]
pub struct ChainSource<P, S> {
    primary: P,
    fallback: S,
}

impl<P: AtlasSource, S: AtlasSource> AtlasSource for ChainSource<P, S> {
    fn load(&self, info: &AtlasInfo) -> Result<RgbaImage, AtlasError> {
        let err = match self.primary.load(info) {
            Ok(img) => return Ok(img),
            Err(e) => e,
        };
        match self.fallback.load(info) {
            Ok(img) => {
                tracing::debug!(atlas = %info.name, "using fallback image: {err}");
                Ok(img)
            }
            Err(_) => Err(err),
        }
    }
}

/// Reads atlas images from a directory on disk.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AtlasSource for DirSource {
    fn load(&self, info: &AtlasInfo) -> Result<RgbaImage, AtlasError> {
        let path = self.root.join(&info.path);
        let img = image::open(&path).map_err(|source| AtlasError::Image { path, source })?;
        Ok(img.to_rgba8())
    }
}

/// The sheet compiled into the binary, served for the default atlas path.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedSource;

impl AtlasSource for EmbeddedSource {
    fn load(&self, info: &AtlasInfo) -> Result<RgbaImage, AtlasError> {
        if info.path != crate::DEFAULT_SHEET_PATH {
            return Err(AtlasError::NotFound(info.name.clone()));
        }
        let img = image::load_from_memory(crate::DEFAULT_SHEET).map_err(|source| AtlasError::Image {
            path: PathBuf::from(&info.path),
            source,
        })?;
        Ok(img.to_rgba8())
    }
}

/// Atlas images already decoded in memory, keyed by atlas name.
#[derive(Default)]
pub struct MemorySource {
    images: HashMap<String, RgbaImage>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, image: RgbaImage) -> Self {
        self.images.insert(name.to_string(), image);
        self
    }
}

impl AtlasSource for MemorySource {
    fn load(&self, info: &AtlasInfo) -> Result<RgbaImage, AtlasError> {
        self.images
            .get(&info.name)
            .cloned()
            .ok_or_else(|| AtlasError::NotFound(info.name.clone()))
    }
}

// ── SubTexture ───────────────────────────────────────────────────────────────

/// A named region of one loaded atlas page, ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubTexture {
    /// Index into [`TileAtlas::pages`].
    pub page: usize,
    /// Pixel rectangle inside the page.
    pub rect: TileRect,
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

/// One decoded atlas image.
#[derive(Debug)]
pub struct AtlasPage {
    pub name: String,
    pub image: RgbaImage,
}

// ── TileAtlas ────────────────────────────────────────────────────────────────

/// Name → sub-texture map, built once by [`TileAtlas::load`] and read-only
/// afterwards.
#[derive(Debug, Default)]
pub struct TileAtlas {
    textures: HashMap<String, SubTexture>,
    pages: Vec<AtlasPage>,
    skipped: Vec<String>,
}

impl TileAtlas {
    /// Load every atlas in `table` from `source` and slice it into named
    /// sub-textures.
    ///
    /// An atlas whose image cannot be loaded is logged and skipped; the rest
    /// still load. The table is expected to have passed
    /// [`SliceTable::validate`].
    pub fn load(table: &SliceTable, source: &impl AtlasSource) -> Self {
        let mut atlas = Self::default();

        for (index, info) in table.atlases.iter().enumerate() {
            let image = match source.load(info) {
                Ok(img) => img,
                Err(e) => {
                    tracing::error!(atlas = %info.name, "failed to load atlas: {e}");
                    atlas.skipped.push(info.name.clone());
                    continue;
                }
            };

            let (page_w, page_h) = image.dimensions();
            if (page_w, page_h) != (info.width, info.height) {
                tracing::warn!(
                    atlas = %info.name,
                    "image is {page_w}x{page_h}, declared {}x{}",
                    info.width,
                    info.height
                );
            }

            let page = atlas.pages.len();
            let mut count = 0usize;
            for tile in table.tiles_for(index) {
                let Some(rect) = tile.pixel_rect().filter(|r| r.fits_within(page_w, page_h)) else {
                    tracing::error!(atlas = %info.name, tile = %tile.name, "tile lies outside the decoded image; skipping");
                    continue;
                };
                let (uv_min, uv_max) = rect.uv(page_w, page_h);
                atlas
                    .textures
                    .insert(tile.name.clone(), SubTexture { page, rect, uv_min, uv_max });
                count += 1;
            }

            tracing::debug!(atlas = %info.name, tiles = count, "sliced atlas");
            atlas.pages.push(AtlasPage { name: info.name.clone(), image });
        }

        atlas
    }

    /// Look up `name`, falling back to [`SENTINEL`] when it is absent.
    ///
    /// A miss is logged. Fails only when the sentinel itself is not loaded.
    pub fn get(&self, name: &str) -> Result<&SubTexture, AtlasError> {
        if let Some(tex) = self.textures.get(name) {
            return Ok(tex);
        }
        tracing::error!("failed to get texture: {name}");
        self.textures.get(SENTINEL).ok_or_else(|| AtlasError::MissingSentinel {
            sentinel: SENTINEL,
            requested: name.to_string(),
        })
    }

    /// Exact lookup without fallback.
    pub fn try_get(&self, name: &str) -> Option<&SubTexture> {
        self.textures.get(name)
    }

    /// Build a sprite for `name` scaled so one tile unit covers one design
    /// unit.
    pub fn create_sprite(&self, name: &str, anchor: [f32; 2], tint: [f32; 4]) -> Result<Sprite, AtlasError> {
        let texture = *self.get(name)?;
        Ok(Sprite {
            texture,
            position: [0.0, 0.0],
            scale: 1.0 / TILE_SIZE as f32,
            anchor,
            tint,
        })
    }

    pub fn pages(&self) -> &[AtlasPage] {
        &self.pages
    }

    /// Names of atlases that failed to load.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
