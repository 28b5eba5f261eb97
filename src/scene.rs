use crate::atlas::{SubTexture, TileAtlas};
use crate::error::AtlasError;
use crate::renderer::pipeline::SpriteVertex;
use crate::viewport::{DesignSize, ViewportFit};

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// ── Sprite ───────────────────────────────────────────────────────────────────

/// A textured quad positioned in design space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub texture: SubTexture,
    /// Design-space position of the anchor point.
    pub position: [f32; 2],
    /// Design units per texture pixel.
    pub scale: f32,
    /// Anchor as a fraction of the sprite size; `[0, 0]` is the top-left.
    pub anchor: [f32; 2],
    pub tint: [f32; 4],
}

impl Sprite {
    /// Size in design units.
    pub fn size(&self) -> [f32; 2] {
        [
            self.texture.rect.w as f32 * self.scale,
            self.texture.rect.h as f32 * self.scale,
        ]
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Two triangles (TL, BL, TR, TR, BL, BR) in design space.
    pub fn vertices(&self) -> [SpriteVertex; 6] {
        let [w, h] = self.size();
        let x0 = self.position[0] - self.anchor[0] * w;
        let y0 = self.position[1] - self.anchor[1] * h;
        let (x1, y1) = (x0 + w, y0 + h);
        let (uv_min, uv_max) = (self.texture.uv_min, self.texture.uv_max);
        let tint = self.tint;

        let tl = SpriteVertex { position: [x0, y0], uv: uv_min, tint };
        let tr = SpriteVertex { position: [x1, y0], uv: [uv_max[0], uv_min[1]], tint };
        let bl = SpriteVertex { position: [x0, y1], uv: [uv_min[0], uv_max[1]], tint };
        let br = SpriteVertex { position: [x1, y1], uv: uv_max, tint };
        [tl, bl, tr, tr, bl, br]
    }
}

// ── SpriteBatch ──────────────────────────────────────────────────────────────

/// Consecutive sprites that sample the same atlas page.
#[derive(Debug, Default)]
pub struct SpriteBatch {
    pub page: usize,
    pub vertices: Vec<SpriteVertex>,
}

// ── RootContainer ────────────────────────────────────────────────────────────

/// Top of the scene: holds every sprite and the design → screen fit.
#[derive(Debug)]
pub struct RootContainer {
    design: DesignSize,
    fit: ViewportFit,
    children: Vec<Sprite>,
}

impl RootContainer {
    pub fn new(design: DesignSize) -> Self {
        Self { design, fit: ViewportFit::IDENTITY, children: Vec::new() }
    }

    pub fn design(&self) -> DesignSize {
        self.design
    }

    pub fn fit(&self) -> ViewportFit {
        self.fit
    }

    pub fn children(&self) -> &[Sprite] {
        &self.children
    }

    pub fn add_child(&mut self, sprite: Sprite) {
        self.children.push(sprite);
    }

    /// Refit the design space to a `screen_w × screen_h` surface.
    ///
    /// A zero-area surface (minimised window) leaves the previous fit in
    /// place and returns `false`.
    pub fn resize(&mut self, screen_w: f32, screen_h: f32) -> bool {
        if screen_w <= 0.0 || screen_h <= 0.0 {
            return false;
        }
        self.fit = ViewportFit::compute(self.design, screen_w, screen_h);
        tracing::debug!(
            scale = self.fit.scale,
            x = self.fit.offset_x,
            y = self.fit.offset_y,
            "refit root container"
        );
        true
    }

    /// Group child quads into per-page batches, keeping child order.
    pub fn batches(&self) -> Vec<SpriteBatch> {
        let mut batches: Vec<SpriteBatch> = Vec::new();
        for sprite in &self.children {
            let page = sprite.texture.page;
            match batches.last_mut() {
                Some(b) if b.page == page => b.vertices.extend_from_slice(&sprite.vertices()),
                _ => batches.push(SpriteBatch { page, vertices: sprite.vertices().to_vec() }),
            }
        }
        batches
    }
}

/// Fill every design cell with a board tile, cycling through the 3×3
/// `board-{row}{col}` set. Returns the number of sprites added.
pub fn populate_board(root: &mut RootContainer, atlas: &TileAtlas) -> Result<usize, AtlasError> {
    let (cols, rows) = root.design().cells();
    let mut count = 0usize;
    for x in 0..cols {
        for y in 0..rows {
            let name = format!("board-{}{}", y % 3, x % 3);
            let sprite = atlas.create_sprite(&name, [0.0, 0.0], WHITE)?;
            root.add_child(sprite.at(x as f32, y as f32));
            count += 1;
        }
    }
    Ok(count)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::TileRect;

    fn texture(page: usize) -> SubTexture {
        SubTexture {
            page,
            rect: TileRect { x: 16, y: 0, w: 16, h: 16 },
            uv_min: [0.25, 0.0],
            uv_max: [0.5, 0.25],
        }
    }

    fn sprite(page: usize) -> Sprite {
        Sprite { texture: texture(page), position: [0.0; 2], scale: 1.0 / 16.0, anchor: [0.0; 2], tint: WHITE }
    }

    #[test]
    fn quad_covers_one_design_unit() {
        let v = sprite(0).at(3.0, 4.0).vertices();
        assert_eq!(v[0].position, [3.0, 4.0]);
        assert_eq!(v[5].position, [4.0, 5.0]);
        assert_eq!(v[0].uv, [0.25, 0.0]);
        assert_eq!(v[5].uv, [0.5, 0.25]);
    }

    #[test]
    fn centre_anchor_shifts_quad() {
        let mut s = sprite(0).at(1.0, 1.0);
        s.anchor = [0.5, 0.5];
        let v = s.vertices();
        assert_eq!(v[0].position, [0.5, 0.5]);
        assert_eq!(v[5].position, [1.5, 1.5]);
    }

    #[test]
    fn batches_split_on_page_change_and_keep_order() {
        let mut root = RootContainer::new(DesignSize::new(3.0, 1.0).unwrap());
        root.add_child(sprite(0));
        root.add_child(sprite(0));
        root.add_child(sprite(1));
        root.add_child(sprite(0));
        let pages: Vec<_> = root.batches().iter().map(|b| (b.page, b.vertices.len())).collect();
        assert_eq!(pages, [(0, 12), (1, 6), (0, 6)]);
    }

    #[test]
    fn zero_area_resize_keeps_previous_fit() {
        let mut root = RootContainer::new(DesignSize::new(9.0, 9.0).unwrap());
        assert!(root.resize(1920.0, 1080.0));
        let before = root.fit();
        assert!(!root.resize(0.0, 1080.0));
        assert_eq!(root.fit(), before);
    }
}
