// Produces the tile sheet embedded as the default `tiles-01` atlas.
// A hand-drawn `resources/tiles-01.png` is embedded as-is; otherwise the
// placeholder sheet below is rendered. Output goes to OUT_DIR only.

use image::{Rgba, RgbaImage};
use std::error::Error;
use std::path::{Path, PathBuf};

const TILE: u32 = 16;

const BOARD_LIGHT: [u8; 4] = [0xE8, 0xD9, 0xB5, 0xFF];
const BOARD_DARK: [u8; 4] = [0xC9, 0xB2, 0x83, 0xFF];
const FRAME: [u8; 4] = [0x5A, 0x3E, 0x2B, 0xFF];
const INK: [u8; 4] = [0x30, 0x30, 0x38, 0xFF];
const WHITE: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

fn fill_tile(img: &mut RgbaImage, col: u32, row: u32, f: impl Fn(u32, u32) -> Option<[u8; 4]>) {
    for y in 0..TILE {
        for x in 0..TILE {
            if let Some(c) = f(x, y) {
                img.put_pixel(col * TILE + x, row * TILE + y, Rgba(c));
            }
        }
    }
}

fn disc(radius: f32, color: [u8; 4]) -> impl Fn(u32, u32) -> Option<[u8; 4]> {
    move |x: u32, y: u32| {
        let dx = x as f32 + 0.5 - TILE as f32 / 2.0;
        let dy = y as f32 + 0.5 - TILE as f32 / 2.0;
        (dx * dx + dy * dy <= radius * radius).then_some(color)
    }
}

fn draw_sheet() -> RgbaImage {
    let mut img = RgbaImage::new(256, 256);

    // Row 0: utility tiles.
    fill_tile(&mut img, 0, 0, |x, y| (x % 4 == 1 && y % 4 == 1).then_some(INK));
    fill_tile(&mut img, 1, 0, |x, _| (x < 3).then_some(INK));
    fill_tile(&mut img, 2, 0, |_, y| (y < 3).then_some(INK));
    fill_tile(&mut img, 3, 0, |x, _| (x >= TILE - 3).then_some(INK));
    fill_tile(&mut img, 4, 0, |_, y| (y >= TILE - 3).then_some(INK));
    fill_tile(&mut img, 5, 0, |_, _| Some(WHITE));
    // MISSINGTEX: magenta / black checker.
    fill_tile(&mut img, 6, 0, |x, y| {
        Some(if (x / 4 + y / 4) % 2 == 0 { [0xFF, 0x00, 0xFF, 0xFF] } else { [0, 0, 0, 0xFF] })
    });

    // Rows 1-3: 3×3 board pieces, framed on the outer edges.
    for r in 0..3u32 {
        for c in 0..3u32 {
            fill_tile(&mut img, c, r + 1, move |x, y| {
                let edge = (c == 0 && x < 2)
                    || (c == 2 && x >= TILE - 2)
                    || (r == 0 && y < 2)
                    || (r == 2 && y >= TILE - 2);
                Some(if edge {
                    FRAME
                } else if (r + c) % 2 == 0 {
                    BOARD_LIGHT
                } else {
                    BOARD_DARK
                })
            });
        }
    }

    // Row 4: big paint blobs. Row 5: small paint drops.
    fill_tile(&mut img, 0, 4, disc(7.0, [0xD6, 0x3C, 0x3C, 0xFF]));
    fill_tile(&mut img, 1, 4, disc(7.0, [0x3C, 0x7A, 0xD6, 0xFF]));
    let small = [
        [0xF2, 0xC1, 0x2E, 0xFF],
        [0x4C, 0xAF, 0x50, 0xFF],
        [0x9C, 0x4D, 0xCC, 0xFF],
        [0xF2, 0x84, 0x2E, 0xFF],
    ];
    for (i, color) in small.into_iter().enumerate() {
        fill_tile(&mut img, i as u32, 5, disc(3.5, color));
    }

    img
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=resources/tiles-01.png");

    let art = Path::new(env!("CARGO_MANIFEST_DIR")).join("resources").join("tiles-01.png");
    let out = PathBuf::from(std::env::var("OUT_DIR")?).join("tiles-01.png");
    if art.exists() {
        std::fs::copy(&art, &out)?;
    } else {
        draw_sheet().save(&out)?;
    }
    Ok(())
}
