//! Difficulty strip: one pip per difficulty point, painted in the type color.

use image::imageops::{self, FilterType};
use image::{Rgb, Rgba, RgbaImage};

use super::paint;
use super::remap::recolor;
use super::FACE_SIZE;
use crate::color::GLYPH_MARKER;
use crate::{Error, Result};

/// Extra width per glyph folded into the downscale target
const GLYPH_PADDING: u32 = 10;
/// Both axes are divided by this after tiling
const DOWNSCALE: u32 = 4;

/// Tile `difficulty` recolored glyphs side by side on a white canvas.
///
/// The result is `difficulty * glyph_width` wide, glyphs touching. Each
/// glyph is composited through its own alpha. Difficulties whose scaled
/// strip would not fit on a face are rejected before anything is allocated.
pub fn tile_glyphs(glyph: &RgbaImage, difficulty: u32, color: Option<Rgb<u8>>) -> Result<RgbaImage> {
    strip_size(glyph.dimensions(), difficulty)?;
    let glyph = recolor(glyph, color, GLYPH_MARKER);
    let (w, h) = glyph.dimensions();
    let width = w
        .checked_mul(difficulty)
        .ok_or_else(|| too_wide(difficulty))?;
    let mut strip = RgbaImage::from_pixel(width, h, Rgba([255, 255, 255, 255]));
    for i in 0..difficulty {
        paint::paste_masked(&mut strip, &glyph, (w * i) as i64, 0);
    }
    Ok(strip)
}

/// Size of the scaled strip for a glyph of `glyph_size` and `difficulty` pips.
///
/// Fails for a zero difficulty and for strips wider than a card face.
pub fn strip_size(glyph_size: (u32, u32), difficulty: u32) -> Result<(u32, u32)> {
    if difficulty == 0 {
        return Err(Error::InvalidInput("difficulty must be at least 1".into()));
    }
    let (w, h) = glyph_size;
    let width = w
        .saturating_add(GLYPH_PADDING)
        .checked_mul(difficulty)
        .map(|padded| padded / DOWNSCALE)
        .filter(|&width| width <= FACE_SIZE)
        .ok_or_else(|| too_wide(difficulty))?;
    Ok((width.max(1), (h / DOWNSCALE).max(1)))
}

fn too_wide(difficulty: u32) -> Error {
    Error::InvalidInput(format!(
        "difficulty {} does not fit on a {}px face",
        difficulty, FACE_SIZE
    ))
}

/// Build the difficulty strip pasted on card faces.
///
/// The tiled strip is resized to `((glyph_w + 10) * d / 4, glyph_h / 4)`.
pub fn generate_difficulty(glyph: &RgbaImage, difficulty: u32, color: Option<Rgb<u8>>) -> Result<RgbaImage> {
    let tiled = tile_glyphs(glyph, difficulty, color)?;
    let (width, height) = strip_size(glyph.dimensions(), difficulty)?;
    Ok(imageops::resize(&tiled, width, height, FilterType::CatmullRom))
}
