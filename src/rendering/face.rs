//! Recto and verso card faces
//!
//! Both faces start from the same "type card": a white 400x400 canvas with
//! the contour, repainted in the type color, composited at the origin.
//! Everything placed afterwards is positioned from measured sizes, so type
//! and card names of any length stay centered.

use image::imageops::{self, FilterType};
use image::{Rgb, Rgba, RgbaImage};
use log::debug;

use super::assets::Assets;
use super::difficulty::generate_difficulty;
use super::paint;
use super::remap::recolor;
use super::text;
use super::{Face, RenderedFace, FACE_SIZE};
use crate::catalog::{Card, CardType};
use crate::color::CONTOUR_MARKER;
use crate::Result;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

// recto
const TITLE_PX: f32 = 34.0;
const TITLE_TOP: i32 = 20;
const SEPARATOR_EXTRA_WIDTH: u32 = 45;
const SEPARATOR_TOP: i32 = 25;
const SEPARATOR_GAP: i32 = 30;
const NAME_PX: f32 = 29.0;
const NAME_ORIGIN: (i32, i32) = (50, 85);
const NAME_MARGIN: u32 = 100;
const RECTO_STRIP_BOTTOM: i32 = 20;

// verso
const LOGO_LEFT: i32 = 15;
const VERSO_TITLE_PX: f32 = 45.0;
const VERSO_TITLE_LIFT: i32 = 20;
const VERSO_STRIP_BOTTOM: i32 = FACE_SIZE as i32 / 4;

const STRIP_LEFT: i32 = FACE_SIZE as i32 / 5 + 20;

/// White canvas with the recolored contour
pub fn generate_type_card(assets: &Assets, color: Option<Rgb<u8>>) -> RgbaImage {
    let mut card = RgbaImage::from_pixel(FACE_SIZE, FACE_SIZE, PAPER);
    let contour = recolor(&assets.contour, color, CONTOUR_MARKER);
    paint::paste_masked(&mut card, &contour, 0, 0);
    card
}

/// Front of a card: type name, separator, card name, difficulty
pub fn generate_recto_card(assets: &Assets, card: &Card, card_type: &CardType) -> Result<RenderedFace> {
    let color = card_type.rgb()?;
    let strip = generate_difficulty(&assets.difficulty_glyph, card.difficulty, color)?;
    let mut canvas = generate_type_card(assets, color);
    let face = assets.typeface.as_ref();
    let size = FACE_SIZE as i32;

    let title = text::measure(face, TITLE_PX, &card_type.name);
    text::draw(
        face,
        &mut canvas,
        TITLE_PX,
        (size - title.width as i32) / 2,
        TITLE_TOP,
        INK,
        &card_type.name,
    );

    let (sep_w, sep_h) = assets.separator.dimensions();
    let separator = imageops::resize(
        &assets.separator,
        sep_w + SEPARATOR_EXTRA_WIDTH,
        sep_h.max(1),
        FilterType::CatmullRom,
    );
    let sep_x = size / 2 - separator.width() as i32 / 2;
    let sep_y = SEPARATOR_TOP + separator.height() as i32 + SEPARATOR_GAP;
    paint::paste_masked(&mut canvas, &separator, sep_x as i64, sep_y as i64);

    let name = text::wrap_to_width(face, NAME_PX, &card.display_name(), FACE_SIZE - NAME_MARGIN);
    text::draw(face, &mut canvas, NAME_PX, NAME_ORIGIN.0, NAME_ORIGIN.1, INK, &name);

    let strip_y = size - strip.height() as i32 - RECTO_STRIP_BOTTOM;
    paint::paste(&mut canvas, &strip, STRIP_LEFT as i64, strip_y as i64);

    debug!(
        "Rendered recto for card {} ({} line(s), difficulty {})",
        card.id,
        name.lines().count(),
        card.difficulty
    );
    Ok(RenderedFace { face: Face::Recto, image: canvas })
}

/// Back of a card: logo, type name, difficulty
pub fn generate_verso_card(assets: &Assets, card: &Card, card_type: &CardType) -> Result<RenderedFace> {
    let color = card_type.rgb()?;
    let strip = generate_difficulty(&assets.difficulty_glyph, card.difficulty, color)?;
    let mut canvas = generate_type_card(assets, color);
    let face = assets.typeface.as_ref();
    let size = FACE_SIZE as i32;

    let logo_y = (size - assets.logo.height() as i32) / 2;
    paint::paste_masked(&mut canvas, &assets.logo, LOGO_LEFT as i64, logo_y as i64);

    let title = text::measure(face, VERSO_TITLE_PX, &card_type.name);
    let x = (size - title.width as i32) / 2;
    let y = (size - title.height as i32) / 3 - VERSO_TITLE_LIFT;
    text::draw(face, &mut canvas, VERSO_TITLE_PX, x, y, INK, &card_type.name);

    let strip_y = size - strip.height() as i32 - VERSO_STRIP_BOTTOM;
    paint::paste(&mut canvas, &strip, STRIP_LEFT as i64, strip_y as i64);

    debug!("Rendered verso for card {} (type {})", card.id, card_type.name);
    Ok(RenderedFace { face: Face::Verso, image: canvas })
}

/// Render the requested face
pub fn render_face(assets: &Assets, card: &Card, card_type: &CardType, face: Face) -> Result<RenderedFace> {
    match face {
        Face::Recto => generate_recto_card(assets, card, card_type),
        Face::Verso => generate_verso_card(assets, card, card_type),
    }
}
