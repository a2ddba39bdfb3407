#![allow(dead_code)]

use std::path::Path;

use cardpress::{
    AssetConfig, Card, CardPress, CardType, Extension, FontSource, MemoryCatalog, PressConfig,
};
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

pub const CONTOUR_GRAY: Rgba<u8> = Rgba([32, 32, 32, 255]);
pub const SEPARATOR_GRAY: Rgba<u8> = Rgba([90, 90, 90, 255]);
pub const LOGO_BLUE: Rgba<u8> = Rgba([0, 0, 128, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// 400x400 transparent contour with a 6px marker-gray ring
pub fn contour() -> RgbaImage {
    RgbaImage::from_fn(400, 400, |x, y| {
        if x < 6 || y < 6 || x >= 394 || y >= 394 {
            CONTOUR_GRAY
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// 40x40 glyph: white opaque 20x20 core on transparent
pub fn glyph() -> RgbaImage {
    RgbaImage::from_fn(40, 40, |x, y| {
        if (10..30).contains(&x) && (10..30).contains(&y) {
            WHITE
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Write every template asset into `dir` under the default names
pub fn write_assets(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    contour().save(dir.join("Contour.png")).unwrap();
    RgbaImage::from_pixel(200, 4, SEPARATOR_GRAY)
        .save(dir.join("CardSeparator2X.png"))
        .unwrap();
    RgbaImage::from_pixel(60, 60, LOGO_BLUE)
        .save(dir.join("Logo2X.png"))
        .unwrap();
    glyph().save(dir.join("Difficulty10X.png")).unwrap();
}

/// Config rooted in `root`: assets in `root/assets`, output in `root/generated`
pub fn press_config(root: &Path) -> PressConfig {
    let assets_dir = root.join("assets");
    write_assets(&assets_dir);
    PressConfig {
        assets: AssetConfig {
            font: FontSource::Block,
            ..AssetConfig::in_dir(assets_dir)
        },
        ..Default::default()
    }
    .with_output_root(root.join("generated"))
}

pub fn card(id: u32, name: &str, difficulty: u32, card_type: u32) -> Card {
    Card {
        id,
        name: name.to_string(),
        description: String::new(),
        difficulty,
        card_type,
        extension: 1,
    }
}

/// Type 1 "Peril" (red), type 2 "Calm" (no color). Card 1 is "Run!\nFast"
/// with difficulty 3, the others alternate types.
pub fn catalog(card_ids: impl IntoIterator<Item = u32>) -> MemoryCatalog {
    let mut c = MemoryCatalog::new();
    c.create_type(CardType::new(1, "Peril", Some("#FF0000"))).unwrap();
    c.create_type(CardType::new(2, "Calm", None)).unwrap();
    c.create_extension(Extension { id: 1, name: "Base".into() }).unwrap();
    for id in card_ids {
        let card = if id == 1 {
            card(1, "Run!\\nFast", 3, 1)
        } else {
            card(id, &format!("Card {}", id), id % 4 + 1, 1 + id % 2)
        };
        c.create_card(card).unwrap();
    }
    c
}

pub fn press(card_ids: impl IntoIterator<Item = u32>) -> (TempDir, CardPress<MemoryCatalog>) {
    let dir = tempfile::tempdir().unwrap();
    let config = press_config(dir.path());
    let press = CardPress::new(config, catalog(card_ids)).unwrap();
    (dir, press)
}

pub fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

pub fn is_red(px: &Rgba<u8>) -> bool {
    px.0[0] > 200 && px.0[1] < 60 && px.0[2] < 60
}
