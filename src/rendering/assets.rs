//! Template assets
//!
//! All assets are read once when a press is built. A missing or unreadable
//! file is reported as [`Error::Asset`], which callers treat as fatal.

use std::fmt;
use std::path::Path;

use image::RgbaImage;
use log::debug;

use super::text::{BlockFace, Typeface};
use crate::config::{AssetConfig, FontSource};
use crate::{Error, Result};

/// Decoded template images and the typeface used for card text
pub struct Assets {
    pub contour: RgbaImage,
    pub separator: RgbaImage,
    pub logo: RgbaImage,
    pub difficulty_glyph: RgbaImage,
    pub typeface: Box<dyn Typeface>,
}

impl Assets {
    /// Build from already decoded parts
    pub fn new(
        contour: RgbaImage,
        separator: RgbaImage,
        logo: RgbaImage,
        difficulty_glyph: RgbaImage,
        typeface: Box<dyn Typeface>,
    ) -> Self {
        Self {
            contour,
            separator,
            logo,
            difficulty_glyph,
            typeface,
        }
    }

    /// Load every asset named by `config`
    pub fn load(config: &AssetConfig) -> Result<Self> {
        let contour = load_image(&config.resolve(&config.contour))?;
        let separator = load_image(&config.resolve(&config.separator))?;
        let logo = load_image(&config.resolve(&config.logo))?;
        let difficulty_glyph = load_image(&config.resolve(&config.difficulty_glyph))?;
        let difficulty_glyph_size = difficulty_glyph.dimensions();
        if difficulty_glyph_size.0 == 0 || difficulty_glyph_size.1 == 0 {
            return Err(Error::asset(
                config.resolve(&config.difficulty_glyph),
                "difficulty glyph is empty",
            ));
        }
        let typeface = load_typeface(config)?;
        debug!(
            "Loaded card assets from {} (contour {:?}, glyph {:?})",
            config.assets_dir.display(),
            contour.dimensions(),
            difficulty_glyph_size
        );
        Ok(Self::new(contour, separator, logo, difficulty_glyph, typeface))
    }
}

impl fmt::Debug for Assets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assets")
            .field("contour", &self.contour.dimensions())
            .field("separator", &self.separator.dimensions())
            .field("logo", &self.logo.dimensions())
            .field("difficulty_glyph", &self.difficulty_glyph.dimensions())
            .field("typeface", &self.typeface)
            .finish()
    }
}

fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| Error::asset(path, e))?;
    Ok(img.to_rgba8())
}

fn load_typeface(config: &AssetConfig) -> Result<Box<dyn Typeface>> {
    match &config.font {
        FontSource::Block => Ok(Box::new(BlockFace::new())),
        FontSource::TrueType { path } => load_truetype(&config.resolve(path)),
    }
}

#[cfg(feature = "truetype")]
fn load_truetype(path: &Path) -> Result<Box<dyn Typeface>> {
    let bytes = std::fs::read(path).map_err(|e| Error::asset(path, e))?;
    let face = super::text::TrueTypeFace::from_bytes(bytes)
        .ok_or_else(|| Error::asset(path, "not a TrueType/OpenType font"))?;
    Ok(Box::new(face))
}

#[cfg(not(feature = "truetype"))]
fn load_truetype(_path: &Path) -> Result<Box<dyn Typeface>> {
    Err(Error::Config(
        "TrueType fonts need the `truetype` feature; use `kind = \"block\"`".into(),
    ))
}
