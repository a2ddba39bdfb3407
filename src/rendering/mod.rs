//! Card face rendering
//!
//! Everything here works on `image::RgbaImage` buffers. Faces are opaque
//! 400x400 canvases; only the template assets carry meaningful alpha.

pub mod assets;
pub mod difficulty;
pub mod face;
pub mod layout;
pub mod paint;
pub mod raster;
pub mod remap;
pub mod text;

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use sha2::{Digest, Sha256};

use crate::{Error, Result};

pub use assets::Assets;
pub use difficulty::generate_difficulty;
pub use face::{generate_recto_card, generate_verso_card, render_face};
pub use layout::SheetLayout;
pub use remap::change_color;

/// Side length of a rendered card face, in pixels
pub const FACE_SIZE: u32 = 400;

/// Which side of a card to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Recto,
    Verso,
}

impl Face {
    pub const ALL: [Face; 2] = [Face::Recto, Face::Verso];

    /// Numeric index used in cache file names (`0` recto, `1` verso)
    pub fn index(self) -> u8 {
        match self {
            Face::Recto => 0,
            Face::Verso => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Face::Recto => "recto",
            Face::Verso => "verso",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Face {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recto" | "front" | "0" => Ok(Face::Recto),
            "verso" | "back" | "1" => Ok(Face::Verso),
            other => Err(Error::InvalidInput(format!("unknown face {:?}", other))),
        }
    }
}

/// One rendered side of one card
#[derive(Debug, Clone)]
pub struct RenderedFace {
    pub face: Face,
    pub image: RgbaImage,
}

impl RenderedFace {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encode as an RGB PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        raster::encode_png(&self.image)
    }

    /// SHA-256 of the raw pixel buffer, hex encoded.
    ///
    /// Unlike the PNG bytes this does not depend on encoder settings, so it
    /// is what golden tests compare.
    pub fn fingerprint(&self) -> String {
        pixel_fingerprint(&self.image)
    }
}

pub(crate) fn pixel_fingerprint(image: &RgbaImage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.width().to_be_bytes());
    hasher.update(image.height().to_be_bytes());
    hasher.update(image.as_raw());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_parsing_accepts_names_and_indices() {
        assert_eq!("recto".parse::<Face>().unwrap(), Face::Recto);
        assert_eq!("1".parse::<Face>().unwrap(), Face::Verso);
        assert_eq!(" VERSO ".parse::<Face>().unwrap(), Face::Verso);
        assert!("side".parse::<Face>().is_err());
        assert_eq!(Face::Verso.index(), 1);
        assert_eq!(Face::Recto.to_string(), "recto");
    }

    #[test]
    fn fingerprint_tracks_pixels() {
        let a = RenderedFace { face: Face::Recto, image: RgbaImage::new(4, 4) };
        let mut b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.image.put_pixel(1, 1, image::Rgba([1, 0, 0, 255]));
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
