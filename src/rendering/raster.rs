/// Encoders for rendered faces (PNG) and print sheets (CMYK JPEG)

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use jpeg_encoder::{ColorType, Encoder};

use crate::{Error, Result};

/// Encode an image as an RGB PNG, dropping alpha
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut out = Cursor::new(Vec::new());
    PngEncoder::new(&mut out).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(out.into_inner())
}

/// Naive RGB to CMYK conversion: `C = 255 - R`, `M = 255 - G`,
/// `Y = 255 - B`, `K = 0`. Alpha is discarded.
pub fn rgba_to_cmyk(image: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.width() as usize * image.height() as usize * 4);
    for px in image.pixels() {
        out.extend_from_slice(&[255 - px.0[0], 255 - px.0[1], 255 - px.0[2], 0]);
    }
    out
}

/// Convert to CMYK and encode as a JPEG
pub fn encode_cmyk_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let width = u16::try_from(image.width())
        .map_err(|_| Error::Encode(format!("sheet width {} too large for JPEG", image.width())))?;
    let height = u16::try_from(image.height())
        .map_err(|_| Error::Encode(format!("sheet height {} too large for JPEG", image.height())))?;
    let cmyk = rgba_to_cmyk(image);
    let mut out = Vec::new();
    Encoder::new(&mut out, quality)
        .encode(&cmyk, width, height, ColorType::Cmyk)
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(out)
}
