//! Exact-color substitution on template images.
//!
//! Template assets are painted in a single marker color. Repainting them
//! per card type is a pixel replace: a pixel whose RGB equals the marker
//! takes the target RGB, alpha stays as is. Anti-aliased edges carry other
//! RGB values and are left alone.

use image::{Rgb, RgbaImage};

/// Return a copy of `template` with every `marker` pixel painted `target`.
pub fn change_color(template: &RgbaImage, target: Rgb<u8>, marker: Rgb<u8>) -> RgbaImage {
    let mut out = template.clone();
    for px in out.pixels_mut() {
        if px.0[..3] == marker.0 {
            px.0[..3].copy_from_slice(&target.0);
        }
    }
    out
}

/// Like [`change_color`], but an absent color keeps the template unchanged.
pub fn recolor(template: &RgbaImage, target: Option<Rgb<u8>>, marker: Rgb<u8>) -> RgbaImage {
    match target {
        Some(color) => change_color(template, color, marker),
        None => template.clone(),
    }
}
