/// Compositing primitives shared by faces, strips and sheets.
///
/// Offsets are signed so callers can center things that end up wider than
/// the canvas; anything outside the canvas is clipped.

use image::{Rgba, RgbaImage};

/// Copy `over` onto `base` at `(x, y)`, replacing all four channels.
pub fn paste(base: &mut RgbaImage, over: &RgbaImage, x: i64, y: i64) {
    for_each_overlap(base, over, x, y, |dst, src| *dst = *src);
}

/// Composite `over` onto `base` at `(x, y)` using `over`'s alpha as the mask.
pub fn paste_masked(base: &mut RgbaImage, over: &RgbaImage, x: i64, y: i64) {
    for_each_overlap(base, over, x, y, |dst, src| blend(dst, *src));
}

/// Blend a single source pixel over `dst`
pub fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let a = src.0[3] as u32;
    if a == 0 {
        return;
    }
    if a == 255 {
        *dst = src;
        return;
    }
    let inv = 255 - a;
    for c in 0..3 {
        dst.0[c] = ((src.0[c] as u32 * a + dst.0[c] as u32 * inv + 127) / 255) as u8;
    }
    dst.0[3] = (a + (dst.0[3] as u32 * inv + 127) / 255) as u8;
}

/// Fill a rectangle, clipped to the canvas
pub fn fill_rect(base: &mut RgbaImage, x: i64, y: i64, width: u32, height: u32, color: Rgba<u8>) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + width as i64).min(base.width() as i64);
    let y1 = (y + height as i64).min(base.height() as i64);
    for py in y0..y1 {
        for px in x0..x1 {
            blend(base.get_pixel_mut(px as u32, py as u32), color);
        }
    }
}

fn for_each_overlap<F>(base: &mut RgbaImage, over: &RgbaImage, x: i64, y: i64, mut f: F)
where
    F: FnMut(&mut Rgba<u8>, &Rgba<u8>),
{
    let (bw, bh) = (base.width() as i64, base.height() as i64);
    for oy in 0..over.height() {
        let by = y + oy as i64;
        if by < 0 || by >= bh {
            continue;
        }
        for ox in 0..over.width() {
            let bx = x + ox as i64;
            if bx < 0 || bx >= bw {
                continue;
            }
            f(base.get_pixel_mut(bx as u32, by as u32), over.get_pixel(ox, oy));
        }
    }
}
