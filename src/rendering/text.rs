//! Text measurement and drawing
//!
//! Faces lay text out with a [`Typeface`]. Measurements are taken on the
//! actual string at every render, which is what keeps variable length type
//! names centered.
//!
//! Two typefaces ship with the crate:
//! - [`TrueTypeFace`] renders a TTF/OTF font through `rusttype` (feature
//!   `truetype`, on by default)
//! - [`BlockFace`] draws every visible character as a solid cell. It has no
//!   font file, which makes it useful for previews and for tests that need
//!   to locate text on a canvas.

use std::collections::VecDeque;

use image::{Rgba, RgbaImage};

/// Extra pixels between two lines of multi-line text
pub const LINE_SPACING: u32 = 4;

/// Measures and draws single lines of text
pub trait Typeface: std::fmt::Debug + Send + Sync {
    /// Width of `line` rendered at `px`
    fn line_width(&self, px: f32, line: &str) -> u32;

    /// Height of one line at `px` (ascent to descent)
    fn line_height(&self, px: f32) -> u32;

    /// Draw `line` with its top-left corner at `(x, y)`
    fn draw_line(&self, canvas: &mut RgbaImage, px: f32, x: i32, y: i32, color: Rgba<u8>, line: &str);
}

/// Size of a laid out block of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBox {
    pub width: u32,
    pub height: u32,
    pub lines: usize,
}

/// Measure possibly multi-line text
pub fn measure(face: &dyn Typeface, px: f32, text: &str) -> TextBox {
    let lines: Vec<&str> = text.split('\n').collect();
    let width = lines
        .iter()
        .map(|l| face.line_width(px, l))
        .max()
        .unwrap_or(0);
    let n = lines.len() as u32;
    TextBox {
        width,
        height: n * face.line_height(px) + n.saturating_sub(1) * LINE_SPACING,
        lines: lines.len(),
    }
}

/// Draw possibly multi-line text, left aligned, top-left at `(x, y)`
pub fn draw(face: &dyn Typeface, canvas: &mut RgbaImage, px: f32, x: i32, y: i32, color: Rgba<u8>, text: &str) {
    let step = (face.line_height(px) + LINE_SPACING) as i32;
    for (i, line) in text.split('\n').enumerate() {
        face.draw_line(canvas, px, x, y + i as i32 * step, color, line);
    }
}

/// Split every line of `text` until each piece is narrower than `max_width`.
///
/// A line that is too wide is cut at its character midpoint and both halves
/// are examined again, left half first. Cuts do not look for word
/// boundaries. A single character is never split further.
pub fn wrap_to_width(face: &dyn Typeface, px: f32, text: &str, max_width: u32) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let mut pending: VecDeque<String> = VecDeque::from([line.to_string()]);
        while let Some(segment) = pending.pop_front() {
            let chars = segment.chars().count();
            if chars <= 1 || face.line_width(px, &segment) < max_width {
                let trimmed = segment.trim();
                if !trimmed.is_empty() || chars == 0 {
                    out.push(trimmed.to_string());
                }
                continue;
            }
            let mid = segment
                .char_indices()
                .nth(chars / 2)
                .map(|(i, _)| i)
                .unwrap_or(segment.len());
            let (left, right) = segment.split_at(mid);
            pending.push_front(right.to_string());
            pending.push_front(left.to_string());
        }
    }
    out.join("\n")
}

/// Fixed-cell typeface: every non-whitespace character is a filled block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockFace {
    /// Cell advance as a fraction of the pixel size
    pub advance: f32,
}

impl Default for BlockFace {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl BlockFace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal advance of one character cell
    pub fn cell_width(&self, px: f32) -> u32 {
        ((px * self.advance).round() as u32).max(1)
    }
}

impl Typeface for BlockFace {
    fn line_width(&self, px: f32, line: &str) -> u32 {
        line.chars().count() as u32 * self.cell_width(px)
    }

    fn line_height(&self, px: f32) -> u32 {
        (px.round() as u32).max(1)
    }

    fn draw_line(&self, canvas: &mut RgbaImage, px: f32, x: i32, y: i32, color: Rgba<u8>, line: &str) {
        let cell = self.cell_width(px);
        let ink = cell.saturating_sub(2).max(1);
        let height = self.line_height(px);
        for (i, ch) in line.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let cx = x as i64 + (i as u32 * cell) as i64 + 1;
            super::paint::fill_rect(canvas, cx, y as i64, ink, height, color);
        }
    }
}

#[cfg(feature = "truetype")]
pub use truetype::TrueTypeFace;

#[cfg(feature = "truetype")]
mod truetype {
    use image::{Rgba, RgbaImage};
    use rusttype::{point, Font, Scale};

    use super::Typeface;

    /// A TrueType/OpenType font rendered with `rusttype`
    pub struct TrueTypeFace {
        font: Font<'static>,
    }

    impl TrueTypeFace {
        /// Parse font bytes; `None` if they are not a usable font
        pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
            Font::try_from_vec(bytes).map(|font| Self { font })
        }
    }

    impl std::fmt::Debug for TrueTypeFace {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("TrueTypeFace")
                .field("glyphs", &self.font.glyph_count())
                .finish()
        }
    }

    impl Typeface for TrueTypeFace {
        fn line_width(&self, px: f32, line: &str) -> u32 {
            if line.is_empty() {
                return 0;
            }
            let scale = Scale::uniform(px);
            let ascent = self.font.v_metrics(scale).ascent;
            let mut width: f32 = 0.0;
            for g in self.font.layout(line, scale, point(0.0, ascent)) {
                if let Some(bb) = g.pixel_bounding_box() {
                    width = width.max(bb.max.x as f32);
                }
                width = width.max(g.position().x + g.unpositioned().h_metrics().advance_width);
            }
            width.ceil() as u32
        }

        fn line_height(&self, px: f32) -> u32 {
            let vm = self.font.v_metrics(Scale::uniform(px));
            (vm.ascent - vm.descent).ceil().max(1.0) as u32
        }

        fn draw_line(&self, canvas: &mut RgbaImage, px: f32, x: i32, y: i32, color: Rgba<u8>, line: &str) {
            let scale = Scale::uniform(px);
            let ascent = self.font.v_metrics(scale).ascent;
            let origin = point(x as f32, y as f32 + ascent);
            for glyph in self.font.layout(line, scale, origin) {
                let Some(bb) = glyph.pixel_bounding_box() else {
                    continue;
                };
                glyph.draw(|gx, gy, coverage| {
                    let cx = gx as i32 + bb.min.x;
                    let cy = gy as i32 + bb.min.y;
                    if cx < 0 || cy < 0 || cx as u32 >= canvas.width() || cy as u32 >= canvas.height() {
                        return;
                    }
                    let a = (coverage * color.0[3] as f32).round() as u8;
                    if a == 0 {
                        return;
                    }
                    let src = Rgba([color.0[0], color.0[1], color.0[2], a]);
                    super::super::paint::blend(canvas.get_pixel_mut(cx as u32, cy as u32), src);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn block_face_measures_cells() {
        let face = BlockFace::new();
        // 29 * 0.6 = 17.4 -> 17
        assert_eq!(face.cell_width(29.0), 17);
        assert_eq!(face.line_width(29.0, "Fast"), 68);
        assert_eq!(face.line_height(29.0), 29);
    }

    #[test]
    fn multi_line_height_grows_with_lines() {
        let face = BlockFace::new();
        let one = measure(&face, 29.0, "Run!");
        let two = measure(&face, 29.0, "Run!\nFast");
        assert_eq!(one.lines, 1);
        assert_eq!(two.lines, 2);
        assert_eq!(one.height, 29);
        assert_eq!(two.height, 2 * 29 + LINE_SPACING);
    }

    #[test]
    fn block_face_leaves_spaces_blank() {
        let face = BlockFace::new();
        let mut canvas = RgbaImage::from_pixel(40, 12, Rgba([255, 255, 255, 255]));
        draw(&face, &mut canvas, 10.0, 0, 0, BLACK, "a b");
        // cells are 6px wide, ink from x+1 to x+4
        assert_eq!(canvas.get_pixel(1, 5), &BLACK);
        assert_eq!(canvas.get_pixel(8, 5), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.get_pixel(13, 5), &BLACK);
    }

    #[test]
    fn bisection_wraps_until_lines_fit() {
        let face = BlockFace::new();
        // 10px cells: 6px each, limit 30px fits at most 4 characters
        let wrapped = wrap_to_width(&face, 10.0, "abcdefgh", 30);
        assert_eq!(wrapped, "abcd\nefgh");
        let wrapped = wrap_to_width(&face, 10.0, "abcdefghijkl", 30);
        assert_eq!(wrapped, "abc\ndef\nghi\njkl");
        for line in wrapped.lines() {
            assert!(face.line_width(10.0, line) < 30);
        }
    }

    #[test]
    fn bisection_keeps_short_lines_and_breaks() {
        let face = BlockFace::new();
        assert_eq!(wrap_to_width(&face, 10.0, "ab\ncd", 30), "ab\ncd");
        assert_eq!(wrap_to_width(&face, 10.0, "", 30), "");
    }

    #[cfg(feature = "truetype")]
    mod truetype_face {
        use super::*;

        const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

        fn mono() -> TrueTypeFace {
            let bytes = include_bytes!("../../tests/fonts/DejaVuSansMono.ttf");
            TrueTypeFace::from_bytes(bytes.to_vec()).expect("fixture font")
        }

        /// Bounding box of every non-white pixel, `None` on a blank canvas
        fn ink_bounds(canvas: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
            let mut bounds: Option<(u32, u32, u32, u32)> = None;
            for (x, y, p) in canvas.enumerate_pixels() {
                if *p == WHITE {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
            bounds
        }

        #[test]
        fn rejects_bytes_that_are_not_a_font() {
            assert!(TrueTypeFace::from_bytes(b"not a font".to_vec()).is_none());
        }

        #[test]
        fn width_grows_with_text() {
            let face = mono();
            let one = face.line_width(29.0, "a");
            let two = face.line_width(29.0, "aa");
            let four = face.line_width(29.0, "aaaa");
            assert!(0 < one && one < two && two < four, "{} {} {}", one, two, four);
            // monospace advance is 1233/2384 of the pixel size
            assert!((58..=62).contains(&four), "{}", four);
            assert_eq!(face.line_width(29.0, "iiii"), face.line_width(29.0, "mmmm"));
            assert_eq!(face.line_width(29.0, ""), 0);
        }

        #[test]
        fn two_lines_are_twice_as_tall() {
            let face = mono();
            let height = face.line_height(29.0);
            assert!((29..=30).contains(&height), "{}", height);
            let one = measure(&face, 29.0, "Run!");
            let two = measure(&face, 29.0, "Run!\nFast");
            assert_eq!(one.height, height);
            assert_eq!(two.height, 2 * height + LINE_SPACING);
            assert_eq!(two.width, face.line_width(29.0, "Fast").max(one.width));
        }

        #[test]
        fn centered_title_inks_inside_its_box() {
            let face = mono();
            let title = measure(&face, 34.0, "Peril");
            let x = (400 - title.width as i32) / 2;
            let mut canvas = RgbaImage::from_pixel(400, 400, WHITE);
            draw(&face, &mut canvas, 34.0, x, 20, BLACK, "Peril");

            let (x0, y0, x1, y1) = ink_bounds(&canvas).expect("title drew nothing");
            assert!(x0 as i32 >= x - 1 && x1 as i32 <= x + title.width as i32, "{} {}", x0, x1);
            assert!(y0 >= 20 && y1 <= 20 + title.height, "{} {}", y0, y1);
            let center = (x0 + x1) / 2;
            assert!((190..=210).contains(&center), "{}", center);
        }

        #[test]
        fn drawing_off_canvas_is_clipped() {
            let face = mono();
            let mut canvas = RgbaImage::from_pixel(20, 20, WHITE);
            draw(&face, &mut canvas, 29.0, -10, -10, BLACK, "Wg");
            assert!(ink_bounds(&canvas).is_some());
        }
    }
}
