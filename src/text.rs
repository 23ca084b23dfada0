//! Text layout on top of the glyph rasterizer.
//!
//! The font is fixed width: every character, drawable or not, advances the
//! cursor by `8 * scale`. No kerning and no wrapping.

use crate::canvas::PixelBuffer;
use crate::font::{stamp_glyph, GLYPH_WIDTH};

/// Marker appended to shortened strings.
pub const ELLIPSIS: &str = "...";

/// Width in pixels of `text` at `scale`, saturating at `i32::MAX`.
pub fn measure_width(text: &str, scale: i32) -> i32 {
    let count = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
    count.saturating_mul(GLYPH_WIDTH).saturating_mul(scale)
}

/// Draw `text` starting at `(x, y)`.
pub fn draw_left(buffer: &mut PixelBuffer, x: i32, y: i32, text: &str, level: u8, scale: i32) {
    let advance = GLYPH_WIDTH.saturating_mul(scale);
    let mut pen = x;
    for ch in text.chars() {
        if advance > 0 && pen >= buffer.width() as i32 {
            break;
        }
        stamp_glyph(buffer, pen, y, ch, level, scale);
        pen = pen.saturating_add(advance);
    }
}

/// Draw `text` horizontally centred on the canvas. A fractional offset is
/// floored.
pub fn draw_centered(buffer: &mut PixelBuffer, y: i32, text: &str, level: u8, scale: i32) {
    let x = (buffer.width() as i32)
        .saturating_sub(measure_width(text, scale))
        .div_euclid(2);
    draw_left(buffer, x, y, text, level, scale);
}

/// Draw `text` so it ends `right_margin` pixels from the right edge.
pub fn draw_right_aligned(
    buffer: &mut PixelBuffer,
    y: i32,
    text: &str,
    level: u8,
    scale: i32,
    right_margin: i32,
) {
    let x = (buffer.width() as i32)
        .saturating_sub(right_margin)
        .saturating_sub(measure_width(text, scale));
    draw_left(buffer, x, y, text, level, scale);
}

/// Shorten `text` until it is at most `max_width` pixels wide at `scale`.
///
/// The result is what repeatedly dropping the last four characters and
/// appending [`ELLIPSIS`] produces: the longest prefix that fits together
/// with the ellipsis. Strings of three characters or fewer are returned as
/// they are even if they still overflow.
pub fn truncate_to_width(text: &str, scale: i32, max_width: i32) -> String {
    let count = text.chars().count();
    let pitch = i128::from(GLYPH_WIDTH) * i128::from(scale);
    if count <= ELLIPSIS.len() || count as i128 * pitch <= i128::from(max_width) {
        return text.to_string();
    }

    let fitting = i128::from(max_width.max(0)) / pitch.max(1);
    let keep = (fitting as usize).max(ELLIPSIS.len()) - ELLIPSIS.len();
    text.chars().take(keep).chain(ELLIPSIS.chars()).collect()
}
