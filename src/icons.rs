//! Weather icons
//!
//! Each icon is drawn from shape primitives inside a 48×48 footprint whose
//! top-left corner is the origin passed in. Icons only ever see the numeric
//! WMO condition code.

use crate::canvas::{ink, PixelBuffer};
use crate::font::stamp_glyph;
use crate::shapes::{draw_line, fill_rect, stamp_arc, stamp_circle};

/// Side length of the square icon footprint.
pub const ICON_SIZE: i32 = 48;

/// The seven icon renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconKind {
    Sun,
    Cloud,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl IconKind {
    /// Map a WMO weather code to its icon. Unlisted and negative codes map
    /// to [`IconKind::Unknown`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0..=1 => IconKind::Sun,
            2..=3 => IconKind::Cloud,
            45..=48 => IconKind::Fog,
            51..=67 | 80..=82 => IconKind::Rain,
            71..=77 | 85..=86 => IconKind::Snow,
            95.. => IconKind::Thunderstorm,
            _ => IconKind::Unknown,
        }
    }
}

/// Draw the icon for `code` with its footprint at `(x, y)`.
pub fn draw_icon(buffer: &mut PixelBuffer, x: i32, y: i32, code: i32) {
    draw_kind(buffer, x, y, IconKind::from_code(code));
}

/// Draw a specific icon with its footprint at `(x, y)`.
pub fn draw_kind(buffer: &mut PixelBuffer, x: i32, y: i32, kind: IconKind) {
    match kind {
        IconKind::Sun => draw_sun(buffer, x, y),
        IconKind::Cloud => draw_cloud(buffer, x, y + 6),
        IconKind::Fog => draw_fog(buffer, x, y),
        IconKind::Rain => {
            draw_cloud(buffer, x, y);
            draw_rain(buffer, x, y);
        }
        IconKind::Snow => {
            draw_cloud(buffer, x, y);
            draw_snow(buffer, x, y);
        }
        IconKind::Thunderstorm => {
            draw_cloud(buffer, x, y);
            draw_bolt(buffer, x, y);
        }
        IconKind::Unknown => draw_unknown(buffer, x, y),
    }
}

fn draw_sun(buffer: &mut PixelBuffer, x: i32, y: i32) {
    let center = (x + 24, y + 24);
    stamp_circle(buffer, center, 10, 3, ink::BLACK);

    // Eight rays, starting past the disc edge
    for i in 0..8 {
        let theta = (i as f32 * 45.0).to_radians();
        let (dx, dy) = (theta.cos(), theta.sin());
        let from = (
            center.0 + (14.0 * dx).round() as i32,
            center.1 + (14.0 * dy).round() as i32,
        );
        let to = (
            center.0 + (21.0 * dx).round() as i32,
            center.1 + (21.0 * dy).round() as i32,
        );
        draw_line(buffer, from, to, 2, ink::BLACK);
    }
}

/// Cloud body: three overlapping upper arcs over a flat base. Occupies
/// rows 8..36 of the footprint, leaving room for precipitation below.
fn draw_cloud(buffer: &mut PixelBuffer, x: i32, y: i32) {
    stamp_arc(buffer, (x + 14, y + 26), 9, (90, 270), 2, ink::BLACK);
    stamp_arc(buffer, (x + 25, y + 20), 12, (180, 360), 2, ink::BLACK);
    stamp_arc(buffer, (x + 35, y + 26), 9, (270, 450), 2, ink::BLACK);
    fill_rect(buffer, x + 14, y + 34, 22, 2, ink::BLACK);
}

fn draw_fog(buffer: &mut PixelBuffer, x: i32, y: i32) {
    for band in 0..4 {
        let indent = if band % 2 == 0 { 4 } else { 10 };
        fill_rect(buffer, x + indent, y + 10 + band * 8, 34, 3, ink::BLACK);
    }
}

fn draw_rain(buffer: &mut PixelBuffer, x: i32, y: i32) {
    for dx in [14, 24, 34] {
        draw_line(buffer, (x + dx, y + 39), (x + dx - 2, y + 45), 2, ink::BLACK);
    }
}

fn draw_snow(buffer: &mut PixelBuffer, x: i32, y: i32) {
    for dx in [13, 24, 35] {
        draw_asterisk(buffer, (x + dx, y + 42), 4);
    }
}

/// Five spokes, 72° apart, starting straight up.
fn draw_asterisk(buffer: &mut PixelBuffer, center: (i32, i32), arm: i32) {
    for spoke in 0..5 {
        let theta = (spoke as f32 * 72.0 - 90.0).to_radians();
        let tip = (
            center.0 + (arm as f32 * theta.cos()).round() as i32,
            center.1 + (arm as f32 * theta.sin()).round() as i32,
        );
        draw_line(buffer, center, tip, 1, ink::BLACK);
    }
}

fn draw_bolt(buffer: &mut PixelBuffer, x: i32, y: i32) {
    let points = [(28, 36), (21, 42), (28, 42), (22, 46)];
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        draw_line(buffer, (x + a.0, y + a.1), (x + b.0, y + b.1), 2, ink::BLACK);
    }
}

fn draw_unknown(buffer: &mut PixelBuffer, x: i32, y: i32) {
    // 8×12 glyph at scale 4 fills a 32×48 cell; centre it horizontally
    stamp_glyph(buffer, x + 8, y, '?', ink::BLACK, 4);
}
