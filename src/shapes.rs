//! Shape primitives shared by the page dividers and the icon renderers.
//!
//! All primitives clip silently; nothing here can fail or write outside the
//! buffer.

use crate::canvas::PixelBuffer;

/// Angular sampling step for arcs and circles, in degrees.
pub const ARC_STEP_DEG: i32 = 5;

/// Fill the `w × h` rectangle whose top-left corner is `(x, y)`.
pub fn fill_rect(buffer: &mut PixelBuffer, x: i32, y: i32, w: i32, h: i32, level: u8) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(w).min(buffer.width() as i32);
    let y1 = y.saturating_add(h).min(buffer.height() as i32);
    for py in y0..y1 {
        for px in x0..x1 {
            buffer.set_pixel(px, py, level);
        }
    }
}

/// Solid rule covering columns `x1..x2` and rows `y..y + thickness`.
pub fn solid_hline(buffer: &mut PixelBuffer, x1: i32, x2: i32, y: i32, thickness: i32, level: u8) {
    fill_rect(buffer, x1, y, x2 - x1, thickness, level);
}

/// One pixel high dashed rule over columns `x1..x2`.
///
/// Starts with a dash of `dash_len` painted pixels, then skips `gap_len`,
/// and repeats. Never paints at or past `x2`.
pub fn dashed_hline(
    buffer: &mut PixelBuffer,
    x1: i32,
    x2: i32,
    y: i32,
    level: u8,
    dash_len: i32,
    gap_len: i32,
) {
    let dash_len = dash_len.max(1);
    let gap_len = gap_len.max(0);
    let mut x = x1;
    let mut drawing = true;
    while x < x2 {
        let run = if drawing { dash_len } else { gap_len };
        let end = (x + run).min(x2);
        if drawing {
            for px in x..end {
                buffer.set_pixel(px, y, level);
            }
        }
        x = end;
        drawing = !drawing;
    }
}

/// Straight line from `(x0, y0)` to `(x1, y1)` with a square pen of
/// `thickness` pixels (Bresenham).
pub fn draw_line(
    buffer: &mut PixelBuffer,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    thickness: i32,
    level: u8,
) {
    let thickness = thickness.max(1);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    loop {
        fill_rect(buffer, x, y, thickness, thickness, level);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Stamp an arc of `radius` around `(cx, cy)` between two angles.
///
/// Angles are in degrees, 0° points right and angles grow clockwise on
/// screen (y grows downward), so 180°..360° is the upper half. The arc is
/// sampled every [`ARC_STEP_DEG`] and each sample is rounded to the nearest
/// pixel. `thickness` rings are drawn inward from `radius`.
pub fn stamp_arc(
    buffer: &mut PixelBuffer,
    (cx, cy): (i32, i32),
    radius: i32,
    (start_deg, end_deg): (i32, i32),
    thickness: i32,
    level: u8,
) {
    for ring in 0..thickness.max(1) {
        let r = (radius - ring) as f32;
        if r < 0.0 {
            break;
        }
        let mut deg = start_deg;
        while deg <= end_deg {
            let theta = (deg as f32).to_radians();
            let x = (cx as f32 + r * theta.cos()).round() as i32;
            let y = (cy as f32 + r * theta.sin()).round() as i32;
            buffer.set_pixel(x, y, level);
            deg += ARC_STEP_DEG;
        }
    }
}

/// Full circle outline, see [`stamp_arc`].
pub fn stamp_circle(
    buffer: &mut PixelBuffer,
    center: (i32, i32),
    radius: i32,
    thickness: i32,
    level: u8,
) {
    stamp_arc(buffer, center, radius, (0, 360), thickness, level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ink;

    #[test]
    fn test_fill_rect_clips_negative_origin() {
        let mut buffer = PixelBuffer::new(10, 10);
        fill_rect(&mut buffer, -5, -5, 8, 8, ink::BLACK);
        assert_eq!(buffer.inked_in(0, 0, 10, 10), 9);
        assert_eq!(buffer.get(2, 2), Some(ink::BLACK));
        assert_eq!(buffer.get(3, 3), Some(ink::WHITE));
    }

    #[test]
    fn test_fill_rect_clips_far_edges() {
        let mut buffer = PixelBuffer::new(10, 10);
        fill_rect(&mut buffer, 8, 8, i32::MAX, i32::MAX, ink::BLACK);
        assert_eq!(buffer.inked_in(0, 0, 10, 10), 4);
    }

    #[test]
    fn test_solid_hline_has_real_height() {
        let mut buffer = PixelBuffer::new(20, 20);
        solid_hline(&mut buffer, 2, 18, 5, 3, ink::BLACK);
        assert_eq!(buffer.inked_in(0, 0, 20, 20), 16 * 3);
        assert_eq!(buffer.inked_in(0, 8, 20, 20), 0);
    }

    #[test]
    fn test_dashed_hline_pattern() {
        let mut buffer = PixelBuffer::new(20, 1);
        dashed_hline(&mut buffer, 0, 11, 0, ink::BLACK, 3, 2);
        let row: Vec<bool> = buffer.row(0).iter().map(|&p| p == ink::BLACK).collect();
        let expected = [
            true, true, true, false, false, true, true, true, false, false, true, false,
        ];
        assert_eq!(&row[..12], &expected);
        assert!(row[11..].iter().all(|&b| !b));
    }

    #[test]
    fn test_dashed_hline_stops_before_end() {
        let mut buffer = PixelBuffer::new(50, 1);
        dashed_hline(&mut buffer, 5, 9, 0, ink::BLACK, 10, 1);
        assert_eq!(buffer.inked_in(0, 0, 50, 1), 4);
        assert_eq!(buffer.get(9, 0), Some(ink::WHITE));
    }

    #[test]
    fn test_draw_line_endpoints() {
        let mut buffer = PixelBuffer::new(10, 10);
        draw_line(&mut buffer, (1, 1), (8, 6), 1, ink::BLACK);
        assert_eq!(buffer.get(1, 1), Some(ink::BLACK));
        assert_eq!(buffer.get(8, 6), Some(ink::BLACK));
        assert_eq!(buffer.inked_in(0, 0, 10, 10), 8);
    }

    #[test]
    fn test_stamp_circle_rounds_to_pixels() {
        let mut buffer = PixelBuffer::new(21, 21);
        stamp_circle(&mut buffer, (10, 10), 6, 1, ink::BLACK);
        // Cardinal points land exactly on the radius
        assert_eq!(buffer.get(16, 10), Some(ink::BLACK));
        assert_eq!(buffer.get(4, 10), Some(ink::BLACK));
        assert_eq!(buffer.get(10, 4), Some(ink::BLACK));
        assert_eq!(buffer.get(10, 16), Some(ink::BLACK));
        assert_eq!(buffer.get(10, 10), Some(ink::WHITE));
    }

    #[test]
    fn test_upper_arc_stays_above_center() {
        let mut buffer = PixelBuffer::new(21, 21);
        stamp_arc(&mut buffer, (10, 10), 8, (180, 360), 2, ink::BLACK);
        assert!(buffer.inked_in(0, 0, 21, 10) > 0);
        assert_eq!(buffer.inked_in(0, 11, 21, 21), 0);
    }
}
