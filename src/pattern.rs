//! Panel validation pattern
//!
//! A fixed test card for checking a freshly mounted panel: a heavy border,
//! two checkerboards, a full 0..255 gradient bar, the generation time and the
//! canvas resolution. It goes through the same encoder as the board, so a
//! card that displays correctly means the board will too.

use chrono::NaiveDateTime;

use crate::canvas::{ink, PixelBuffer};
use crate::shapes::fill_rect;
use crate::text::draw_centered;

pub const BORDER: i32 = 3;
pub const CHECKER_CELL: i32 = 40;
pub const CHECKER_CELLS: i32 = 4;
pub const CHECKER_INSET: i32 = 20;
pub const CHECKER_TOP: i32 = 100;
pub const GRADIENT_INSET: i32 = 100;
pub const GRADIENT_TOP: i32 = 340;
pub const GRADIENT_HEIGHT: i32 = 40;

/// Paint the test card on a `width × height` canvas.
pub fn test_pattern(width: usize, height: usize, now: NaiveDateTime) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height);
    let w = buffer.width() as i32;
    let h = buffer.height() as i32;

    fill_rect(&mut buffer, 0, 0, w, BORDER, ink::BLACK);
    fill_rect(&mut buffer, 0, h - BORDER, w, BORDER, ink::BLACK);
    fill_rect(&mut buffer, 0, 0, BORDER, h, ink::BLACK);
    fill_rect(&mut buffer, w - BORDER, 0, BORDER, h, ink::BLACK);

    draw_centered(&mut buffer, 26, "Inkboard Test", ink::BLACK, 4);

    let board_side = CHECKER_CELL * CHECKER_CELLS;
    draw_checkerboard(&mut buffer, CHECKER_INSET, CHECKER_TOP);
    draw_checkerboard(&mut buffer, w - CHECKER_INSET - board_side, CHECKER_TOP);

    let text_top = CHECKER_TOP + board_side + 12;
    draw_centered(&mut buffer, text_top, "If you can read this,", ink::BLACK, 2);
    draw_centered(&mut buffer, text_top + 28, "upload is working!", ink::BLACK, 2);

    draw_gradient(&mut buffer, GRADIENT_INSET, w - GRADIENT_INSET);
    draw_centered(
        &mut buffer,
        GRADIENT_TOP + GRADIENT_HEIGHT + 8,
        "Grayscale Test",
        ink::BLACK,
        1,
    );

    let stamp = format!("Generated: {}", now.format("%Y-%m-%d %H:%M:%S"));
    draw_centered(&mut buffer, h - 56, &stamp, ink::BLACK, 1);
    let resolution = format!("Resolution: {w}x{h}");
    draw_centered(&mut buffer, h - 31, &resolution, ink::BLACK, 1);

    buffer
}

/// 4×4 board with a black top-left cell.
fn draw_checkerboard(buffer: &mut PixelBuffer, x: i32, y: i32) {
    for i in 0..CHECKER_CELLS {
        for j in 0..CHECKER_CELLS {
            if (i + j) % 2 == 0 {
                fill_rect(
                    buffer,
                    x + i * CHECKER_CELL,
                    y + j * CHECKER_CELL,
                    CHECKER_CELL,
                    CHECKER_CELL,
                    ink::BLACK,
                );
            }
        }
    }
}

/// Columns `x0..x1` ramp from 0 at the left to 255 at the right.
fn draw_gradient(buffer: &mut PixelBuffer, x0: i32, x1: i32) {
    let span = x1 - x0;
    if span < 2 {
        return;
    }
    for x in x0..x1 {
        let level = ((x - x0) * 255 / (span - 1)) as u8;
        fill_rect(buffer, x, GRADIENT_TOP, 1, GRADIENT_HEIGHT, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_border_frames_the_canvas() {
        let buffer = test_pattern(480, 800, noon());
        let frame = [
            (0, 0),
            (479, 0),
            (0, 799),
            (479, 799),
            (240, 2),
            (2, 400),
            (477, 400),
            (240, 797),
        ];
        for (x, y) in frame {
            assert_eq!(buffer.get(x, y), Some(ink::BLACK), "({x}, {y})");
        }
        assert_eq!(buffer.get(BORDER, 90), Some(ink::WHITE));
    }

    #[test]
    fn test_checkerboards_alternate() {
        let buffer = test_pattern(480, 800, noon());
        let cell = CHECKER_CELL;
        for left in [CHECKER_INSET, 480 - CHECKER_INSET - cell * CHECKER_CELLS] {
            let area = (cell * cell) as usize;
            let black = buffer.inked_in(left, CHECKER_TOP, left + cell, CHECKER_TOP + cell);
            let white =
                buffer.inked_in(left + cell, CHECKER_TOP, left + 2 * cell, CHECKER_TOP + cell);
            let diagonal = buffer.inked_in(
                left + cell,
                CHECKER_TOP + cell,
                left + 2 * cell,
                CHECKER_TOP + 2 * cell,
            );
            assert_eq!(black, area);
            assert_eq!(white, 0);
            assert_eq!(diagonal, area);
        }
    }

    #[test]
    fn test_gradient_spans_full_range() {
        let buffer = test_pattern(480, 800, noon());
        let y = GRADIENT_TOP + GRADIENT_HEIGHT / 2;
        let row: Vec<u8> = (GRADIENT_INSET..480 - GRADIENT_INSET)
            .map(|x| buffer.get(x, y).unwrap())
            .collect();
        assert_eq!(row.first(), Some(&0));
        assert_eq!(row.last(), Some(&255));
        assert!(row.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_footer_lines_are_drawn() {
        let buffer = test_pattern(480, 800, noon());
        assert!(buffer.inked_in(BORDER, 800 - 56, 480 - BORDER, 800 - 44) > 0);
        assert!(buffer.inked_in(BORDER, 800 - 31, 480 - BORDER, 800 - 19) > 0);
    }

    #[test]
    fn test_tiny_canvas_does_not_panic() {
        let buffer = test_pattern(30, 20, noon());
        assert_eq!(buffer.pixels().len(), 600);
    }
}
