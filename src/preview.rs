//! # Terminal Preview
//!
//! Downsamples a rendered page into ASCII art so a layout can be checked on a
//! desktop without a panel attached. Each character covers a
//! `CELL_WIDTH × CELL_HEIGHT` block; the block's mean gray level picks a
//! character from a ramp where darker blocks get denser characters.

use crate::canvas::PixelBuffer;

/// Pixels per character horizontally.
pub const CELL_WIDTH: usize = 4;
/// Pixels per character vertically. Terminal cells are roughly twice as tall as wide.
pub const CELL_HEIGHT: usize = 8;

const RAMP: &[u8] = b" .:-=+*#%@";

/// Character for a mean gray level; white is blank, black is `@`.
fn shade(level: u8) -> char {
    let darkness = 255 - level as usize;
    RAMP[darkness * (RAMP.len() - 1) / 255] as char
}

/// The preview as lines of text, top row first.
pub fn ascii_lines(buffer: &PixelBuffer) -> Vec<String> {
    let width = buffer.width();
    let height = buffer.height();

    (0..height.div_ceil(CELL_HEIGHT))
        .map(|row| {
            let y0 = row * CELL_HEIGHT;
            let y1 = (y0 + CELL_HEIGHT).min(height);
            (0..width.div_ceil(CELL_WIDTH))
                .map(|col| {
                    let x0 = col * CELL_WIDTH;
                    let x1 = (x0 + CELL_WIDTH).min(width);
                    let mut sum = 0usize;
                    for y in y0..y1 {
                        sum += buffer.row(y)[x0..x1].iter().map(|&p| p as usize).sum::<usize>();
                    }
                    let mean = sum / ((x1 - x0) * (y1 - y0));
                    shade(mean as u8)
                })
                .collect()
        })
        .collect()
}

/// Print the preview to stdout.
pub fn draw_ascii(buffer: &PixelBuffer) {
    for line in ascii_lines(buffer) {
        println!("{}", line.trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ink;
    use crate::shapes::fill_rect;

    #[test]
    fn test_shade_extremes() {
        assert_eq!(shade(ink::WHITE), ' ');
        assert_eq!(shade(ink::BLACK), '@');
    }

    #[test]
    fn test_blank_page_is_blank() {
        let buffer = PixelBuffer::new(40, 40);
        let lines = ascii_lines(&buffer);
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.len() == 10 && l.trim().is_empty()));
    }

    #[test]
    fn test_partial_cells_round_up() {
        let buffer = PixelBuffer::new(9, 17);
        let lines = ascii_lines(&buffer);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 3);
    }

    #[test]
    fn test_black_block_is_dense() {
        let mut buffer = PixelBuffer::new(16, 16);
        fill_rect(&mut buffer, 0, 0, 4, 8, ink::BLACK);
        let lines = ascii_lines(&buffer);
        assert_eq!(lines[0].chars().next(), Some('@'));
        assert_eq!(lines[0].chars().nth(1), Some(' '));
    }

    #[test]
    fn test_draw_ascii_does_not_panic() {
        draw_ascii(&PixelBuffer::new(3, 3));
    }
}
