//! Grayscale pixel buffer
//!
//! One byte per pixel, row-major, top row first. 0 is black ink and 255 is
//! white paper, which is also the byte order the bitmap encoder expects.

/// Ink levels used by the board. Anything in between is valid input to the
/// primitives; these are the tones the composer actually paints with.
pub mod ink {
    pub const BLACK: u8 = 0x00;
    /// Secondary text (non-today day labels, placeholders)
    pub const GRAY: u8 = 0x80;
    /// Overflow marker
    pub const FAINT: u8 = 0xA0;
    /// Thin dividers between events
    pub const LIGHT: u8 = 0xC8;
    pub const WHITE: u8 = 0xFF;
}

/// Owned grayscale canvas for a single render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a white canvas. A zero dimension is bumped to 1 so the
    /// buffer is never empty.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![ink::WHITE; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixel data, `width * height` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Paint one pixel. Coordinates outside the canvas on any edge are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, level: u8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = level;
        }
    }

    /// One row of pixels; panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Count pixels in the half-open rectangle that differ from white.
    #[cfg(test)]
    pub(crate) fn inked_in(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> usize {
        let mut count = 0;
        for y in y0.max(0)..y1.min(self.height as i32) {
            for x in x0.max(0)..x1.min(self.width as i32) {
                if self.get(x, y).is_some_and(|p| p != ink::WHITE) {
                    count += 1;
                }
            }
        }
        count
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}
