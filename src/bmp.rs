//! Minimal 8-bit grayscale bitmap encoder
//!
//! Layout of the produced file, all integers little-endian:
//!
//! | offset | size   | content                                         |
//! |--------|--------|-------------------------------------------------|
//! | 0      | 14     | file header: `BM`, file size, 0, pixel offset   |
//! | 14     | 40     | info header, negative height (top-down rows)    |
//! | 54     | 1024   | palette, entry `i` is `(i, i, i, 0)`            |
//! | 1078   | rest   | rows padded to a multiple of 4 bytes            |

use crate::canvas::PixelBuffer;

pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;
pub const PALETTE_SIZE: usize = 256 * 4;
/// Offset of the first pixel row from the start of the file.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;

/// 72 DPI expressed in pixels per metre.
const PIXELS_PER_METRE: i32 = 2835;

/// Response headers the transport layer serves the encoded image with.
pub const BMP_CONTENT_TYPE: &str = "image/bmp";
pub const CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";
pub const CONTENT_DISPOSITION: &str = "inline; filename=\"inkboard.bmp\"";

/// Bytes per stored row for an image `width` pixels wide.
pub fn row_stride(width: usize) -> usize {
    width.div_ceil(4) * 4
}

/// Total size of the encoded file for a `width × height` image.
pub fn encoded_len(width: usize, height: usize) -> usize {
    PIXEL_DATA_OFFSET + row_stride(width) * height
}

/// Encode `buffer` as an uncompressed 8 bpp bitmap with a grayscale palette.
///
/// Rows are written top row first and the header carries a negative height
/// to say so. Padding bytes are zero.
pub fn encode_grayscale(buffer: &PixelBuffer) -> Vec<u8> {
    let width = buffer.width();
    let height = buffer.height();
    let stride = row_stride(width);
    let image_size = stride * height;
    let file_size = PIXEL_DATA_OFFSET + image_size;

    let mut out = Vec::with_capacity(file_size);

    // File header
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(PIXEL_DATA_OFFSET as u32).to_le_bytes());

    // Info header
    out.extend_from_slice(&(INFO_HEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(-(height as i32)).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&8u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
    out.extend_from_slice(&256u32.to_le_bytes()); // colours used
    out.extend_from_slice(&256u32.to_le_bytes()); // colours important

    // Palette: B, G, R, reserved
    for level in 0..=255u8 {
        out.extend_from_slice(&[level, level, level, 0]);
    }

    let padding = [0u8; 3];
    for y in 0..height {
        out.extend_from_slice(buffer.row(y));
        out.extend_from_slice(&padding[..stride - width]);
    }

    debug_assert_eq!(out.len(), file_size);
    out
}
