//! # ESC/POS Raster Graphics
//!
//! Implements the raster bit-image command used to print photos and other
//! uploaded images.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (horizontal, 384 dots max)
//!   │
//!   │   ████████  ← Each dot is 0.125mm (203 DPI)
//!   │   ████████
//!   ▼
//!   Y (vertical, paper feed direction)
//! ```
//!
//! ## Bit Packing
//!
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```

use super::commands::{GS, u16_le};

/// Raster mode `m` parameter: normal density (no double width/height).
pub const RASTER_MODE_NORMAL: u8 = 0;

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Mode (0 = normal)
/// - `xL, xH`: Width in **bytes**, little-endian
/// - `yL, yH`: Height in dots, little-endian
/// - `d1...dk`: k = width_bytes × height, row by row
///
/// ## Example
///
/// ```
/// use thermoprint::protocol::graphics;
///
/// let data = vec![0xAA; 48 * 100];
/// let cmd = graphics::raster(384, 100, &data);
///
/// assert_eq!(&cmd[0..3], &[0x1D, 0x76, 0x30]);
/// assert_eq!(cmd[3], 0);   // m = normal
/// assert_eq!(cmd[4], 48);  // xL = 384 / 8
/// assert_eq!(cmd[5], 0);   // xH
/// assert_eq!(cmd[6], 100); // yL
/// assert_eq!(cmd[7], 0);   // yH
/// assert_eq!(cmd.len(), 8 + 48 * 100);
/// ```
pub fn raster(width_dots: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let width_bytes = width_dots.div_ceil(8);
    let expected_len = width_bytes as usize * height as usize;

    debug_assert!(
        data.len() == expected_len,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        expected_len,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(RASTER_MODE_NORMAL);
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(data);
    cmd
}

/// Encode a raster image as one `GS v 0` command per `fragment_height` rows.
///
/// Many printers drop data when a single raster command is taller than their
/// receive buffer, so tall images are sent as a stack of shorter ones. The
/// printed result is identical.
///
/// ```
/// use thermoprint::protocol::graphics;
///
/// let data = vec![0x00; 48 * 2000];
/// let cmd = graphics::raster_fragments(384, 2000, &data, 960);
///
/// // 960 + 960 + 80 rows, 8 header bytes each
/// assert_eq!(cmd.len(), 3 * 8 + 48 * 2000);
/// ```
pub fn raster_fragments(width_dots: u16, height: usize, data: &[u8], fragment_height: u16) -> Vec<u8> {
    let width_bytes = width_dots.div_ceil(8) as usize;
    let fragment_height = fragment_height.max(1) as usize;

    let mut cmd = Vec::with_capacity(data.len() + 8 * height.div_ceil(fragment_height));
    let mut row = 0;
    while row < height {
        let rows = fragment_height.min(height - row);
        let chunk = &data[row * width_bytes..(row + rows) * width_bytes];
        cmd.extend(raster(width_dots, rows as u16, chunk));
        row += rows;
    }
    cmd
}

// ============================================================================
// TESTS
// ============================================================================
