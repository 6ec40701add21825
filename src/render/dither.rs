//! # Grayscale to 1-bit Dithering
//!
//! Thermal print heads can only burn a dot or leave it white. This module
//! turns an 8-bit grayscale image into packed 1-bit rows for the raster
//! command.
//!
//! ## Algorithms
//!
//! | Method | Speed | Quality | Artifacts |
//! |--------|-------|---------|-----------|
//! | Floyd-Steinberg | Slow | Best for photos | Noise, worms |
//! | Bayer 8x8 | Fast | Good | Regular pattern |
//! | Threshold | Fastest | Poor | Banding |
//!
//! Floyd-Steinberg is the default: it is what most ESC/POS drivers use when
//! converting photos to bilevel images.
//!
//! ## Usage Example
//!
//! ```
//! use image::{GrayImage, Luma};
//! use thermoprint::render::dither::{self, DitheringAlgorithm};
//!
//! let img = GrayImage::from_pixel(16, 2, Luma([0]));
//! let data = dither::rasterize(&img, DitheringAlgorithm::FloydSteinberg);
//!
//! assert_eq!(data, vec![0xFF; 4]); // all black
//! ```

use std::str::FromStr;

use image::GrayImage;

use crate::error::PrintError;

/// Luma values below this print as black when thresholding.
pub const THRESHOLD: u8 = 128;

/// Binarization method used by [`rasterize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitheringAlgorithm {
    /// Plain threshold at [`THRESHOLD`], no dithering
    None,
    /// Ordered dithering with the 8x8 Bayer matrix
    Bayer,
    /// Floyd-Steinberg error diffusion
    #[default]
    FloydSteinberg,
}

impl FromStr for DitheringAlgorithm {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "threshold" => Ok(DitheringAlgorithm::None),
            "bayer" => Ok(DitheringAlgorithm::Bayer),
            "floyd-steinberg" | "floyd_steinberg" | "fs" => Ok(DitheringAlgorithm::FloydSteinberg),
            other => Err(PrintError::InvalidCommand(format!(
                "unknown dithering algorithm '{}'",
                other
            ))),
        }
    }
}

/// Bayer 8x8 dithering matrix
///
/// Values range from 0-63 and are used as per-position thresholds.
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Bayer threshold for a pixel position, in (0, 1).
///
/// `(BAYER8[y mod 8][x mod 8] + 0.5) / 64` so that pure black always prints
/// and pure white never does.
#[inline]
pub fn bayer_threshold(x: usize, y: usize) -> f32 {
    let matrix_value = BAYER8[y & 7][x & 7];
    (matrix_value as f32 + 0.5) / 64.0
}

/// Pack a row of boolean pixel values into bytes.
///
/// - Bit 7 (MSB) = leftmost pixel
/// - 1 = black (print dot), 0 = white (no dot)
///
/// If the row length is not a multiple of 8, the last byte is padded with
/// white on the right.
///
/// ```
/// use thermoprint::render::dither::pack_row;
///
/// let row = vec![true, true, true, true, false, false, false, false];
/// assert_eq!(pack_row(&row), vec![0xF0]);
///
/// let row = vec![true; 12];
/// assert_eq!(pack_row(&row), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let num_bytes = pixels.len().div_ceil(8);
    let mut bytes = vec![0u8; num_bytes];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            let byte_idx = i / 8;
            let bit_idx = 7 - (i % 8); // MSB first
            bytes[byte_idx] |= 1 << bit_idx;
        }
    }

    bytes
}

/// Convert a grayscale image to packed raster rows.
///
/// Returns `ceil(width / 8) * height` bytes, row by row.
pub fn rasterize(img: &GrayImage, algorithm: DitheringAlgorithm) -> Vec<u8> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let black: Vec<bool> = match algorithm {
        DitheringAlgorithm::None => img.pixels().map(|p| p.0[0] < THRESHOLD).collect(),
        DitheringAlgorithm::Bayer => img
            .enumerate_pixels()
            .map(|(x, y, p)| {
                let intensity = 1.0 - p.0[0] as f32 / 255.0;
                intensity > bayer_threshold(x as usize, y as usize)
            })
            .collect(),
        DitheringAlgorithm::FloydSteinberg => floyd_steinberg(img),
    };

    let mut data = Vec::with_capacity(width.div_ceil(8) * height);
    if width == 0 {
        return data;
    }
    for row in black.chunks(width) {
        data.extend(pack_row(row));
    }
    data
}

/// Floyd-Steinberg error diffusion, left to right on every row.
///
/// ```text
///         X   7/16
/// 3/16  5/16  1/16
/// ```
fn floyd_steinberg(img: &GrayImage) -> Vec<bool> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut levels: Vec<f32> = img.pixels().map(|p| p.0[0] as f32).collect();
    let mut black = vec![false; levels.len()];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = levels[idx];
            let new = if old < THRESHOLD as f32 { 0.0 } else { 255.0 };
            black[idx] = new == 0.0;

            let err = old - new;
            if x + 1 < width {
                levels[idx + 1] += err * 7.0 / 16.0;
            }
            if y + 1 < height {
                if x > 0 {
                    levels[idx + width - 1] += err * 3.0 / 16.0;
                }
                levels[idx + width] += err * 5.0 / 16.0;
                if x + 1 < width {
                    levels[idx + width + 1] += err * 1.0 / 16.0;
                }
            }
        }
    }

    black
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    const ALL: [DitheringAlgorithm; 3] = [
        DitheringAlgorithm::None,
        DitheringAlgorithm::Bayer,
        DitheringAlgorithm::FloydSteinberg,
    ];

    #[test]
    fn test_bayer_matrix_values() {
        let mut seen = [false; 64];
        for row in &BAYER8 {
            for &val in row {
                assert!(val < 64, "Matrix value {} out of range", val);
                assert!(!seen[val as usize], "Duplicate value {}", val);
                seen[val as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "Not all values 0-63 present");
    }

    #[test]
    fn test_bayer_threshold_range() {
        for y in 0..8 {
            for x in 0..8 {
                let t = bayer_threshold(x, y);
                assert!(t > 0.0 && t < 1.0, "Threshold at ({},{}) = {}", x, y, t);
            }
        }
    }

    #[test]
    fn test_pack_row_8_pixels() {
        assert_eq!(pack_row(&[true; 8]), vec![0xFF]);
        assert_eq!(pack_row(&[false; 8]), vec![0x00]);
        assert_eq!(
            pack_row(&[true, false, true, false, true, false, true, false]),
            vec![0xAA]
        );
    }

    #[test]
    fn test_pack_row_padding() {
        let packed = pack_row(&[true; 9]);
        assert_eq!(packed, vec![0xFF, 0x80]);
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_black_and_white_are_exact_for_every_algorithm() {
        let black = GrayImage::from_pixel(24, 3, Luma([0]));
        let white = GrayImage::from_pixel(24, 3, Luma([255]));

        for algo in ALL {
            assert!(rasterize(&black, algo).iter().all(|&b| b == 0xFF), "{:?}", algo);
            assert!(rasterize(&white, algo).iter().all(|&b| b == 0x00), "{:?}", algo);
        }
    }

    #[test]
    fn test_raster_length_pads_width() {
        let img = GrayImage::from_pixel(10, 7, Luma([200]));
        for algo in ALL {
            assert_eq!(rasterize(&img, algo).len(), 2 * 7);
        }
    }

    #[test]
    fn test_threshold_splits_at_128() {
        let mut img = GrayImage::new(8, 1);
        for x in 0..8 {
            img.put_pixel(x, 0, Luma([if x < 4 { 127 } else { 128 }]));
        }
        assert_eq!(rasterize(&img, DitheringAlgorithm::None), vec![0xF0]);
    }

    #[test]
    fn test_floyd_steinberg_mid_gray_is_half_black() {
        let img = GrayImage::from_pixel(64, 64, Luma([128]));
        let data = rasterize(&img, DitheringAlgorithm::FloydSteinberg);
        let dots: u32 = data.iter().map(|b| b.count_ones()).sum();

        let total = 64 * 64;
        assert!(
            dots > total * 2 / 5 && dots < total * 3 / 5,
            "expected ~50% black dots, got {} of {}",
            dots,
            total
        );
    }

    #[test]
    fn test_empty_image() {
        let img = GrayImage::new(0, 0);
        assert!(rasterize(&img, DitheringAlgorithm::FloydSteinberg).is_empty());
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("fs".parse::<DitheringAlgorithm>().unwrap(), DitheringAlgorithm::FloydSteinberg);
        assert_eq!("Bayer".parse::<DitheringAlgorithm>().unwrap(), DitheringAlgorithm::Bayer);
        assert_eq!("threshold".parse::<DitheringAlgorithm>().unwrap(), DitheringAlgorithm::None);
        assert!("atkinson".parse::<DitheringAlgorithm>().is_err());
    }
}
