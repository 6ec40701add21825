//! # Rendering Module
//!
//! Turns grayscale images into the 1-bit raster data the printer consumes,
//! and back into images for previews.
//!
//! ## Modules
//!
//! - [`dither`]: Grayscale to 1-bit conversion (Floyd-Steinberg, Bayer, threshold)

pub mod dither;

use image::{GrayImage, Luma};

/// Expand packed raster data into a black/white image.
///
/// This is what the printer will burn, so it doubles as a print preview.
pub fn raster_to_image(width: usize, height: usize, data: &[u8]) -> GrayImage {
    let mut img = GrayImage::new(width as u32, height as u32);
    let width_bytes = width.div_ceil(8);

    for y in 0..height {
        for x in 0..width {
            let byte_idx = y * width_bytes + x / 8;
            let bit_idx = 7 - (x % 8);
            let is_black = (data[byte_idx] >> bit_idx) & 1 == 1;

            let color = if is_black { 0u8 } else { 255u8 };
            img.put_pixel(x as u32, y as u32, Luma([color]));
        }
    }

    img
}
