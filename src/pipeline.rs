//! # Image Pipeline
//!
//! Prepares an arbitrary uploaded image for the print head and sends it:
//!
//! ```text
//! decode → resize to 384 dots wide → whiten transparent pixels → grayscale
//!        → save temp file → printer
//! ```
//!
//! Only fully transparent pixels (alpha 0) are replaced with white.
//! Partially transparent pixels keep their color channels as they are; they
//! are not blended against white.

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage, Rgba, imageops::FilterType};
use tracing::{debug, info};

use crate::error::PrintError;
use crate::printer::Printer;
use crate::transport::Transport;

/// Decode an image file.
///
/// Any format the `image` crate can sniff is accepted. With the `heif`
/// feature, HEIC/HEIF photos (as uploaded from phones) are decoded too.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage, PrintError> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_image(&bytes)
}

/// Decode an in-memory encoded image.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, PrintError> {
    #[cfg(feature = "heif")]
    if is_heic(bytes) {
        return decode_heic(bytes);
    }

    Ok(image::load_from_memory(bytes)?)
}

/// Tallest image, in rows, the pipeline will produce: about 2 m of paper
/// at 8 dots/mm.
pub const MAX_HEIGHT_DOTS: u32 = 16_000;

/// Height that keeps the aspect ratio when scaling `width` to `target_width`.
///
/// `round(height × target_width / width)`, never less than one row.
///
/// ```
/// use thermoprint::pipeline::target_height;
///
/// assert_eq!(target_height(800, 600, 384), 288);
/// assert_eq!(target_height(100, 33, 384), 127); // 126.72 rounds up
/// ```
pub fn target_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return 1;
    }
    let scaled = height as f64 * target_width as f64 / width as f64;
    (scaled.round() as u32).max(1)
}

/// Resize to exactly `width` dots wide, preserving aspect ratio.
///
/// Fails without allocating when the result would be taller than
/// [`MAX_HEIGHT_DOTS`].
pub fn fit_to_width(img: &DynamicImage, width: u32) -> Result<DynamicImage, PrintError> {
    let height = target_height(img.width(), img.height(), width);
    if height > MAX_HEIGHT_DOTS {
        return Err(PrintError::Image(format!(
            "{}x{} image would be {} rows tall at {} dots wide, at most {} can be printed",
            img.width(),
            img.height(),
            height,
            width,
            MAX_HEIGHT_DOTS
        )));
    }
    Ok(img.resize_exact(width, height, FilterType::Lanczos3))
}

/// Replace every fully transparent pixel with opaque white.
///
/// Images without an alpha channel are returned unchanged.
pub fn whiten_transparent(img: DynamicImage) -> DynamicImage {
    if !img.color().has_alpha() {
        return img;
    }

    let mut rgba = img.into_rgba8();
    for pixel in rgba.pixels_mut() {
        if pixel[3] == 0 {
            *pixel = Rgba([255, 255, 255, 255]);
        }
    }
    DynamicImage::ImageRgba8(rgba)
}

/// Single-channel luminance.
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Resize, whiten, convert: everything short of printing.
pub fn prepare(img: &DynamicImage, width: u32) -> Result<GrayImage, PrintError> {
    let resized = fit_to_width(img, width)?;
    Ok(to_grayscale(&whiten_transparent(resized)))
}

/// Print the image at `path`.
///
/// The converted grayscale copy is written to `temp_path` (replacing any
/// earlier one) and the printer prints from that file.
pub fn print_image<T, P, Q>(printer: &mut Printer<T>, path: P, temp_path: Q) -> Result<(), PrintError>
where
    T: Transport,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = temp_path.as_ref();

    let img = load_image(path)?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded {}",
        path.display()
    );

    let gray = prepare(&img, printer.config().width_dots as u32)?;
    gray.save(temp_path).map_err(|e| {
        PrintError::Image(format!("Failed to write {}: {}", temp_path.display(), e))
    })?;

    info!(
        width = gray.width(),
        height = gray.height(),
        "printing {}",
        path.display()
    );
    printer.print_image_file(temp_path)
}

/// Check if the data looks like a HEIC/HEIF file by examining magic bytes.
///
/// HEIC files have an `ftyp` box at offset 4 followed by a HEIF brand.
pub fn is_heic(data: &[u8]) -> bool {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return false;
    }

    matches!(
        &data[8..12],
        b"heic" | b"heix" | b"hevc" | b"hevx" | b"heim" | b"heis" | b"hevm" | b"hevs" | b"mif1" | b"msf1"
    )
}

/// Decode a HEIC/HEIF image using libheif.
#[cfg(feature = "heif")]
fn decode_heic(data: &[u8]) -> Result<DynamicImage, PrintError> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(data)
        .map_err(|e| PrintError::Image(format!("Failed to read HEIC: {}", e)))?;

    let handle = ctx
        .primary_image_handle()
        .map_err(|e| PrintError::Image(format!("Failed to get primary image: {}", e)))?;

    let image = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| PrintError::Image(format!("Failed to decode HEIC image: {}", e)))?;

    let interleaved = image
        .planes()
        .interleaved
        .ok_or_else(|| PrintError::Image("No interleaved RGB data in HEIC".to_string()))?;

    let rgb = rgb_from_rows(interleaved.data, image.width(), image.height(), interleaved.stride)?;
    Ok(DynamicImage::ImageRgb8(rgb))
}

/// Build an RGB image from interleaved rows that may carry padding past
/// `width * 3` bytes.
#[cfg_attr(not(feature = "heif"), allow(dead_code))]
fn rgb_from_rows(data: &[u8], width: u32, height: u32, stride: usize) -> Result<RgbImage, PrintError> {
    let row_bytes = width as usize * 3;
    if stride == 0 || stride < row_bytes {
        return Err(PrintError::Image(format!(
            "row stride {} is too small for {} pixels",
            stride, width
        )));
    }

    let pixels = if stride == row_bytes {
        data.get(..row_bytes * height as usize).map(<[u8]>::to_vec)
    } else {
        let rows: Vec<u8> = data
            .chunks(stride)
            .take(height as usize)
            .flat_map(|row| row.iter().take(row_bytes))
            .copied()
            .collect();
        Some(rows)
    };

    pixels
        .and_then(|pixels| RgbImage::from_raw(width, height, pixels))
        .ok_or_else(|| PrintError::Image("Image data is shorter than its dimensions".to_string()))
}
