//! Shared test doubles and fixtures.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use thermoprint::{PrintError, Transport};

/// Transport that records everything written to it.
#[derive(Clone, Default)]
pub struct Recorder(pub Arc<Mutex<Vec<u8>>>);

impl Recorder {
    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }
}

impl Transport for Recorder {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PrintError> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(())
    }
}

/// Transport whose every write fails like a disconnected printer.
pub struct Broken;

pub const BROKEN_MESSAGE: &str = "printer went away (cover open)";

impl Transport for Broken {
    fn write_all(&mut self, _data: &[u8]) -> Result<(), PrintError> {
        Err(PrintError::Transport(BROKEN_MESSAGE.to_string()))
    }
}

/// Left half fully transparent, right half opaque black.
pub fn half_transparent(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbaImage::new(width, height);
    for (x, _, p) in img.enumerate_pixels_mut() {
        *p = if x < width / 2 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([0, 0, 0, 255])
        };
    }
    DynamicImage::ImageRgba8(img)
}

pub fn gradient(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbImage::new(width, height);
    for (x, y, p) in img.enumerate_pixels_mut() {
        *p = Rgb([(x % 256) as u8, (y % 256) as u8, 128]);
    }
    DynamicImage::ImageRgb8(img)
}

pub fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

/// Byte offsets of every `GS v 0` header in a command stream.
pub fn raster_headers(stream: &[u8]) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut i = 0;
    while i + 8 <= stream.len() {
        if stream[i..i + 3] == [0x1D, 0x76, 0x30] {
            offsets.push(i);
            let width_bytes = u16::from_le_bytes([stream[i + 4], stream[i + 5]]) as usize;
            let height = u16::from_le_bytes([stream[i + 6], stream[i + 7]]) as usize;
            i += 8 + width_bytes * height;
        } else {
            i += 1;
        }
    }
    offsets
}
