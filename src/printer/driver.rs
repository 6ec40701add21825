//! # Printer Driver
//!
//! [`Printer`] owns a transport and turns high-level requests (a line of
//! styled text, a grayscale image) into ESC/POS command bytes.
//!
//! ## Example
//!
//! ```no_run
//! use thermoprint::printer::{Printer, PrinterConfig};
//! use thermoprint::protocol::text::{Alignment, TextStyle};
//! use thermoprint::transport::UsbTransport;
//!
//! let config = PrinterConfig::POS58;
//! let transport = UsbTransport::open(config.usb)?;
//! let mut printer = Printer::new(transport, config);
//!
//! printer.init()?;
//! printer.text("HELLO\n", TextStyle::new().alignment(Alignment::Center).bold(true))?;
//! printer.line(2)?;
//!
//! # Ok::<(), thermoprint::PrintError>(())
//! ```

use std::path::Path;

use image::GrayImage;
use tracing::debug;

use super::config::PrinterConfig;
use crate::error::PrintError;
use crate::protocol::{commands, graphics, text::TextStyle};
use crate::render::dither::{self, DitheringAlgorithm};
use crate::transport::Transport;

/// An open connection to one printer.
pub struct Printer<T: Transport> {
    transport: T,
    config: PrinterConfig,
    dithering: DitheringAlgorithm,
}

impl<T: Transport> Printer<T> {
    pub fn new(transport: T, config: PrinterConfig) -> Self {
        Self {
            transport,
            config,
            dithering: DitheringAlgorithm::default(),
        }
    }

    /// Use `algorithm` when converting grayscale images to dots.
    pub fn with_dithering(mut self, algorithm: DitheringAlgorithm) -> Self {
        self.dithering = algorithm;
        self
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Send raw command bytes.
    pub fn raw(&mut self, data: &[u8]) -> Result<(), PrintError> {
        self.transport.write_all(data)
    }

    /// Reset the printer (`ESC @`).
    pub fn init(&mut self) -> Result<(), PrintError> {
        self.raw(&commands::init())
    }

    /// Print `text` with the given alignment and weight.
    ///
    /// The text is sent as-is: include `\n` to finish the line. Characters
    /// outside ASCII are replaced with `?` since the printer's default code
    /// page cannot render them.
    pub fn text(&mut self, text: &str, style: TextStyle) -> Result<(), PrintError> {
        let mut data = style.to_commands();
        data.extend(text.chars().map(|c| if c.is_ascii() { c as u8 } else { b'?' }));
        self.raw(&data)
    }

    /// Feed `n` blank lines.
    pub fn line(&mut self, n: usize) -> Result<(), PrintError> {
        if n == 0 {
            return Ok(());
        }
        self.raw(&commands::line_feeds(n))
    }

    /// Print the buffer and feed `n` lines (`ESC d n`).
    pub fn feed(&mut self, n: u8) -> Result<(), PrintError> {
        self.raw(&commands::feed_lines(n))
    }

    /// Encode a grayscale image as raster commands without sending it.
    ///
    /// The image must not be wider than the print head.
    pub fn image_commands(&self, img: &GrayImage) -> Result<Vec<u8>, PrintError> {
        let (width, height) = img.dimensions();
        if width > self.config.width_dots as u32 {
            return Err(PrintError::InvalidCommand(format!(
                "image is {} dots wide but {} prints at most {}",
                width, self.config.name, self.config.width_dots
            )));
        }

        let data = dither::rasterize(img, self.dithering);
        Ok(graphics::raster_fragments(
            width as u16,
            height as usize,
            &data,
            self.config.fragment_height,
        ))
    }

    /// Print a grayscale image.
    pub fn print_image(&mut self, img: &GrayImage) -> Result<(), PrintError> {
        let data = self.image_commands(img)?;
        debug!(
            width = img.width(),
            height = img.height(),
            bytes = data.len(),
            "sending raster image"
        );
        self.raw(&data)
    }

    /// Load an image file, convert it to grayscale and print it.
    pub fn print_image_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), PrintError> {
        let img = image::open(path.as_ref())?.to_luma8();
        self.print_image(&img)
    }
}
