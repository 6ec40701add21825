//! # thermoprint - Image Printing for ESC/POS Thermal Printers
//!
//! thermoprint takes an uploaded image, fits it to a 58mm receipt printer's
//! 384-dot print head and prints it over USB. It provides:
//!
//! - **Image pipeline**: decode, resize, whiten transparency, grayscale
//! - **Protocol implementation**: ESC/POS command builders
//! - **Dithering**: Floyd-Steinberg, Bayer and threshold 1-bit conversion
//! - **Transport**: libusb bulk transfers, or a device/capture file
//! - **HTTP server**: `POST /print` multipart upload endpoint
//!
//! ## Quick Start
//!
//! ```no_run
//! use thermoprint::{
//!     pipeline,
//!     printer::{Printer, PrinterConfig},
//!     transport::UsbTransport,
//! };
//!
//! let config = PrinterConfig::POS58;
//! let transport = UsbTransport::open(config.usb)?;
//! let mut printer = Printer::new(transport, config);
//!
//! // Resize to 384 dots, convert to grayscale, save temp.png and print it
//! pipeline::print_image(&mut printer, "photo.jpg", "temp.png")?;
//!
//! # Ok::<(), thermoprint::PrintError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pipeline`] | Image preparation and printing |
//! | [`protocol`] | ESC/POS command builders |
//! | [`render`] | Dithering and raster previews |
//! | [`transport`] | Communication backends |
//! | [`printer`] | Printer driver and configuration |
//! | [`server`] | HTTP upload server |
//! | [`error`] | Error types |

pub mod error;
pub mod pipeline;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use error::PrintError;
pub use printer::{Printer, PrinterConfig};
pub use transport::{FileTransport, Transport, UsbTransport};
