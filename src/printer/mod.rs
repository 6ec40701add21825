//! # Printer Module
//!
//! The printer driver and its hardware configuration.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware specifications and USB addressing
//! - [`driver`]: [`Printer`], an owned connection that speaks ESC/POS

pub mod config;
pub mod driver;

pub use config::{PrinterConfig, UsbAddress};
pub use driver::Printer;
