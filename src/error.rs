//! # Error Types
//!
//! This module defines error types used throughout the thermoprint library.

use thiserror::Error;

/// Main error type for thermoprint operations
#[derive(Debug, Error)]
pub enum PrintError {
    /// The uploaded file could not be decoded (or the converted copy encoded)
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// Image processing error outside the image crate
    #[error("Image error: {0}")]
    Image(String),

    /// Transport-level errors (connection, short writes)
    #[error("Transport error: {0}")]
    Transport(String),

    /// libusb failure while opening or writing to the printer
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    /// Invalid command or parameter
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
