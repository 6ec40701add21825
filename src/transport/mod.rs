//! # Printer Transport Layer
//!
//! Communication backends for sending command bytes to the printer.
//!
//! ## Available Transports
//!
//! - [`usb`]: Bulk transfers over libusb (the default)
//! - [`file`]: A character device such as `/dev/usb/lp0`, or a capture file
//!
//! Anything implementing [`Transport`] can back a
//! [`Printer`](crate::printer::Printer), which is how tests substitute a
//! recording device.

pub mod file;
pub mod usb;

pub use file::FileTransport;
pub use usb::UsbTransport;

use crate::error::PrintError;

/// A byte sink connected to a printer.
pub trait Transport: Send {
    /// Write every byte of `data` to the device, or fail.
    fn write_all(&mut self, data: &[u8]) -> Result<(), PrintError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PrintError> {
        (**self).write_all(data)
    }
}
