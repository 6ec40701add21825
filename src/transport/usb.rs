//! # USB Bulk Transport
//!
//! Talks to the printer through libusb: the device is located by vendor and
//! product id, any kernel driver (`usblp`) is detached, the printer
//! interface is claimed, and command bytes go out as bulk transfers on the
//! OUT endpoint.
//!
//! ## Permissions (Linux)
//!
//! Opening the device needs write access to its `/dev/bus/usb/...` node.
//! A udev rule avoids running as root:
//!
//! ```text
//! SUBSYSTEM=="usb", ATTR{idVendor}=="0483", ATTR{idProduct}=="070b", MODE="0666"
//! ```
//!
//! ## Chunked Writes
//!
//! Large jobs are written in 4096-byte bulk transfers, each with its own
//! timeout, so a stalled printer fails the job instead of hanging it.

use std::time::Duration;

use rusb::{Context, DeviceHandle, UsbContext};
use tracing::{debug, info, warn};

use super::Transport;
use crate::error::PrintError;
use crate::printer::UsbAddress;

/// Bytes per bulk transfer
const CHUNK_SIZE: usize = 4096;

/// Timeout for a single bulk transfer
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// # USB Printer Transport
///
/// ```no_run
/// use thermoprint::printer::UsbAddress;
/// use thermoprint::protocol::commands;
/// use thermoprint::transport::{Transport, UsbTransport};
///
/// let mut transport = UsbTransport::open(UsbAddress::POS58)?;
/// transport.write_all(&commands::init())?;
///
/// # Ok::<(), thermoprint::PrintError>(())
/// ```
pub struct UsbTransport {
    handle: DeviceHandle<Context>,
    address: UsbAddress,
}

impl UsbTransport {
    /// Open the printer at `address` and claim its interface.
    ///
    /// ## Errors
    ///
    /// - No device with the vendor/product id is attached
    /// - Permission denied on the device node
    /// - The interface is busy (claimed by another process)
    pub fn open(address: UsbAddress) -> Result<Self, PrintError> {
        let context = Context::new()?;

        let mut handle = context
            .open_device_with_vid_pid(address.vendor_id, address.product_id)
            .ok_or_else(|| {
                PrintError::Transport(format!(
                    "No USB printer found at {:04x}:{:04x}",
                    address.vendor_id, address.product_id
                ))
            })?;

        // Not supported on every platform; claiming still works without it
        // when no kernel driver is bound.
        if let Err(e) = handle.set_auto_detach_kernel_driver(true) {
            debug!("auto-detach of kernel driver unavailable: {}", e);
        }

        handle.claim_interface(address.interface)?;

        info!(
            "opened USB printer {:04x}:{:04x} (interface {}, OUT {:#04x})",
            address.vendor_id, address.product_id, address.interface, address.endpoint_out
        );

        Ok(Self { handle, address })
    }
}

impl Transport for UsbTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PrintError> {
        let mut remaining = data;

        while !remaining.is_empty() {
            let len = remaining.len().min(CHUNK_SIZE);
            let written = self
                .handle
                .write_bulk(self.address.endpoint_out, &remaining[..len], WRITE_TIMEOUT)?;

            if written == 0 {
                return Err(PrintError::Transport(format!(
                    "USB bulk write stalled with {} bytes left",
                    remaining.len()
                )));
            }
            remaining = &remaining[written..];
        }

        debug!(bytes = data.len(), "wrote to USB printer");
        Ok(())
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        if let Err(e) = self.handle.release_interface(self.address.interface) {
            warn!("failed to release USB interface: {}", e);
        }
    }
}
