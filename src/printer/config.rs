//! # Printer Configuration
//!
//! Hardware specifications for the supported thermal printer and the USB
//! addressing used to reach it.
//!
//! ## Supported Printers
//!
//! | Model | Width (dots) | Resolution | USB id |
//! |-------|--------------|------------|--------|
//! | 58mm ESC/POS (GOOJPRT/"PT-210" class) | 384 | 203 DPI | 0483:070b |
//!
//! ## Usage
//!
//! ```
//! use thermoprint::printer::PrinterConfig;
//!
//! let config = PrinterConfig::POS58;
//! assert_eq!(config.width_dots, 384);
//! assert_eq!(config.width_bytes(), 48);
//! ```

/// USB addressing of the printer: device ids, interface and bulk endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsbAddress {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Interface claimed before writing
    pub interface: u8,
    /// Bulk IN endpoint (status replies)
    pub endpoint_in: u8,
    /// Bulk OUT endpoint (command stream)
    pub endpoint_out: u8,
}

impl UsbAddress {
    /// 0483:070b, interface 0, IN 0x81, OUT 0x02
    pub const POS58: Self = Self {
        vendor_id: 0x0483,
        product_id: 0x070b,
        interface: 0,
        endpoint_in: 0x81,
        endpoint_out: 0x02,
    };
}

impl Default for UsbAddress {
    fn default() -> Self {
        Self::POS58
    }
}

/// # Printer Configuration
///
/// ## Physical Properties
///
/// - **width_dots**: Printable width in dots; every image is scaled to it
/// - **dpi**: Resolution in dots per inch
///
/// ## Transfer Tuning
///
/// - **fragment_height**: Maximum rows per raster command
///
/// ```text
/// dots_per_mm = 203 / 25.4 ≈ 8
/// width_mm    = 384 / 8    = 48mm printable on 58mm paper
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Maximum rows sent in one `GS v 0` command
    pub fragment_height: u16,

    /// Where the printer lives on the USB bus
    pub usb: UsbAddress,
}

impl PrinterConfig {
    /// # 58mm ESC/POS receipt printer
    ///
    /// ```text
    /// ├─ 5mm ─┼──── 48mm printable ────┼─ 5mm ─┤
    /// │margin │       384 dots         │margin │
    /// ```
    pub const POS58: Self = Self {
        name: "58mm ESC/POS",
        width_dots: 384,
        dpi: 203,
        fragment_height: 960,
        usb: UsbAddress::POS58,
    };

    /// Print width in bytes (width_dots / 8, rounded up)
    #[inline]
    pub fn width_bytes(&self) -> u16 {
        self.width_dots.div_ceil(8)
    }

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }

    /// Same printer, different USB addressing.
    pub fn with_usb(mut self, usb: UsbAddress) -> Self {
        self.usb = usb;
        self
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::POS58
    }
}
