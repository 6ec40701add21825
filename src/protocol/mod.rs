//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for the ESC/POS command set spoken by most
//! receipt and label thermal printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, line feed, paper feed)
//! - [`graphics`]: Raster bit-image command
//! - [`text`]: Alignment and emphasis
//!
//! ## Usage Example
//!
//! ```
//! use thermoprint::protocol::{commands, graphics, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//!
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::bold(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold(false));
//!
//! // 384 dots wide, 24 rows of vertical stripes
//! data.extend(graphics::raster(384, 24, &vec![0xAA; 48 * 24]));
//! data.extend(commands::feed_lines(3));
//!
//! // Send `data` to the printer via a transport...
//! ```

pub mod commands;
pub mod graphics;
pub mod text;
