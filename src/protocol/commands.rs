//! # ESC/POS Basic Commands
//!
//! Byte-sequence builders for the printer-control subset of ESC/POS used by
//! 58mm receipt printers (initialize, line feed, paper feed).
//!
//! ## Escape Sequence Structure
//!
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - With parameters: `ESC d n`, `GS v 0 m xL xH yL yH d1...dk`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte (0x1B)
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix (0x1D)
///
/// Used for graphics and character-size commands, e.g. `GS v 0`.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets text modes (alignment, emphasis,
/// character size) to their power-on defaults.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ## Example
///
/// ```
/// use thermoprint::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// `n` consecutive line feeds, i.e. `n` blank lines after a finished line.
pub fn line_feeds(n: usize) -> Vec<u8> {
    vec![LF; n]
}

/// # Print and Feed n Lines (ESC d n)
///
/// Prints the line buffer and feeds the paper `n` lines.
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | ESC d n    |
/// | Hex     | 1B 64 n    |
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

// ============================================================================
// HELPERS
// ============================================================================

/// Encode a `u16` as little-endian bytes (`[low, high]`).
///
/// ```
/// use thermoprint::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(384), [0x80, 0x01]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}
