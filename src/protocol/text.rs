//! # ESC/POS Text Styling Commands
//!
//! Alignment and emphasis, the two text attributes the printer driver sets
//! before every line of text.
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```

use std::fmt;
use std::str::FromStr;

use super::commands::ESC;
use crate::error::PrintError;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl FromStr for Alignment {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(PrintError::InvalidCommand(format!(
                "unknown alignment '{}' (expected left, center or right)",
                other
            ))),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        };
        f.write_str(name)
    }
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a n  |
/// | Hex     | 1B 61 n  |
///
/// - `n = 0`: Left (default)
/// - `n = 1`: Center
/// - `n = 2`: Right
///
/// Only takes effect when issued at the beginning of a line.
///
/// ```
/// use thermoprint::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// TEXT EMPHASIS (BOLD)
// ============================================================================

/// # Turn Emphasized Mode On/Off (ESC E n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC E n  |
/// | Hex     | 1B 45 n  |
///
/// Only the least significant bit of `n` is used.
#[inline]
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', enabled as u8]
}

// ============================================================================
// STYLE BUILDER
// ============================================================================

/// Style applied to a line of text.
///
/// Both attributes are always emitted so a line never inherits the style of
/// the previous one.
///
/// ```
/// use thermoprint::protocol::text::{TextStyle, Alignment};
///
/// let style = TextStyle::new().alignment(Alignment::Right).bold(true);
/// assert_eq!(style.to_commands(), vec![0x1B, 0x61, 0x02, 0x1B, 0x45, 0x01]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub alignment: Alignment,
    pub bold: bool,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(mut self, a: Alignment) -> Self {
        self.alignment = a;
        self
    }

    pub fn bold(mut self, enabled: bool) -> Self {
        self.bold = enabled;
        self
    }

    /// Generate command bytes for this style
    pub fn to_commands(&self) -> Vec<u8> {
        let mut cmds = align(self.alignment);
        cmds.extend(bold(self.bold));
        cmds
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(bold(true), vec![0x1B, 0x45, 0x01]);
        assert_eq!(bold(false), vec![0x1B, 0x45, 0x00]);
    }

    #[test]
    fn test_text_style_default_is_left_normal() {
        assert_eq!(
            TextStyle::new().to_commands(),
            vec![0x1B, 0x61, 0x00, 0x1B, 0x45, 0x00]
        );
    }

    #[test]
    fn test_text_style_builder() {
        let cmds = TextStyle::new()
            .alignment(Alignment::Center)
            .bold(true)
            .to_commands();

        assert!(cmds.windows(3).any(|w| w == [0x1B, 0x61, 0x01]));
        assert!(cmds.windows(3).any(|w| w == [0x1B, 0x45, 0x01]));
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!("left".parse::<Alignment>().unwrap(), Alignment::Left);
        assert_eq!("CENTER".parse::<Alignment>().unwrap(), Alignment::Center);
        assert_eq!("right".parse::<Alignment>().unwrap(), Alignment::Right);
        assert!("justify".parse::<Alignment>().is_err());
    }

    #[test]
    fn test_alignment_display_round_trips() {
        for a in [Alignment::Left, Alignment::Center, Alignment::Right] {
            assert_eq!(a.to_string().parse::<Alignment>().unwrap(), a);
        }
    }
}
