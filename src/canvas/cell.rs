//! Canvas Cell
//!
//! Represents a single cell in the canvas grid, containing a codepoint
//! and its packed color attribute.

use serde::{Deserialize, Serialize};

/// The character stored in freshly allocated cells
pub const BLANK: u32 = ' ' as u32;

/// A single cell in the canvas grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Unicode codepoint. Kept as a raw `u32` because native dumps may
    /// carry values that are not valid `char`s.
    pub ch: u32,
    /// Packed attribute, see [`Attr`]
    pub attr: u32,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Attr::default())
    }
}

impl Cell {
    /// Create a new cell with a character and attribute
    pub fn new(ch: u32, attr: Attr) -> Self {
        Self {
            ch,
            attr: attr.pack(),
        }
    }

    /// A space in the given attribute
    pub fn blank(attr: Attr) -> Self {
        Self::new(BLANK, attr)
    }

    /// The character as a `char`, if the codepoint is valid
    pub fn char(&self) -> Option<char> {
        char::from_u32(self.ch)
    }

    /// Decode the packed attribute
    pub fn attr(&self) -> Attr {
        Attr::unpack(self.attr)
    }

    /// Foreground color, if the attribute holds a known color code
    pub fn fg(&self) -> Option<Color> {
        self.attr().fg()
    }

    /// Background color, if the attribute holds a known color code
    pub fn bg(&self) -> Option<Color> {
        self.attr().bg()
    }

    /// Check if this cell holds the blank character
    pub fn is_blank(&self) -> bool {
        self.ch == BLANK
    }
}

/// Canvas color codes.
///
/// Ordered like the CGA/DOS text palette, so a base color (0-7) becomes
/// its bright variant by adding [`Color::BRIGHT_OFFSET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Black = 0x00,
    Blue = 0x01,
    Green = 0x02,
    Cyan = 0x03,
    Red = 0x04,
    Magenta = 0x05,
    Brown = 0x06,
    LightGray = 0x07,
    DarkGray = 0x08,
    LightBlue = 0x09,
    LightGreen = 0x0a,
    LightCyan = 0x0b,
    LightRed = 0x0c,
    LightMagenta = 0x0d,
    Yellow = 0x0e,
    White = 0x0f,
    /// The output device's default color
    Default = 0x10,
    /// No color at all; lets whatever is underneath show through
    Transparent = 0x20,
}

impl Color {
    /// Distance from a base color to its bright variant
    pub const BRIGHT_OFFSET: u8 = 8;

    /// ANSI color order (SGR 30-37 / 40-47) mapped to canvas colors
    pub const ANSI_PALETTE: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Brown,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::LightGray,
    ];

    /// Numeric code of this color
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a color by its numeric code
    pub fn from_code(code: u8) -> Option<Color> {
        let color = match code {
            0x00 => Color::Black,
            0x01 => Color::Blue,
            0x02 => Color::Green,
            0x03 => Color::Cyan,
            0x04 => Color::Red,
            0x05 => Color::Magenta,
            0x06 => Color::Brown,
            0x07 => Color::LightGray,
            0x08 => Color::DarkGray,
            0x09 => Color::LightBlue,
            0x0a => Color::LightGreen,
            0x0b => Color::LightCyan,
            0x0c => Color::LightRed,
            0x0d => Color::LightMagenta,
            0x0e => Color::Yellow,
            0x0f => Color::White,
            0x10 => Color::Default,
            0x20 => Color::Transparent,
            _ => return None,
        };
        Some(color)
    }

    /// Whether this is one of the eight base colors
    pub fn is_base(self) -> bool {
        self.code() < Self::BRIGHT_OFFSET
    }

    /// The bright variant of a base color; other colors are returned as is
    pub fn brighten(self) -> Color {
        if self.is_base() {
            Color::from_code(self.code() + Self::BRIGHT_OFFSET).unwrap_or(self)
        } else {
            self
        }
    }

    /// Map an ANSI color index (0-7) to the canvas color
    pub fn from_ansi(index: u32) -> Option<Color> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ANSI_PALETTE.get(i))
            .copied()
    }
}

/// Foreground/background pair packed into a cell's 32-bit attribute.
///
/// Layout: bits 0-7 foreground code, bits 8-15 background code,
/// bits 16-31 style bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attr {
    pub fg: u8,
    pub bg: u8,
    pub style: u16,
}

impl Default for Attr {
    fn default() -> Self {
        Self::new(Color::LightGray, Color::Black)
    }
}

impl Attr {
    pub fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg: fg.code(),
            bg: bg.code(),
            style: 0,
        }
    }

    pub fn pack(self) -> u32 {
        u32::from(self.fg) | (u32::from(self.bg) << 8) | (u32::from(self.style) << 16)
    }

    pub fn unpack(raw: u32) -> Self {
        Self {
            fg: (raw & 0xff) as u8,
            bg: ((raw >> 8) & 0xff) as u8,
            style: (raw >> 16) as u16,
        }
    }

    pub fn fg(self) -> Option<Color> {
        Color::from_code(self.fg)
    }

    pub fn bg(self) -> Option<Color> {
        Color::from_code(self.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_default() {
        let cell = Cell::default();
        assert!(cell.is_blank());
        assert_eq!(cell.fg(), Some(Color::LightGray));
        assert_eq!(cell.bg(), Some(Color::Black));
    }

    #[test]
    fn test_cell_new() {
        let cell = Cell::new('A' as u32, Attr::new(Color::Red, Color::Blue));
        assert_eq!(cell.char(), Some('A'));
        assert!(!cell.is_blank());
        assert_eq!(cell.fg(), Some(Color::Red));
        assert_eq!(cell.bg(), Some(Color::Blue));
    }

    #[test]
    fn test_cell_invalid_codepoint() {
        let cell = Cell {
            ch: 0xD800,
            attr: 0,
        };
        assert_eq!(cell.char(), None);
    }

    #[test]
    fn test_attr_pack_layout() {
        let attr = Attr::new(Color::Yellow, Color::Transparent);
        assert_eq!(attr.pack(), 0x0000_200e);

        let raw = 0xBEEF_0410;
        let attr = Attr::unpack(raw);
        assert_eq!(attr.fg(), Some(Color::Default));
        assert_eq!(attr.bg(), Some(Color::Red));
        assert_eq!(attr.style, 0xBEEF);
        assert_eq!(attr.pack(), raw);
    }

    #[test]
    fn test_color_brighten() {
        assert_eq!(Color::Red.brighten(), Color::LightRed);
        assert_eq!(Color::Black.brighten(), Color::DarkGray);
        assert_eq!(Color::Brown.brighten(), Color::Yellow);
        assert_eq!(Color::LightGray.brighten(), Color::White);

        // Already bright or special colors are untouched
        assert_eq!(Color::LightRed.brighten(), Color::LightRed);
        assert_eq!(Color::Default.brighten(), Color::Default);
        assert_eq!(Color::Transparent.brighten(), Color::Transparent);
    }

    #[test]
    fn test_color_from_ansi() {
        assert_eq!(Color::from_ansi(0), Some(Color::Black));
        assert_eq!(Color::from_ansi(1), Some(Color::Red));
        assert_eq!(Color::from_ansi(3), Some(Color::Brown));
        assert_eq!(Color::from_ansi(4), Some(Color::Blue));
        assert_eq!(Color::from_ansi(7), Some(Color::LightGray));
        assert_eq!(Color::from_ansi(8), None);
    }

    #[test]
    fn test_color_code_roundtrip() {
        for code in 0..=u8::MAX {
            if let Some(color) = Color::from_code(code) {
                assert_eq!(color.code(), code);
            }
        }
        assert_eq!(Color::from_code(0x11), None);
    }
}
