// src/color.rs

//! Defines color-related enums (`NamedColor`, `Color`) and their encoding as
//! SGR (Select Graphic Rendition) parameters.

use serde::{Deserialize, Serialize};

/// Standard ANSI named colors (indices 0-15).
/// These are the 8 normal and 8 bright colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,       // Also known as Grey
    BrightBlack = 8, // Also known as Dark Grey
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

const NAMED_COLORS: [NamedColor; 16] = [
    NamedColor::Black,
    NamedColor::Red,
    NamedColor::Green,
    NamedColor::Yellow,
    NamedColor::Blue,
    NamedColor::Magenta,
    NamedColor::Cyan,
    NamedColor::White,
    NamedColor::BrightBlack,
    NamedColor::BrightRed,
    NamedColor::BrightGreen,
    NamedColor::BrightYellow,
    NamedColor::BrightBlue,
    NamedColor::BrightMagenta,
    NamedColor::BrightCyan,
    NamedColor::BrightWhite,
];

// SGR parameter bases
const SGR_FG_BASE: u8 = 30;
const SGR_BG_BASE: u8 = 40;
const SGR_FG_BRIGHT_BASE: u8 = 90;
const SGR_BG_BRIGHT_BASE: u8 = 100;
const SGR_FG_EXTENDED: u8 = 38;
const SGR_BG_EXTENDED: u8 = 48;
const SGR_EXTENDED_INDEXED: u8 = 5;
const SGR_EXTENDED_RGB: u8 = 2;

impl NamedColor {
    /// Converts a u8 index (0-15) to a `NamedColor`.
    /// Returns `None` if the index is out of range.
    pub fn from_index(idx: u8) -> Option<Self> {
        NAMED_COLORS.get(idx as usize).copied()
    }

    /// Whether this is one of the 8 bright colors.
    pub fn is_bright(&self) -> bool {
        (*self as u8) >= 8
    }

    /// Position within its normal/bright group (0-7).
    fn offset(&self) -> u8 {
        (*self as u8) % 8
    }
}

/// Which side of the cell a color applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
}

/// Represents a color value used when styling highlighted text.
/// Can be a default placeholder, a standard named ANSI color,
/// an indexed color from the 256-color palette, or an RGB true color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Color {
    /// The terminal's own default, left untouched.
    #[default]
    Default,
    /// A standard named ANSI color (indices 0-15).
    Named(NamedColor),
    /// An indexed color from the 256-color palette (indices 0-255).
    /// Note: Indices 0-15 are emitted as their named equivalents.
    Indexed(u8),
    /// An RGB true color, with each component from 0 to 255.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Returns the SGR parameters selecting this color on the given layer,
    /// or an empty vector for `Color::Default` (nothing to emit).
    pub fn sgr_params(&self, layer: Layer) -> Vec<u8> {
        let (base, bright_base, extended) = match layer {
            Layer::Foreground => (SGR_FG_BASE, SGR_FG_BRIGHT_BASE, SGR_FG_EXTENDED),
            Layer::Background => (SGR_BG_BASE, SGR_BG_BRIGHT_BASE, SGR_BG_EXTENDED),
        };
        match *self {
            Color::Default => Vec::new(),
            Color::Named(named) => {
                if named.is_bright() {
                    vec![bright_base + named.offset()]
                } else {
                    vec![base + named.offset()]
                }
            }
            Color::Indexed(idx) => match NamedColor::from_index(idx) {
                Some(named) => Color::Named(named).sgr_params(layer),
                None => vec![extended, SGR_EXTENDED_INDEXED, idx],
            },
            Color::Rgb(r, g, b) => vec![extended, SGR_EXTENDED_RGB, r, g, b],
        }
    }
}
