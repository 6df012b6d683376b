// src/style.rs

//! Defines the visual style applied to a highlighted span (`Style`,
//! `StyleFlags`) and its encoding as an SGR escape sequence.
//! Color definitions (`Color`, `NamedColor`) are found in the `crate::color` module.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::color::{Color, Layer};

/// Control Sequence Introducer.
const CSI: &str = "\x1b[";
/// SGR sequence that clears every attribute.
pub const SGR_RESET: &str = "\x1b[0m";

bitflags! {
    /// Text attribute flags like bold, underline, reverse video, etc.
    /// These flags correspond to common ANSI SGR parameters.
    ///
    /// In config files they are written as a `|`-separated string,
    /// e.g. `"BOLD | UNDERLINE"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StyleFlags: u16 {
        const BOLD          = 1 << 0;
        const FAINT         = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const REVERSE       = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
    }
}

impl StyleFlags {
    /// SGR parameters for the set flags, in ascending order.
    fn sgr_params(&self) -> Vec<u8> {
        let table = [
            (StyleFlags::BOLD, 1),
            (StyleFlags::FAINT, 2),
            (StyleFlags::ITALIC, 3),
            (StyleFlags::UNDERLINE, 4),
            (StyleFlags::REVERSE, 7),
            (StyleFlags::STRIKETHROUGH, 9),
        ];
        table
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, param)| *param)
            .collect()
    }
}

/// The visual attributes of a highlighted span: foreground color,
/// background color, and styling flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Styling flags (bold, italic, underline, etc.).
    pub flags: StyleFlags,
}

impl Style {
    pub fn new(fg: Color) -> Self {
        Style {
            fg,
            ..Style::default()
        }
    }

    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// True when the style would not change how text looks.
    pub fn is_plain(&self) -> bool {
        self.fg == Color::Default && self.bg == Color::Default && self.flags.is_empty()
    }

    /// The escape sequence that switches a terminal into this style,
    /// or `None` for a plain style.
    pub fn sgr_sequence(&self) -> Option<String> {
        if self.is_plain() {
            return None;
        }
        let mut params = self.flags.sgr_params();
        params.extend(self.fg.sgr_params(Layer::Foreground));
        params.extend(self.bg.sgr_params(Layer::Background));
        let joined = params
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(";");
        Some(format!("{}{}m", CSI, joined))
    }
}
