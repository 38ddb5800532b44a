//! Terminal encodings and the escape sequences they decorate diffs with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownEncoding;

/// Resets all terminal attributes.
pub const RESET: &str = "\u{1b}[0m";

/// The category of text a [`Palette`] decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Text present in both values.
    Equal,
    /// Text present only in the actual value.
    Deleted,
    /// Text present only in the expected value.
    Inserted,
    /// Filler that keeps the two sides aligned.
    Padding,
}

/// Decoration strings for one terminal encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Escape that starts equal text.
    pub equal: &'static str,
    /// Escape that starts deleted text.
    pub deleted: &'static str,
    /// Escape that starts inserted text.
    pub inserted: &'static str,
    /// Escape that starts padding.
    pub padding: &'static str,
    /// Escape that ends a decorated run.
    pub reset: &'static str,
    /// Character repeated to pad the shorter side.
    pub padding_char: char,
    /// Whether a textual marker line is rendered beneath each line pair.
    pub diff_markers: bool,
}

impl Palette {
    /// Plain text. Differences are shown by a marker line.
    pub const NONE: Self = Self {
        equal: "",
        deleted: "",
        inserted: "",
        padding: "",
        reset: "",
        padding_char: ' ',
        diff_markers: true,
    };

    /// The eight base colors.
    pub const XTERM_8COLOR: Self = Self {
        equal: "\u{1b}[39;49m",
        deleted: "\u{1b}[37;41m",
        inserted: "\u{1b}[30;42m",
        padding: "\u{1b}[30;47m",
        reset: RESET,
        padding_char: '/',
        diff_markers: false,
    };

    /// The sixteen base colors, using the bright variants.
    pub const XTERM_16COLOR: Self = Self {
        equal: "\u{1b}[39;49m",
        deleted: "\u{1b}[97;101m",
        inserted: "\u{1b}[30;102m",
        padding: "\u{1b}[90;49m",
        reset: RESET,
        padding_char: '/',
        diff_markers: false,
    };

    /// The xterm 256-color table.
    pub const XTERM_256COLOR: Self = Self {
        equal: "\u{1b}[39;49m",
        deleted: "\u{1b}[38;5;15;48;5;124m",
        inserted: "\u{1b}[38;5;16;48;5;40m",
        padding: "\u{1b}[38;5;244;49m",
        reset: RESET,
        padding_char: '/',
        diff_markers: false,
    };

    /// 24-bit color.
    pub const RGB_888COLOR: Self = Self {
        equal: "\u{1b}[39;49m",
        deleted: "\u{1b}[38;2;255;255;255;48;2;179;0;0m",
        inserted: "\u{1b}[38;2;0;0;0;48;2;0;179;0m",
        padding: "\u{1b}[38;2;128;128;128;49m",
        reset: RESET,
        padding_char: '/',
        diff_markers: false,
    };

    /// The escape that starts text of the given style.
    #[must_use]
    pub const fn escape(&self, style: Style) -> &'static str {
        match style {
            Style::Equal => self.equal,
            Style::Deleted => self.deleted,
            Style::Inserted => self.inserted,
            Style::Padding => self.padding,
        }
    }

    /// Padding as wide as `width` characters.
    #[must_use]
    pub fn pad(&self, width: usize) -> String {
        std::iter::repeat_n(self.padding_char, width).collect()
    }
}

/// The color capability of a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerminalEncoding {
    /// No color support.
    #[serde(rename = "none")]
    None,
    /// 8 colors.
    #[serde(rename = "xterm-8color")]
    Xterm8Color,
    /// 16 colors.
    #[serde(rename = "xterm-16color")]
    Xterm16Color,
    /// 256 colors.
    #[serde(rename = "xterm-256color")]
    Xterm256Color,
    /// 24-bit color.
    #[serde(rename = "rgb-888color")]
    Rgb888Color,
}

impl TerminalEncoding {
    /// Every encoding, from least to most capable.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Xterm8Color,
        Self::Xterm16Color,
        Self::Xterm256Color,
        Self::Rgb888Color,
    ];

    /// The decoration strings used by this encoding.
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::None => Palette::NONE,
            Self::Xterm8Color => Palette::XTERM_8COLOR,
            Self::Xterm16Color => Palette::XTERM_16COLOR,
            Self::Xterm256Color => Palette::XTERM_256COLOR,
            Self::Rgb888Color => Palette::RGB_888COLOR,
        }
    }

    /// The encodings the current terminal supports, `None` first.
    pub fn supported() -> Vec<Self> {
        crate::terminal::GlobalConfiguration::supported_terminal_encodings()
    }

    /// The configuration name of this encoding.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Xterm8Color => "xterm-8color",
            Self::Xterm16Color => "xterm-16color",
            Self::Xterm256Color => "xterm-256color",
            Self::Rgb888Color => "rgb-888color",
        }
    }
}

impl fmt::Display for TerminalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminalEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.as_str() == name)
            .ok_or(UnknownEncoding { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for encoding in TerminalEncoding::ALL {
            assert_eq!(encoding.as_str().parse::<TerminalEncoding>(), Ok(encoding));
        }
        assert!("vt100".parse::<TerminalEncoding>().is_err());
    }

    #[test]
    fn only_plain_text_renders_markers() {
        let with_markers: Vec<_> = TerminalEncoding::ALL
            .into_iter()
            .filter(|encoding| encoding.palette().diff_markers)
            .collect();
        assert_eq!(with_markers, vec![TerminalEncoding::None]);
    }
}
