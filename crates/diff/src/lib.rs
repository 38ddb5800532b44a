//! # requisite-diff
//!
//! Character-level diffs between an *actual* and an *expected* string,
//! rendered as aligned display lines for plain or ANSI-colored terminals.
//!
//! ## Pipeline
//!
//! 1. [`splitter`] terminates both values with an end-of-string marker and
//!    tracks where lines end.
//! 2. [`engine`] computes a minimal Myers edit script and cleans it up.
//! 3. [`DiffWriter`] renders the script with a [`Palette`], padding the
//!    shorter side so both values stay column aligned.
//!
//! [`DiffGenerator`] runs all three steps.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use requisite_diff::prelude::*;
//!
//! let result = DiffGenerator::new(TerminalEncoding::None).diff("int[6]", "int[5]");
//!
//! assert_eq!(result.actual_lines(), ["int[6 ]\\0"]);
//! assert_eq!(result.diff_lines(), ["====-+==="]);
//! assert_eq!(result.expected_lines(), ["int[ 5]\\0"]);
//! ```
//!
//! ## Encodings
//!
//! | Encoding | Decoration | Marker line |
//! |----------|------------|-------------|
//! | `None` | none, padded with spaces | `=` `-` `+` |
//! | `Xterm8Color` | 8 colors, padded with `/` | no |
//! | `Xterm16Color` | 16 colors, padded with `/` | no |
//! | `Xterm256Color` | 256 colors, padded with `/` | no |
//! | `Rgb888Color` | 24-bit color, padded with `/` | no |
//!
//! The encoding in effect is resolved by [`GlobalConfiguration`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod generator;
pub mod palette;
pub mod splitter;
pub mod terminal;
pub mod writer;

pub use engine::{Delta, Tag};
pub use error::{DiffError, UnknownEncoding};
pub use generator::DiffGenerator;
pub use palette::{Palette, Style, TerminalEncoding};
pub use terminal::GlobalConfiguration;
pub use writer::{DiffResult, DiffWriter};

/// Commonly used types.
pub mod prelude {
    pub use crate::engine::{Delta, Tag};
    pub use crate::error::DiffError;
    pub use crate::generator::DiffGenerator;
    pub use crate::palette::{Palette, TerminalEncoding};
    pub use crate::splitter::{EOS_MARKER, NEWLINE_MARKER};
    pub use crate::terminal::GlobalConfiguration;
    pub use crate::writer::{DiffResult, DiffWriter};
}
