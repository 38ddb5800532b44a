//! The complete diff pipeline.

use crate::engine::{self, Delta};
use crate::palette::TerminalEncoding;
use crate::splitter::terminate;
use crate::writer::{DiffResult, DiffWriter};

/// Compares two strings and renders the result for a terminal encoding.
///
/// Both values are terminated with an end-of-string marker, compared
/// character by character, simplified, and written through a
/// [`DiffWriter`] using the encoding's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffGenerator {
    encoding: TerminalEncoding,
}

impl DiffGenerator {
    /// Creates a generator for the given encoding.
    pub const fn new(encoding: TerminalEncoding) -> Self {
        Self { encoding }
    }

    /// The encoding output is rendered for.
    pub const fn encoding(&self) -> TerminalEncoding {
        self.encoding
    }

    /// Computes the normalized edit script between two terminated values.
    pub fn deltas(&self, actual: &str, expected: &str) -> Vec<Delta> {
        engine::diff(&terminate(actual), &terminate(expected))
    }

    /// Diffs `actual` against `expected` and renders the display lines.
    pub fn diff(&self, actual: &str, expected: &str) -> DiffResult {
        let deltas = self.deltas(actual, expected);
        tracing::trace!(
            encoding = %self.encoding,
            deltas = deltas.len(),
            "rendering diff"
        );

        let mut writer = DiffWriter::new(self.encoding.palette());
        for delta in &deltas {
            writer.append(delta.tag, &delta.text);
        }
        writer.finish()
    }
}

impl Default for DiffGenerator {
    fn default() -> Self {
        Self::new(crate::terminal::GlobalConfiguration::terminal_encoding())
    }
}
