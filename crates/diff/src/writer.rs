//! Renders an edit script into aligned display lines.
//!
//! A [`DiffWriter`] consumes deltas one at a time and builds two parallel
//! buffers: one for the actual value and one for the expected value. Both
//! buffers always break at the same display line, so text that exists on
//! one side only is balanced by padding on the other.
//!
//! The writer is a small state machine:
//!
//! ```text
//! OPEN --(write_equal | write_deleted | write_inserted)*--> flush() --> CLOSED
//! ```
//!
//! Writes require an open writer and reads require a closed one; anything
//! else fails with [`DiffError`].
//!
//! # Example
//!
//! ```rust,ignore
//! let mut writer = DiffWriter::new(TerminalEncoding::None.palette());
//! writer.write_equal("int[")?;
//! writer.write_deleted("6")?;
//! writer.write_inserted("5")?;
//! writer.write_equal("]\\0")?;
//! writer.flush()?;
//!
//! assert_eq!(writer.actual_lines()?, ["int[6 ]\\0"]);
//! assert_eq!(writer.diff_lines()?, ["====-+==="]);
//! ```

use crate::engine::{Delta, Tag};
use crate::error::DiffError;
use crate::palette::{Palette, Style};
use crate::splitter::{LineEnding, split_chunk};

/// Marker for a character present in both values.
pub const DIFF_EQUAL: char = '=';

/// Marker for a character to remove from the actual value.
pub const DIFF_DELETE: char = '-';

/// Marker for a character to add to the actual value.
pub const DIFF_INSERT: char = '+';

/// The rendered output of a [`DiffWriter`].
///
/// Every populated sequence holds one entry per display line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    actual_lines: Vec<String>,
    expected_lines: Vec<String>,
    diff_lines: Vec<String>,
    equal_lines: Vec<bool>,
    actual_line_numbers: Vec<Option<usize>>,
    expected_line_numbers: Vec<Option<usize>>,
}

impl DiffResult {
    /// Display lines of the actual value.
    pub fn actual_lines(&self) -> &[String] {
        &self.actual_lines
    }

    /// Display lines of the expected value.
    pub fn expected_lines(&self) -> &[String] {
        &self.expected_lines
    }

    /// Marker lines. Empty unless the palette renders markers.
    pub fn diff_lines(&self) -> &[String] {
        &self.diff_lines
    }

    /// Whether each display line is identical on both sides.
    pub fn equal_lines(&self) -> &[bool] {
        &self.equal_lines
    }

    /// The zero-based source line of the actual value shown on each display
    /// line, or `None` if that side shows only padding.
    pub fn actual_line_numbers(&self) -> &[Option<usize>] {
        &self.actual_line_numbers
    }

    /// The zero-based source line of the expected value shown on each display
    /// line, or `None` if that side shows only padding.
    pub fn expected_line_numbers(&self) -> &[Option<usize>] {
        &self.expected_line_numbers
    }

    /// Number of display lines.
    pub fn len(&self) -> usize {
        self.actual_lines.len()
    }

    /// Returns `true` if there are no display lines.
    pub fn is_empty(&self) -> bool {
        self.actual_lines.is_empty()
    }

    /// Returns `true` if the two values span more than one display line.
    pub fn is_multiline(&self) -> bool {
        self.len() > 1
    }
}

/// The display line currently being built for one side.
#[derive(Debug, Default)]
struct LineBuffer {
    text: String,
    style: Option<Style>,
    has_content: bool,
    line_number: usize,
}

impl LineBuffer {
    fn push(&mut self, palette: &Palette, style: Style, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.style != Some(style) {
            self.text.push_str(palette.escape(style));
            self.style = Some(style);
        }
        self.text.push_str(text);
        if style != Style::Padding {
            self.has_content = true;
        }
    }

    /// Closes any open decoration and hands back the finished line.
    fn take_line(&mut self, palette: &Palette, advance: bool) -> (String, Option<usize>) {
        if self.style.take().is_some() {
            self.text.push_str(palette.reset);
        }
        let number = self.has_content.then_some(self.line_number);
        self.has_content = false;
        if advance {
            self.line_number += 1;
        }
        (std::mem::take(&mut self.text), number)
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Writes an edit script into aligned actual/expected display lines.
#[derive(Debug)]
pub struct DiffWriter {
    palette: Palette,
    actual: LineBuffer,
    expected: LineBuffer,
    markers: String,
    line_equal: bool,
    result: DiffResult,
    closed: bool,
}

impl DiffWriter {
    /// Creates an open writer that decorates text with `palette`.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            actual: LineBuffer::default(),
            expected: LineBuffer::default(),
            markers: String::new(),
            line_equal: true,
            result: DiffResult::default(),
            closed: false,
        }
    }

    /// Writes text present in both values.
    pub fn write_equal(&mut self, text: &str) -> Result<(), DiffError> {
        self.ensure_open()?;
        self.append(Tag::Equal, text);
        Ok(())
    }

    /// Writes text present only in the actual value.
    pub fn write_deleted(&mut self, text: &str) -> Result<(), DiffError> {
        self.ensure_open()?;
        self.append(Tag::Delete, text);
        Ok(())
    }

    /// Writes text present only in the expected value.
    pub fn write_inserted(&mut self, text: &str) -> Result<(), DiffError> {
        self.ensure_open()?;
        self.append(Tag::Insert, text);
        Ok(())
    }

    /// Writes one delta of an edit script.
    pub fn write(&mut self, delta: &Delta) -> Result<(), DiffError> {
        self.ensure_open()?;
        self.append(delta.tag, &delta.text);
        Ok(())
    }

    /// Ends the last display line and closes the writer.
    ///
    /// Must be called exactly once.
    pub fn flush(&mut self) -> Result<(), DiffError> {
        self.ensure_open()?;
        self.finish_lines();
        Ok(())
    }

    /// Display lines of the actual value.
    pub fn actual_lines(&self) -> Result<&[String], DiffError> {
        self.ensure_closed()?;
        Ok(self.result.actual_lines())
    }

    /// Display lines of the expected value.
    pub fn expected_lines(&self) -> Result<&[String], DiffError> {
        self.ensure_closed()?;
        Ok(self.result.expected_lines())
    }

    /// Marker lines, empty unless the palette renders markers.
    pub fn diff_lines(&self) -> Result<&[String], DiffError> {
        self.ensure_closed()?;
        Ok(self.result.diff_lines())
    }

    /// Whether each display line is identical on both sides.
    pub fn equal_lines(&self) -> Result<&[bool], DiffError> {
        self.ensure_closed()?;
        Ok(self.result.equal_lines())
    }

    /// Consumes a flushed writer and returns its output.
    pub fn into_result(self) -> Result<DiffResult, DiffError> {
        self.ensure_closed()?;
        Ok(self.result)
    }

    fn ensure_open(&self) -> Result<(), DiffError> {
        if self.closed {
            Err(DiffError::WriterClosed)
        } else {
            Ok(())
        }
    }

    fn ensure_closed(&self) -> Result<(), DiffError> {
        if self.closed {
            Ok(())
        } else {
            Err(DiffError::WriterOpen)
        }
    }

    pub(crate) fn append(&mut self, tag: Tag, text: &str) {
        for line in split_chunk(text) {
            if line.is_blank() {
                continue;
            }
            let rendered = line.render();
            let width = rendered.chars().count();
            let breaks = line.ending == LineEnding::Newline;
            match tag {
                Tag::Equal => {
                    self.actual.push(&self.palette, Style::Equal, &rendered);
                    self.expected.push(&self.palette, Style::Equal, &rendered);
                    self.push_markers(DIFF_EQUAL, width);
                    if breaks {
                        self.end_line(true, true);
                    }
                }
                Tag::Delete => {
                    let padding = self.palette.pad(width);
                    self.actual.push(&self.palette, Style::Deleted, &rendered);
                    self.expected.push(&self.palette, Style::Padding, &padding);
                    self.push_markers(DIFF_DELETE, width);
                    self.line_equal = false;
                    if breaks {
                        self.end_line(true, false);
                    }
                }
                Tag::Insert => {
                    let padding = self.palette.pad(width);
                    self.actual.push(&self.palette, Style::Padding, &padding);
                    self.expected.push(&self.palette, Style::Inserted, &rendered);
                    self.push_markers(DIFF_INSERT, width);
                    self.line_equal = false;
                    if breaks {
                        self.end_line(false, true);
                    }
                }
            }
        }
    }

    fn finish_lines(&mut self) {
        if !self.actual.is_empty() || !self.expected.is_empty() || self.result.is_empty() {
            self.end_line(false, false);
        }
        self.closed = true;
    }

    /// Flushes and returns the output without the state checks.
    pub(crate) fn finish(mut self) -> DiffResult {
        if !self.closed {
            self.finish_lines();
        }
        self.result
    }

    fn push_markers(&mut self, marker: char, width: usize) {
        if self.palette.diff_markers {
            self.markers.extend(std::iter::repeat_n(marker, width));
        }
    }

    fn end_line(&mut self, advance_actual: bool, advance_expected: bool) {
        let (actual, actual_number) = self.actual.take_line(&self.palette, advance_actual);
        let (expected, expected_number) = self.expected.take_line(&self.palette, advance_expected);
        self.result.actual_lines.push(actual);
        self.result.actual_line_numbers.push(actual_number);
        self.result.expected_lines.push(expected);
        self.result.expected_line_numbers.push(expected_number);
        if self.palette.diff_markers {
            self.result.diff_lines.push(std::mem::take(&mut self.markers));
        }
        self.result.equal_lines.push(self.line_equal);
        self.line_equal = true;
    }
}
