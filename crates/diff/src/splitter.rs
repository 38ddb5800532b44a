//! Line splitting with newline and end-of-string markers.
//!
//! Diff output is line oriented, but the characters that end a line are not
//! printable. Each line therefore carries its [`LineEnding`], which renders as
//! a visible marker:
//!
//! - [`NEWLINE_MARKER`] (`\n`) for a line followed by a newline
//! - [`EOS_MARKER`] (`\0`) for the last line of a value
//!
//! A line that ends with `\n\n` or `\0\0` in the output therefore denotes the
//! literal text `\n` or `\0` followed by the marker.

use std::iter::FusedIterator;

/// Marker rendered in place of a newline character.
pub const NEWLINE_MARKER: &str = "\\n";

/// Marker rendered at the end of a value.
pub const EOS_MARKER: &str = "\\0";

/// Marker rendered in place of a carriage return.
pub const LINEFEED_MARKER: &str = "\\r";

/// How a [`Line`] ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// The line is followed by a `\n` character.
    Newline,
    /// The line is the last line of a complete value.
    EndOfString,
    /// The line is the last line of a fragment and may continue in the next one.
    Open,
}

impl LineEnding {
    /// The visible marker for this ending.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Newline => NEWLINE_MARKER,
            Self::EndOfString => EOS_MARKER,
            Self::Open => "",
        }
    }
}

/// A single line produced by [`Lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line's text without its terminator.
    pub text: &'a str,
    /// How the line ends.
    pub ending: LineEnding,
}

impl Line<'_> {
    /// Renders the line with carriage returns and its ending made visible.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = self.text.replace('\r', LINEFEED_MARKER);
        rendered.push_str(self.ending.marker());
        rendered
    }

    /// Returns `true` if the line has no text and no visible ending.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.ending == LineEnding::Open
    }
}

/// Single-pass iterator over the lines of a string.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: Option<&'a str>,
    last: LineEnding,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match rest.find('\n') {
            Some(index) => {
                self.rest = Some(&rest[index + 1..]);
                Some(Line {
                    text: &rest[..index],
                    ending: LineEnding::Newline,
                })
            }
            None => {
                self.rest = None;
                Some(Line {
                    text: rest,
                    ending: self.last,
                })
            }
        }
    }
}

impl FusedIterator for Lines<'_> {}

/// Splits a complete value. The last line ends with [`LineEnding::EndOfString`].
///
/// An empty string yields exactly one empty line.
pub fn split_value(value: &str) -> Lines<'_> {
    Lines {
        rest: Some(value),
        last: LineEnding::EndOfString,
    }
}

/// Splits a fragment of a value. The last line ends with [`LineEnding::Open`].
pub fn split_chunk(chunk: &str) -> Lines<'_> {
    Lines {
        rest: Some(chunk),
        last: LineEnding::Open,
    }
}

/// Returns `value` with its end-of-string marker appended.
///
/// Both sides of a diff are terminated before comparison so that trailing
/// whitespace lines up against a visible marker.
pub fn terminate(value: &str) -> String {
    split_value(value).fold(String::with_capacity(value.len() + EOS_MARKER.len()), |mut out, line| {
        out.push_str(line.text);
        match line.ending {
            LineEnding::Newline => out.push('\n'),
            LineEnding::EndOfString => out.push_str(EOS_MARKER),
            LineEnding::Open => {}
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_one_terminal_line() {
        let lines: Vec<_> = split_value("").collect();
        assert_eq!(
            lines,
            vec![Line {
                text: "",
                ending: LineEnding::EndOfString
            }]
        );
        assert_eq!(lines[0].render(), EOS_MARKER);
    }

    #[test]
    fn trailing_newline_yields_empty_last_line() {
        let endings: Vec<_> = split_value("a\n").map(|line| line.ending).collect();
        assert_eq!(endings, vec![LineEnding::Newline, LineEnding::EndOfString]);
    }

    #[test]
    fn chunk_ends_open() {
        let lines: Vec<_> = split_chunk("ab\ncd").collect();
        assert_eq!(lines[1].ending, LineEnding::Open);
        assert_eq!(lines[0].render(), "ab\\n");
    }

    #[test]
    fn carriage_return_is_visible() {
        let line = split_chunk("a\rb").next();
        assert_eq!(line.map(|l| l.render()).as_deref(), Some("a\\rb"));
    }

    #[test]
    fn terminate_appends_marker() {
        assert_eq!(terminate("x\ny"), "x\ny\\0");
        assert_eq!(terminate(""), "\\0");
    }
}
