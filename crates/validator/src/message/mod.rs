//! Failure message assembly.
//!
//! A failure message has up to three parts, separated by newlines:
//!
//! 1. a one-line statement, such as `"count" must be less than 3.`
//! 2. a context block of aligned `key: value` lines
//! 3. a diff block comparing the actual and expected values, followed by a
//!    legend when the diff uses textual markers
//!
//! [`MessageBuilder`] is the entry point. [`MessageSection`] is the
//! intermediate form used to align keys across blocks.

mod builder;
mod context;
mod section;

pub use builder::MessageBuilder;
pub use context::DIFF_LEGEND;
pub(crate) use context::require_distinct_names;
pub use section::{MessageSection, render_sections};

/// Quotes a value name for use in a message.
///
/// Names that contain a `.` refer to a member of another value
/// (`user.name`) and are left as is.
pub fn quote_name(name: &str) -> String {
    if name.contains('.') {
        name.to_owned()
    } else {
        format!("\"{name}\"")
    }
}
