//! Failure message builder.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use requisite_diff::TerminalEncoding;

use super::context::{Comparison, ContextGenerator, Operand, Rendered, require_distinct_names};
use super::section::{MessageSection, render_sections};
use crate::config::Configuration;
use crate::mappers::{ContextValue, Subject};
use crate::policy::FailurePolicy;
use crate::validator::{Context, Validator, require_valid_name};

/// Builds the message of one failed check.
///
/// Context is resolved when the message is rendered. A key added with
/// [`with_context`](Self::with_context) wins over the same key on the
/// validator, which wins over the ambient context.
///
/// # Examples
///
/// ```rust,ignore
/// let message = MessageBuilder::new(&validator, "\"count\" must be less than 3.")
///     .with_context(3, "maximum")
///     .build();
/// ```
#[derive(Clone)]
pub struct MessageBuilder {
    message: String,
    configuration: Configuration,
    encoding: TerminalEncoding,
    inherited: Context,
    context: Context,
    comparison: Option<Comparison>,
}

impl MessageBuilder {
    /// Starts a message for a check on `validator`'s value.
    ///
    /// # Panics
    ///
    /// In debug builds, if `message` is blank or does not end with a period.
    pub fn new<T, P: FailurePolicy>(validator: &Validator<T, P>, message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(
            message.is_empty() || !message.trim().is_empty(),
            "message may not be blank"
        );
        debug_assert!(
            message.is_empty() || message.ends_with('.'),
            "message must end with a period: {message}"
        );
        Self {
            message,
            configuration: validator.configuration().clone(),
            encoding: validator.terminal_encoding(),
            inherited: validator.context(),
            context: Context::new(),
            comparison: None,
        }
    }

    /// Adds a context entry that only this message shows.
    ///
    /// # Panics
    ///
    /// If `name` is empty or contains whitespace or a colon.
    #[track_caller]
    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(mut self, value: impl ContextValue, name: impl Into<String>) -> Self {
        let name = name.into();
        require_valid_name(&name);
        let value: Arc<dyn ContextValue> = Arc::new(value);
        self.context.insert(name, value);
        self
    }

    /// Compares two values in the message.
    ///
    /// Shows a character-level diff, or plain entries when diffs are
    /// disabled or either value is a `bool`.
    ///
    /// # Panics
    ///
    /// If a name is invalid, the names are equal, or either is `diff`.
    #[track_caller]
    #[must_use = "builder methods must be chained or built"]
    pub fn add_diff(
        mut self,
        actual_name: impl Into<String>,
        actual: &dyn Subject,
        expected_name: impl Into<String>,
        expected: &dyn ContextValue,
    ) -> Self {
        let (actual_name, expected_name) = (actual_name.into(), expected_name.into());
        require_distinct_names(&actual_name, &expected_name);
        let mappers = self.configuration.string_mappers();
        self.comparison = Some(Comparison::Values {
            actual_name,
            actual: Operand::subject(actual, mappers),
            expected_name,
            expected: Operand::new(expected, mappers),
        });
        self
    }

    /// Compares two lists element by element.
    ///
    /// Elements are keyed `name[index]`. Runs of equal elements between the
    /// first and last element are collapsed. An element only one list has
    /// is shown opposite the bare name of the other list.
    ///
    /// # Panics
    ///
    /// If a name is invalid, the names are equal, or either is `diff`.
    #[track_caller]
    #[must_use = "builder methods must be chained or built"]
    pub fn add_list_diff<A, E>(
        mut self,
        actual_name: impl Into<String>,
        actual: &[A],
        expected_name: impl Into<String>,
        expected: &[E],
    ) -> Self
    where
        A: ContextValue,
        E: ContextValue,
    {
        let (actual_name, expected_name) = (actual_name.into(), expected_name.into());
        require_distinct_names(&actual_name, &expected_name);
        let mappers = self.configuration.string_mappers();
        self.comparison = Some(Comparison::Lists {
            actual_name,
            actual: actual.iter().map(|value| Operand::new(value, mappers)).collect(),
            expected_name,
            expected: expected.iter().map(|value| Operand::new(value, mappers)).collect(),
        });
        self
    }

    /// Renders the message.
    pub fn build(&self) -> String {
        let mappers = self.configuration.string_mappers();
        let mut entries: IndexMap<String, String> = self
            .context
            .iter()
            .map(|(name, value)| (name.clone(), mappers.render(&**value)))
            .collect();

        let mut diff = Vec::new();
        if let Some(comparison) = &self.comparison {
            match ContextGenerator::new(self.encoding, self.configuration.allow_diff()).render(comparison) {
                Rendered::Inline(inline) => {
                    for (name, value) in inline {
                        entries.entry(name).or_insert(value);
                    }
                }
                Rendered::Sections(sections) => diff = sections,
            }
        }
        for (name, value) in &self.inherited {
            entries
                .entry(name.clone())
                .or_insert_with(|| mappers.render(&**value));
        }

        let mut sections = Vec::new();
        if !entries.is_empty() {
            sections.push(MessageSection::Context(entries));
        }
        if !diff.is_empty() {
            if !sections.is_empty() || !self.message.is_empty() {
                sections.push(MessageSection::Text(String::new()));
            }
            sections.extend(diff);
        }

        if sections.is_empty() {
            return strip_period(&self.message);
        }
        let body = render_sections(&sections);
        if self.message.is_empty() {
            body
        } else {
            format!("{}\n{body}", self.message)
        }
    }
}

impl fmt::Display for MessageBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

impl fmt::Debug for MessageBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuilder")
            .field("message", &self.message)
            .field("encoding", &self.encoding)
            .field("context", &self.context.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// A message that stands alone reads as a phrase: the trailing period goes,
/// unless a comma makes it a sentence.
fn strip_period(message: &str) -> String {
    if message.contains('\n') || message.contains(',') {
        return message.to_owned();
    }
    message.strip_suffix('.').unwrap_or(message).to_owned()
}

#[cfg(test)]
mod tests {
    use super::strip_period;

    #[test]
    fn lone_messages_lose_their_period() {
        assert_eq!(strip_period("\"value\" may not be null."), "\"value\" may not be null");
        assert_eq!(strip_period("\"a\" must be 1, or 2."), "\"a\" must be 1, or 2.");
        assert_eq!(strip_period(""), "");
    }
}
