//! Recorded validation failures.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

use crate::config::{Configuration, ExceptionTransformer};
use crate::error::{FailureKind, MultipleFailuresError, ValidationError};

/// Symbol prefixes of frames that belong to this library.
const INTERNAL_FRAMES: [&str; 3] = [
    concat!(env!("CARGO_CRATE_NAME"), "::"),
    concat!("<", env!("CARGO_CRATE_NAME"), "::"),
    "std::backtrace::",
];

/// One failed check.
///
/// The message is fully rendered when the failure is created. The error is
/// produced on demand by passing a fresh [`ValidationError`] through the
/// configured exception transformer.
#[derive(Clone)]
pub struct ValidationFailure {
    kind: FailureKind,
    message: Arc<str>,
    backtrace: Option<Arc<Backtrace>>,
    clean_backtrace: bool,
    transformer: ExceptionTransformer,
}

impl ValidationFailure {
    /// Creates a failure, capturing a backtrace if the configuration asks for
    /// one.
    pub fn new(configuration: &Configuration, kind: FailureKind, message: impl Into<String>) -> Self {
        let backtrace = configuration
            .record_stacktrace()
            .then(|| Arc::new(Backtrace::capture()));
        Self {
            kind,
            message: message.into().into(),
            backtrace,
            clean_backtrace: configuration.clean_stack_trace(),
            transformer: Arc::clone(configuration.exception_transformer()),
        }
    }

    /// The kind of the failed check.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The rendered failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error this failure reports.
    pub fn error(&self) -> ValidationError {
        let error = ValidationError::new(self.kind, self.message.as_ref());
        match (self.transformer)(error) {
            ValidationError::Custom { type_name, source } => match source.downcast::<crate::error::WrappedError>() {
                Ok(wrapped) => wrapped.into_error(),
                Err(source) => ValidationError::Custom { type_name, source },
            },
            other => other,
        }
    }

    /// The captured backtrace, or `None` if none was recorded.
    ///
    /// When stack-trace cleaning is enabled, frames inside this library are
    /// omitted.
    pub fn backtrace(&self) -> Option<String> {
        let backtrace = self.backtrace.as_ref()?;
        if backtrace.status() != BacktraceStatus::Captured {
            return None;
        }
        let rendered = backtrace.to_string();
        if self.clean_backtrace {
            Some(clean_backtrace(&rendered))
        } else {
            Some(rendered)
        }
    }
}

impl fmt::Debug for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationFailure")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

fn clean_backtrace(rendered: &str) -> String {
    let mut cleaned = String::with_capacity(rendered.len());
    let mut keep = true;
    for line in rendered.lines() {
        let trimmed = line.trim_start();
        if let Some((index, symbol)) = trimmed.split_once(": ")
            && !index.is_empty()
            && index.bytes().all(|b| b.is_ascii_digit())
        {
            keep = !INTERNAL_FRAMES.iter().any(|prefix| symbol.starts_with(prefix));
        }
        if keep {
            cleaned.push_str(line);
            cleaned.push('\n');
        }
    }
    cleaned
}

/// An ordered list of failures.
#[derive(Debug, Clone, Default)]
pub struct ValidationFailures {
    failures: Vec<ValidationFailure>,
}

impl ValidationFailures {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a failure.
    pub fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// Appends every failure of `other`, keeping their order.
    pub fn add_all(&mut self, other: Self) {
        self.failures.extend(other.failures);
    }

    /// Returns `true` if no check failed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// The failures, in the order they were recorded.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// The message of every failure.
    pub fn messages(&self) -> Vec<String> {
        self.failures.iter().map(|failure| failure.message().to_owned()).collect()
    }

    /// The error that summarizes these failures.
    ///
    /// - no failures: `None`
    /// - one failure: that failure's error
    /// - more: [`ValidationError::Multiple`]
    pub fn error(&self) -> Option<ValidationError> {
        match self.failures.as_slice() {
            [] => None,
            [failure] => Some(failure.error()),
            failures => Some(ValidationError::Multiple(MultipleFailuresError::new(failures.to_vec()))),
        }
    }

    /// Returns `Ok` if no check failed, otherwise the summarizing error.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.error() {
            None => Ok(()),
            Some(error) => Err(error),
        }
    }
}

impl IntoIterator for ValidationFailures {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl FromIterator<ValidationFailure> for ValidationFailures {
    fn from_iter<I: IntoIterator<Item = ValidationFailure>>(iter: I) -> Self {
        Self {
            failures: iter.into_iter().collect(),
        }
    }
}
