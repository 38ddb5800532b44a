//! Errors produced by failed validations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::failure::ValidationFailure;

/// A boxed error of any type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The category of a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// The value does not satisfy the check.
    InvalidArgument,
    /// A required value is missing.
    NullValue,
    /// The value is valid but the surrounding state is not.
    IllegalState,
    /// An invariant checked with `assert_that` does not hold.
    Assertion,
}

impl FailureKind {
    /// The name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "InvalidArgument",
            Self::NullValue => "NullValue",
            Self::IllegalState => "IllegalState",
            Self::Assertion => "Assertion",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error reported by a failed validation.
///
/// The message of every variant is the complete failure text, including any
/// context and diff.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The value does not satisfy the check.
    #[error("{message}")]
    InvalidArgument {
        /// The failure message.
        message: String,
    },

    /// A required value is missing.
    #[error("{message}")]
    NullValue {
        /// The failure message.
        message: String,
    },

    /// The value is valid but the surrounding state is not.
    #[error("{message}")]
    IllegalState {
        /// The failure message.
        message: String,
    },

    /// An invariant checked with `assert_that` does not hold.
    #[error("{message}")]
    Assertion {
        /// The failure message.
        message: String,
        /// The error the assertion was raised for.
        #[source]
        cause: Option<Box<ValidationError>>,
    },

    /// More than one deferred check failed.
    #[error(transparent)]
    Multiple(#[from] MultipleFailuresError),

    /// An error substituted by an exception transformer.
    #[error("{source}")]
    Custom {
        /// The name of the substituted error's type.
        type_name: &'static str,
        /// The substituted error.
        source: BoxError,
    },
}

impl ValidationError {
    /// Creates an error of the given kind.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            FailureKind::InvalidArgument => Self::InvalidArgument { message },
            FailureKind::NullValue => Self::NullValue { message },
            FailureKind::IllegalState => Self::IllegalState { message },
            FailureKind::Assertion => Self::Assertion {
                message,
                cause: None,
            },
        }
    }

    /// Wraps an error of any type.
    ///
    /// A [`WrappedError`] is unwrapped, and a `ValidationError` is returned
    /// as is.
    pub fn custom<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let boxed: BoxError = Box::new(error);
        let boxed = match boxed.downcast::<Self>() {
            Ok(error) => return *error,
            Err(other) => other,
        };
        match boxed.downcast::<WrappedError>() {
            Ok(wrapped) => wrapped.into_error(),
            Err(source) => Self::Custom {
                type_name: std::any::type_name::<E>(),
                source,
            },
        }
    }

    /// Converts this error into an [`Assertion`](Self::Assertion).
    pub fn into_assertion(self) -> Self {
        match self {
            Self::Assertion { .. } => self,
            other => Self::Assertion {
                message: other.to_string(),
                cause: Some(Box::new(other)),
            },
        }
    }

    /// The kind of the failed check, if this error came from a single check.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::InvalidArgument { .. } => Some(FailureKind::InvalidArgument),
            Self::NullValue { .. } => Some(FailureKind::NullValue),
            Self::IllegalState { .. } => Some(FailureKind::IllegalState),
            Self::Assertion { .. } => Some(FailureKind::Assertion),
            Self::Multiple(_) | Self::Custom { .. } => None,
        }
    }

    /// The name of the error's type, as listed by [`MultipleFailuresError`].
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Multiple(_) => "MultipleFailures",
            Self::Custom { type_name, .. } => *type_name,
            _ => self.kind().map_or("ValidationError", FailureKind::as_str),
        }
    }

    /// The failure message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns the substituted error if it has type `E`.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Custom { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Carries an error through a transformer that must return a
/// [`ValidationError`].
///
/// Failures unwrap it again, so callers observe the wrapped error itself.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct WrappedError {
    type_name: &'static str,
    source: BoxError,
}

impl WrappedError {
    /// Wraps an error.
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            type_name: std::any::type_name::<E>(),
            source: Box::new(error),
        }
    }

    /// Unwraps into the carried error.
    pub fn into_error(self) -> ValidationError {
        match self.source.downcast::<ValidationError>() {
            Ok(error) => *error,
            Err(source) => ValidationError::Custom {
                type_name: self.type_name,
                source,
            },
        }
    }
}

/// Two or more failures of deferred checks.
///
/// The message numbers every failure in the order it was recorded.
#[derive(Debug, Clone)]
pub struct MultipleFailuresError {
    failures: Vec<ValidationFailure>,
}

impl MultipleFailuresError {
    pub(crate) fn new(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }

    /// The aggregated failures.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// The errors of the aggregated failures, in order.
    pub fn errors(&self) -> Vec<ValidationError> {
        self.failures.iter().map(ValidationFailure::error).collect()
    }
}

impl fmt::Display for MultipleFailuresError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation failures occurred.", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            let error = failure.error();
            write!(f, "\n\n{}. {}\n{}", i + 1, error.type_name(), error)?;
        }
        Ok(())
    }
}

impl std::error::Error for MultipleFailuresError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn custom_unwraps_wrapped_errors() {
        let error = ValidationError::custom(WrappedError::new(DiskError));
        assert!(error.downcast_ref::<DiskError>().is_some());
        assert!(error.type_name().ends_with("DiskError"));
    }

    #[test]
    fn custom_does_not_nest_validation_errors() {
        let inner = ValidationError::new(FailureKind::NullValue, "missing");
        let error = ValidationError::custom(inner);
        assert_eq!(error.kind(), Some(FailureKind::NullValue));
    }

    #[test]
    fn assertion_keeps_cause() {
        let error = ValidationError::new(FailureKind::InvalidArgument, "bad").into_assertion();
        assert_eq!(error.kind(), Some(FailureKind::Assertion));
        assert_eq!(error.to_string(), "bad");
        assert!(std::error::Error::source(&error).is_some());
    }
}
