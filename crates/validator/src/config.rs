//! Validator configuration.
//!
//! A [`Configuration`] is an immutable value. Every `with_*` method returns
//! a modified copy, so validators that start from the same configuration
//! never observe each other's changes.
//!
//! # Defaults
//!
//! | Setting | Default |
//! |---------|---------|
//! | `clean_stack_trace` | `true` |
//! | `allow_diff` | `true` |
//! | `equality_method` | [`EqualityMethod::Object`] |
//! | `record_stacktrace` | `true` |
//! | `throw_on_failure` | `true` |
//! | `exception_transformer` | identity |
//! | `string_mappers` | [`StringMappers::default`] |

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::mappers::StringMappers;

/// Substitutes the error produced by a failed check.
pub type ExceptionTransformer = Arc<dyn Fn(ValidationError) -> ValidationError + Send + Sync>;

/// How values are compared for equality.
///
/// Rust requires `partial_cmp` to agree with `==`, so both methods give the
/// same answer for well-behaved types. Validators for types where they differ
/// may consult this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityMethod {
    /// Compare with `PartialEq`.
    #[default]
    Object,
    /// Compare with `PartialOrd`, treating `Ordering::Equal` as equal.
    Comparable,
}

impl EqualityMethod {
    /// Compares two values using this method.
    pub fn equals<T: PartialOrd<E> + ?Sized, E: ?Sized>(self, actual: &T, expected: &E) -> bool {
        match self {
            Self::Object => actual == expected,
            Self::Comparable => actual.partial_cmp(expected) == Some(std::cmp::Ordering::Equal),
        }
    }
}

/// Behavior shared by every validator created from the same factory.
#[derive(Clone)]
pub struct Configuration {
    clean_stack_trace: bool,
    allow_diff: bool,
    equality_method: EqualityMethod,
    record_stacktrace: bool,
    throw_on_failure: bool,
    exception_transformer: ExceptionTransformer,
    string_mappers: StringMappers,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            clean_stack_trace: true,
            allow_diff: true,
            equality_method: EqualityMethod::Object,
            record_stacktrace: true,
            throw_on_failure: true,
            exception_transformer: Arc::new(|error: ValidationError| error),
            string_mappers: StringMappers::default(),
        }
    }
}

impl Configuration {
    /// Returns `true` if stack traces omit frames from this library.
    pub fn clean_stack_trace(&self) -> bool {
        self.clean_stack_trace
    }

    /// Returns `true` if failure messages may include a diff.
    pub fn allow_diff(&self) -> bool {
        self.allow_diff
    }

    /// The equality method used by ordered comparisons.
    pub fn equality_method(&self) -> EqualityMethod {
        self.equality_method
    }

    /// Returns `true` if failures capture a backtrace.
    pub fn record_stacktrace(&self) -> bool {
        self.record_stacktrace
    }

    /// Returns `true` if a failed check reports immediately rather than
    /// recording the failure.
    pub fn throw_on_failure(&self) -> bool {
        self.throw_on_failure
    }

    /// The function applied to every produced error.
    pub fn exception_transformer(&self) -> &ExceptionTransformer {
        &self.exception_transformer
    }

    /// The table that renders context values.
    pub fn string_mappers(&self) -> &StringMappers {
        &self.string_mappers
    }

    /// Sets whether stack traces omit frames from this library.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_clean_stack_trace(mut self, clean_stack_trace: bool) -> Self {
        self.clean_stack_trace = clean_stack_trace;
        self
    }

    /// Sets whether failure messages may include a diff.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_allow_diff(mut self, allow_diff: bool) -> Self {
        self.allow_diff = allow_diff;
        self
    }

    /// Sets the equality method.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_equality_method(mut self, equality_method: EqualityMethod) -> Self {
        self.equality_method = equality_method;
        self
    }

    /// Sets whether failures capture a backtrace.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_record_stacktrace(mut self, record_stacktrace: bool) -> Self {
        self.record_stacktrace = record_stacktrace;
        self
    }

    /// Sets whether a failed check reports immediately.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_throw_on_failure(mut self, throw_on_failure: bool) -> Self {
        self.throw_on_failure = throw_on_failure;
        self
    }

    /// Sets the function applied to every produced error.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let configuration = Configuration::default()
    ///     .with_exception_transformer(|error| ValidationError::custom(MyError::from(error)));
    /// ```
    #[must_use = "builder methods must be chained or built"]
    pub fn with_exception_transformer(
        mut self,
        transformer: impl Fn(ValidationError) -> ValidationError + Send + Sync + 'static,
    ) -> Self {
        self.exception_transformer = Arc::new(transformer);
        self
    }

    /// Sets the table that renders context values.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_string_mappers(mut self, string_mappers: StringMappers) -> Self {
        self.string_mappers = string_mappers;
        self
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("clean_stack_trace", &self.clean_stack_trace)
            .field("allow_diff", &self.allow_diff)
            .field("equality_method", &self.equality_method)
            .field("record_stacktrace", &self.record_stacktrace)
            .field("throw_on_failure", &self.throw_on_failure)
            .field("string_mappers", &self.string_mappers)
            .finish_non_exhaustive()
    }
}
