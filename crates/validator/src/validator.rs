//! The validator: a named value plus the failures of the checks run on it.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexMap;
use requisite_diff::TerminalEncoding;

use crate::ambient::AmbientContext;
use crate::config::Configuration;
use crate::error::{FailureKind, ValidationError};
use crate::failure::{ValidationFailure, ValidationFailures};
use crate::mappers::ContextValue;
use crate::policy::{Check, FailurePolicy, Require};

/// Named values attached to failure messages, in insertion order.
pub type Context = IndexMap<String, Arc<dyn ContextValue>>;

/// Panics unless `name` can be used as a value or context name.
#[track_caller]
pub(crate) fn require_valid_name(name: &str) {
    assert!(!name.is_empty(), "name may not be empty");
    assert!(
        !name.chars().any(char::is_whitespace),
        "name may not contain whitespace: {name:?}"
    );
    assert!(!name.contains(':'), "name may not contain a colon: {name:?}");
}

/// A value under validation.
///
/// Created by [`Validators`](crate::Validators) or the module-level
/// [`require_that`](crate::require_that), [`assert_that`](crate::assert_that)
/// and [`check_if`](crate::check_if). The policy `P` decides what a failed
/// check does; see [`policy`](crate::policy).
pub struct Validator<T, P = Require> {
    value: T,
    name: String,
    configuration: Configuration,
    encoding: TerminalEncoding,
    context: Context,
    failures: ValidationFailures,
    _policy: PhantomData<P>,
}

impl<T, P: FailurePolicy> Validator<T, P> {
    #[track_caller]
    pub(crate) fn new(
        value: T,
        name: String,
        configuration: Configuration,
        encoding: TerminalEncoding,
        context: Context,
    ) -> Self {
        require_valid_name(&name);
        Self {
            value,
            name,
            configuration,
            encoding,
            context,
            failures: ValidationFailures::new(),
            _policy: PhantomData,
        }
    }

    /// The value under validation.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the validator, returning the value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// The name of the value.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configuration the validator was created with.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The encoding diffs in failure messages are rendered with.
    pub fn terminal_encoding(&self) -> TerminalEncoding {
        self.encoding
    }

    /// Adds a context entry to every later failure of this validator.
    ///
    /// An entry with the same name, including one inherited from the
    /// factory, is replaced.
    ///
    /// # Panics
    ///
    /// If `name` is empty, contains whitespace or a colon, or equals the
    /// validator's name.
    #[track_caller]
    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(mut self, value: impl ContextValue, name: impl Into<String>) -> Self {
        let name = name.into();
        require_valid_name(&name);
        assert!(
            name != self.name,
            "context name may not be equal to the name of the value: {name:?}"
        );
        let value: Arc<dyn ContextValue> = Arc::new(value);
        self.context.insert(name, value);
        self
    }

    /// The context of this validator, with the ambient context of the
    /// current thread folded in at the lowest precedence.
    pub fn context(&self) -> Context {
        let mut context = self.context.clone();
        for (name, value) in AmbientContext::snapshot() {
            context.entry(name).or_insert(value);
        }
        context
    }

    /// The failures recorded so far.
    pub fn failures(&self) -> &ValidationFailures {
        &self.failures
    }

    pub(crate) fn record(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    pub(crate) fn pass(self) -> P::Outcome<T> {
        P::pass(self)
    }

    /// Reports a failed check with an already rendered message.
    #[track_caller]
    pub(crate) fn fail(mut self, kind: FailureKind, message: String) -> P::Outcome<T> {
        let failure = ValidationFailure::new(&self.configuration, kind, message);
        tracing::trace!(name = %self.name, %kind, "validation failed");
        if self.configuration.throw_on_failure() {
            P::raise(self, failure)
        } else {
            self.record(failure);
            P::pass(self)
        }
    }
}

impl<T> Validator<T, Check> {
    /// Appends the failures of another deferred validator to this one.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// check_if(&name, "name").is_not_empty()
    ///     .and(check_if(age, "age").is_greater_than(0))
    ///     .else_throw()?;
    /// ```
    #[must_use = "the combined failures are only reported by the returned validator"]
    pub fn and<U>(mut self, other: Validator<U, Check>) -> Self {
        self.failures.add_all(other.failures);
        self
    }

    /// Returns the error summarizing every recorded failure, if any.
    pub fn else_throw(self) -> Result<(), ValidationError> {
        self.failures.into_result()
    }

    /// The messages of every recorded failure.
    pub fn else_get_messages(&self) -> Vec<String> {
        self.failures.messages()
    }

    /// The recorded failures.
    pub fn else_get_failures(&self) -> &ValidationFailures {
        &self.failures
    }

    /// Consumes the validator, returning the recorded failures.
    pub fn into_failures(self) -> ValidationFailures {
        self.failures
    }

    /// The error that [`else_throw`](Self::else_throw) would return.
    pub fn else_get_error(&self) -> Option<ValidationError> {
        self.failures.error()
    }
}

impl<T: fmt::Debug, P> fmt::Debug for Validator<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("policy", &std::any::type_name::<P>())
            .field("failures", &self.failures.len())
            .finish_non_exhaustive()
    }
}
