//! Validator factories.
//!
//! A [`Validators`] factory holds the configuration and context shared by
//! the validators it creates. Each validator receives its own copy, so
//! later changes to the factory or to a validator never leak into another.
//!
//! ```rust,ignore
//! let validators = Validators::new()
//!     .with_context("r-42".to_string(), "request_id")
//!     .update_configuration(|configuration| configuration.with_allow_diff(false));
//!
//! validators.require_that(port, "port").is_between(1, 65_536)?;
//! ```

use std::sync::{Arc, LazyLock};

use requisite_diff::{GlobalConfiguration, TerminalEncoding};

use crate::config::Configuration;
use crate::mappers::ContextValue;
use crate::policy::{Assert, Check, Require};
use crate::validator::{Context, Validator, require_valid_name};

static DEFAULT: LazyLock<Validators> = LazyLock::new(Validators::new);

/// Creates validators that share a configuration and context.
#[derive(Debug, Clone, Default)]
pub struct Validators {
    configuration: Configuration,
    encoding: Option<TerminalEncoding>,
    context: Context,
}

impl Validators {
    /// A factory with the default configuration and no context.
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration given to new validators.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Replaces the configuration given to new validators.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Derives the configuration given to new validators from the current
    /// one.
    #[must_use = "builder methods must be chained or built"]
    pub fn update_configuration(mut self, update: impl FnOnce(Configuration) -> Configuration) -> Self {
        self.configuration = update(self.configuration);
        self
    }

    /// Adds a context entry to every validator created afterwards.
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

    /// The context given to new validators.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Pins the encoding of diffs, ignoring the process-wide setting.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_terminal_encoding(mut self, encoding: TerminalEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// The encoding new validators render diffs with.
    pub fn terminal_encoding(&self) -> TerminalEncoding {
        self.encoding.unwrap_or_else(GlobalConfiguration::terminal_encoding)
    }

    /// Validates a precondition. Failed checks return their error.
    #[track_caller]
    pub fn require_that<T>(&self, value: T, name: impl Into<String>) -> Validator<T, Require> {
        self.create(value, name.into(), self.configuration.clone())
    }

    /// Validates an invariant. Failed checks panic.
    ///
    /// Backtraces keep the frames of this library.
    #[track_caller]
    pub fn assert_that<T>(&self, value: T, name: impl Into<String>) -> Validator<T, Assert> {
        let configuration = self.configuration.clone().with_clean_stack_trace(false);
        self.create(value, name.into(), configuration)
    }

    /// Validates without failing. Failures are recorded until the caller
    /// asks for them.
    #[track_caller]
    pub fn check_if<T>(&self, value: T, name: impl Into<String>) -> Validator<T, Check> {
        let configuration = self.configuration.clone().with_throw_on_failure(false);
        self.create(value, name.into(), configuration)
    }

    #[track_caller]
    fn create<T, P>(&self, value: T, name: String, configuration: Configuration) -> Validator<T, P>
    where
        P: crate::policy::FailurePolicy,
    {
        Validator::new(value, name, configuration, self.terminal_encoding(), self.context.clone())
    }
}

/// Validates a precondition using the default factory.
///
/// # Examples
///
/// ```rust,ignore
/// fn connect(port: u16) -> Result<(), ValidationError> {
///     require_that(port, "port").is_greater_than(1023_u16)?;
///     Ok(())
/// }
/// ```
#[track_caller]
pub fn require_that<T>(value: T, name: impl Into<String>) -> Validator<T, Require> {
    DEFAULT.require_that(value, name)
}

/// Validates an invariant using the default factory.
#[track_caller]
pub fn assert_that<T>(value: T, name: impl Into<String>) -> Validator<T, Assert> {
    DEFAULT.assert_that(value, name)
}

/// Validates without failing, using the default factory.
#[track_caller]
pub fn check_if<T>(value: T, name: impl Into<String>) -> Validator<T, Check> {
    DEFAULT.check_if(value, name)
}
