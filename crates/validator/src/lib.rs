//! # requisite-validator
//!
//! Fluent precondition, postcondition and invariant checks with descriptive
//! failure messages.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use requisite_validator::prelude::*;
//!
//! fn open(path: Option<PathBuf>, retries: u32) -> Result<(), ValidationError> {
//!     require_that(path, "path").is_not_null()?;
//!     require_that(retries, "retries").is_less_than(10_u32)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Policies
//!
//! - [`require_that`]: a failed check returns its error, chain with `?`
//! - [`assert_that`]: a failed check panics
//! - [`check_if`]: failures are recorded and reported together
//!
//! ```rust,ignore
//! check_if(name, "name").is_not_empty()
//!     .and(check_if(age, "age").is_between(0, 150))
//!     .else_throw()?;
//! ```
//!
//! ## Messages
//!
//! A failure message starts with a one-line statement, followed by aligned
//! context entries and, for unequal values, a diff:
//!
//! ```text
//! "actual" had an unexpected value.
//!
//! actual  : "The dog    is br own"\0
//! diff    : =====---+++====--+======
//! expected: "The    fox is   down"\0
//! ```
//!
//! Diffs are colored when the terminal supports it; see
//! [`TerminalEncoding`](requisite_diff::TerminalEncoding).

#![forbid(unsafe_code)]

pub mod ambient;
pub mod checks;
pub mod config;
pub mod error;
pub mod factory;
pub mod failure;
#[cfg(feature = "json")]
mod json;
pub mod mappers;
pub mod message;
pub mod policy;
pub mod prelude;
pub mod validator;

pub use ambient::{AmbientContext, AmbientGuard};
pub use config::{Configuration, EqualityMethod, ExceptionTransformer};
pub use error::{BoxError, FailureKind, MultipleFailuresError, ValidationError, WrappedError};
pub use factory::{Validators, assert_that, check_if, require_that};
pub use failure::{ValidationFailure, ValidationFailures};
pub use mappers::{ContextValue, StringMapper, StringMappers, Subject};
pub use message::{MessageBuilder, MessageSection};
pub use policy::{Assert, Check, FailurePolicy, Require};
pub use validator::{Context, Validator};
