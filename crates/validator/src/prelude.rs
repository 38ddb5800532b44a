//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use requisite_validator::prelude::*;
//!
//! require_that(port, "port").is_greater_than(1023_u16)?;
//! ```

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub use crate::factory::{Validators, assert_that, check_if, require_that};
pub use crate::policy::{Assert, Check, FailurePolicy, Require};
pub use crate::validator::Validator;

// ============================================================================
// CONFIGURATION AND ERRORS
// ============================================================================

pub use crate::config::{Configuration, EqualityMethod};
pub use crate::error::{FailureKind, MultipleFailuresError, ValidationError, WrappedError};
pub use crate::failure::{ValidationFailure, ValidationFailures};
pub use crate::mappers::{ContextValue, StringMappers, Subject};

// ============================================================================
// MESSAGES
// ============================================================================

pub use crate::ambient::AmbientContext;
pub use crate::message::MessageBuilder;
pub use requisite_diff::TerminalEncoding;
