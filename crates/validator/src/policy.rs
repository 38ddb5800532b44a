//! What a failed check does.
//!
//! | Policy | Entry point | Check returns | On failure |
//! |--------|-------------|---------------|------------|
//! | [`Require`] | `require_that` | `Result<Validator, ValidationError>` | returns `Err` |
//! | [`Assert`] | `assert_that` | `Validator` | panics with an assertion error |
//! | [`Check`] | `check_if` | `Validator` | records the failure |
//!
//! A configuration with `throw_on_failure` disabled records failures under
//! every policy.

use crate::failure::ValidationFailure;
use crate::validator::Validator;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Require {}
    impl Sealed for super::Assert {}
    impl Sealed for super::Check {}
}

/// The failure policy of a [`Validator`].
pub trait FailurePolicy: sealed::Sealed + Sized + 'static {
    /// What a check on a `Validator<T, Self>` returns.
    type Outcome<T>;

    /// Continues the chain after a passing or recorded check.
    fn pass<T>(validator: Validator<T, Self>) -> Self::Outcome<T>;

    /// Reports a failure immediately.
    fn raise<T>(validator: Validator<T, Self>, failure: ValidationFailure) -> Self::Outcome<T>;
}

/// Preconditions: a failed check returns its error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Require;

/// Invariants and postconditions: a failed check panics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Assert;

/// Deferred checks: failures are recorded until the caller asks for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Check;

impl FailurePolicy for Require {
    type Outcome<T> = Result<Validator<T, Self>, crate::error::ValidationError>;

    fn pass<T>(validator: Validator<T, Self>) -> Self::Outcome<T> {
        Ok(validator)
    }

    fn raise<T>(_validator: Validator<T, Self>, failure: ValidationFailure) -> Self::Outcome<T> {
        Err(failure.error())
    }
}

impl FailurePolicy for Assert {
    type Outcome<T> = Validator<T, Self>;

    fn pass<T>(validator: Validator<T, Self>) -> Self::Outcome<T> {
        validator
    }

    #[track_caller]
    fn raise<T>(_validator: Validator<T, Self>, failure: ValidationFailure) -> Self::Outcome<T> {
        panic!("{}", failure.error().into_assertion())
    }
}

impl FailurePolicy for Check {
    type Outcome<T> = Validator<T, Self>;

    fn pass<T>(validator: Validator<T, Self>) -> Self::Outcome<T> {
        validator
    }

    fn raise<T>(mut validator: Validator<T, Self>, failure: ValidationFailure) -> Self::Outcome<T> {
        validator.record(failure);
        validator
    }
}
