//! The checks a [`Validator`] offers.
//!
//! Every check consumes the validator and returns the policy's outcome, so
//! checks chain with `?` under [`Require`](crate::policy::Require) and
//! directly under the other policies.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::error::FailureKind;
use crate::mappers::{ContextValue, Subject};
use crate::message::{MessageBuilder, quote_name, require_distinct_names};
use crate::policy::FailurePolicy;
use crate::validator::{Validator, require_valid_name};

/// Values shorter than this, on a single line, are compared without a diff.
pub const MINIMUM_LENGTH_FOR_DIFF: usize = 10;

/// Context key of the value under validation.
const ACTUAL: &str = "actual";

/// Values that can be empty.
pub trait Length {
    /// Number of elements or characters.
    fn length(&self) -> usize;
}

impl Length for String {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl Length for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl<U> Length for Vec<U> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<U> Length for [U] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<U, const N: usize> Length for [U; N] {
    fn length(&self) -> usize {
        N
    }
}

impl<U> Length for VecDeque<U> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Length for HashMap<K, V, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, S> Length for HashSet<K, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> Length for BTreeMap<K, V> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K> Length for BTreeSet<K> {
    fn length(&self) -> usize {
        self.len()
    }
}

// ============================================================================
// Any value
// ============================================================================

impl<L: ?Sized + Length> Length for &L {
    fn length(&self) -> usize {
        (**self).length()
    }
}

impl<L: ?Sized + Length> Length for Box<L> {
    fn length(&self) -> usize {
        (**self).length()
    }
}

impl<T: Subject, P: FailurePolicy> Validator<T, P> {
    /// Ensures the value equals `expected`.
    ///
    /// Long or multiline values are reported with a diff.
    #[track_caller]
    pub fn is_equal_to<E>(self, expected: E) -> P::Outcome<T>
    where
        T: PartialEq<E>,
        E: ContextValue,
    {
        if self.value() == &expected {
            return self.pass();
        }
        let message = self.equality_message(&expected, None);
        self.fail(FailureKind::InvalidArgument, message)
    }

    /// Ensures the value equals `expected`, referring to it as `name`.
    ///
    /// # Panics
    ///
    /// If `name` is not a valid name, or is `actual` or `diff`, which label
    /// the other lines of the comparison.
    #[track_caller]
    pub fn is_equal_to_named<E>(self, expected: E, name: &str) -> P::Outcome<T>
    where
        T: PartialEq<E>,
        E: ContextValue,
    {
        require_distinct_names(ACTUAL, name);
        if self.value() == &expected {
            return self.pass();
        }
        let message = self.equality_message(&expected, Some(name));
        self.fail(FailureKind::InvalidArgument, message)
    }

    /// Ensures the value does not equal `unwanted`.
    #[track_caller]
    pub fn is_not_equal_to<E>(self, unwanted: E) -> P::Outcome<T>
    where
        T: PartialEq<E>,
        E: ContextValue,
    {
        if self.value() != &unwanted {
            return self.pass();
        }
        let unwanted = self.configuration().string_mappers().render(&unwanted);
        let message = MessageBuilder::new(
            &self,
            format!("{} may not be equal to {unwanted}.", quote_name(self.name())),
        )
        .build();
        self.fail(FailureKind::InvalidArgument, message)
    }

    /// Ensures the value does not equal `unwanted`, referring to it as `name`.
    ///
    /// # Panics
    ///
    /// If `name` is empty or contains whitespace or a colon.
    #[track_caller]
    pub fn is_not_equal_to_named<E>(self, unwanted: E, name: &str) -> P::Outcome<T>
    where
        T: PartialEq<E>,
        E: ContextValue,
    {
        require_valid_name(name);
        if self.value() != &unwanted {
            return self.pass();
        }
        let message = MessageBuilder::new(
            &self,
            format!("{} may not be equal to {}.", quote_name(self.name()), quote_name(name)),
        )
        .with_context(unwanted, name.to_owned())
        .build();
        self.fail(FailureKind::InvalidArgument, message)
    }

    /// Ensures the value equals `expected` using the configured
    /// [`EqualityMethod`](crate::EqualityMethod).
    #[track_caller]
    pub fn is_comparable_to<E>(self, expected: E) -> P::Outcome<T>
    where
        T: PartialOrd<E>,
        E: ContextValue,
    {
        if self.configuration().equality_method().equals(self.value(), &expected) {
            return self.pass();
        }
        let message = self.equality_message(&expected, None);
        self.fail(FailureKind::InvalidArgument, message)
    }

    /// Ensures the value is less than `maximum`.
    #[track_caller]
    pub fn is_less_than<E>(self, maximum: E) -> P::Outcome<T>
    where
        T: PartialOrd<E>,
        E: ContextValue,
    {
        if self.value() < &maximum {
            return self.pass();
        }
        self.bound_failure("must be less than", &maximum)
    }

    /// Ensures the value is greater than `minimum`.
    #[track_caller]
    pub fn is_greater_than<E>(self, minimum: E) -> P::Outcome<T>
    where
        T: PartialOrd<E>,
        E: ContextValue,
    {
        if self.value() > &minimum {
            return self.pass();
        }
        self.bound_failure("must be greater than", &minimum)
    }

    /// Ensures `minimum <= value < maximum`.
    #[track_caller]
    pub fn is_between<E>(self, minimum: E, maximum: E) -> P::Outcome<T>
    where
        T: PartialOrd<E>,
        E: ContextValue,
    {
        if self.value() >= &minimum && self.value() < &maximum {
            return self.pass();
        }
        let mappers = self.configuration().string_mappers();
        let range = format!("[{}, {})", mappers.render(&minimum), mappers.render(&maximum));
        let message = MessageBuilder::new(
            &self,
            format!("{} must be in the range {range}.", quote_name(self.name())),
        )
        .with_context(Rendered(self.rendered_value()), ACTUAL)
        .build();
        self.fail(FailureKind::InvalidArgument, message)
    }

    /// Ensures `predicate` holds for the value.
    ///
    /// `requirement` completes the sentence `"<name>" must ...`, for example
    /// `"be even"`.
    #[track_caller]
    pub fn satisfies(self, predicate: impl FnOnce(&T) -> bool, requirement: &str) -> P::Outcome<T> {
        if predicate(self.value()) {
            return self.pass();
        }
        let message = MessageBuilder::new(
            &self,
            format!("{} must {requirement}.", quote_name(self.name())),
        )
        .with_context(Rendered(self.rendered_value()), ACTUAL)
        .build();
        self.fail(FailureKind::InvalidArgument, message)
    }

    fn rendered_value(&self) -> String {
        Subject::render(self.value(), self.configuration().string_mappers())
    }

    fn bound_failure(self, requirement: &str, bound: &dyn ContextValue) -> P::Outcome<T> {
        let bound = self.configuration().string_mappers().render(bound);
        let message = MessageBuilder::new(
            &self,
            format!("{} {requirement} {bound}.", quote_name(self.name())),
        )
        .with_context(Rendered(self.rendered_value()), ACTUAL)
        .build();
        self.fail(FailureKind::InvalidArgument, message)
    }

    fn equality_message(&self, expected: &dyn ContextValue, expected_name: Option<&str>) -> String {
        let mappers = self.configuration().string_mappers();
        let actual_text = self.rendered_value();
        let expected_text = mappers.render(expected);
        let name = quote_name(self.name());

        let short = |text: &str| !text.contains('\n') && text.chars().count() < MINIMUM_LENGTH_FOR_DIFF;
        if !self.configuration().allow_diff() || (short(&actual_text) && short(&expected_text)) {
            return match expected_name {
                Some(expected_name) => MessageBuilder::new(
                    self,
                    format!("{name} must be equal to {}.", quote_name(expected_name)),
                )
                .with_context(Rendered(actual_text), ACTUAL)
                .with_context(Rendered(expected_text), expected_name.to_owned())
                .build(),
                None => MessageBuilder::new(self, format!("{name} must be equal to {expected_text}."))
                    .with_context(Rendered(actual_text), ACTUAL)
                    .build(),
            };
        }

        MessageBuilder::new(self, format!("{name} had an unexpected value."))
            .add_diff(ACTUAL, self.value(), expected_name.unwrap_or("expected"), expected)
            .build()
    }
}

/// Text that has already been through the string mappers.
struct Rendered(String);

impl std::fmt::Debug for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Optional values
// ============================================================================

impl<U: ContextValue, P: FailurePolicy> Validator<Option<U>, P> {
    /// Ensures the value is `None`.
    #[track_caller]
    pub fn is_null(self) -> P::Outcome<Option<U>> {
        if self.value().is_none() {
            return self.pass();
        }
        let actual = self.rendered_value();
        let message = MessageBuilder::new(&self, format!("{} must be null.", quote_name(self.name())))
            .with_context(Rendered(actual), ACTUAL)
            .build();
        self.fail(FailureKind::InvalidArgument, message)
    }

    /// Ensures the value is `Some`.
    #[track_caller]
    pub fn is_not_null(self) -> P::Outcome<Option<U>> {
        if self.value().is_some() {
            return self.pass();
        }
        let message = MessageBuilder::new(&self, format!("{} may not be null.", quote_name(self.name()))).build();
        self.fail(FailureKind::NullValue, message)
    }
}

// ============================================================================
// Collections and strings
// ============================================================================

impl<T: Subject + Length, P: FailurePolicy> Validator<T, P> {
    /// Ensures the value has no elements.
    #[track_caller]
    pub fn is_empty(self) -> P::Outcome<T> {
        if self.value().length() == 0 {
            return self.pass();
        }
        let actual = self.rendered_value();
        let message = MessageBuilder::new(&self, format!("{} must be empty.", quote_name(self.name())))
            .with_context(Rendered(actual), ACTUAL)
            .build();
        self.fail(FailureKind::InvalidArgument, message)
    }

    /// Ensures the value has at least one element.
    #[track_caller]
    pub fn is_not_empty(self) -> P::Outcome<T> {
        if self.value().length() != 0 {
            return self.pass();
        }
        let message = MessageBuilder::new(&self, format!("{} may not be empty.", quote_name(self.name()))).build();
        self.fail(FailureKind::InvalidArgument, message)
    }
}

impl<U: ContextValue, P: FailurePolicy> Validator<Vec<U>, P> {
    /// Ensures the elements equal `expected`, in order.
    ///
    /// Failures compare the lists element by element.
    #[track_caller]
    pub fn is_equal_to_elements<E>(self, expected: &[E]) -> P::Outcome<Vec<U>>
    where
        U: PartialEq<E>,
        E: ContextValue,
    {
        if self.value().as_slice() == expected {
            return self.pass();
        }
        let message = MessageBuilder::new(
            &self,
            format!("{} had an unexpected value.", quote_name(self.name())),
        )
        .add_list_diff(ACTUAL, self.value().as_slice(), "expected", expected)
        .build();
        self.fail(FailureKind::InvalidArgument, message)
    }
}

// ============================================================================
// Booleans
// ============================================================================

impl<P: FailurePolicy> Validator<bool, P> {
    /// Ensures the value is `true`.
    #[track_caller]
    pub fn is_true(self) -> P::Outcome<bool> {
        if *self.value() {
            return self.pass();
        }
        let message = MessageBuilder::new(&self, format!("{} must be true.", quote_name(self.name()))).build();
        self.fail(FailureKind::InvalidArgument, message)
    }

    /// Ensures the value is `false`.
    #[track_caller]
    pub fn is_false(self) -> P::Outcome<bool> {
        if !*self.value() {
            return self.pass();
        }
        let message = MessageBuilder::new(&self, format!("{} must be false.", quote_name(self.name()))).build();
        self.fail(FailureKind::InvalidArgument, message)
    }
}
