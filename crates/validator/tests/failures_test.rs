//! Failure policies, aggregation and error transformation.

use pretty_assertions::assert_eq;
use requisite_validator::prelude::*;

fn plain() -> Validators {
    Validators::new().with_terminal_encoding(TerminalEncoding::None)
}

// ============================================================================
// POLICIES
// ============================================================================

#[test]
fn require_chains_with_question_mark() -> Result<(), ValidationError> {
    let validator = plain().require_that(5, "count").is_greater_than(1)?.is_less_than(10)?;
    assert_eq!(*validator.value(), 5);
    Ok(())
}

#[test]
fn require_stops_at_first_failure() {
    let error = plain()
        .require_that(5, "count")
        .is_less_than(3)
        .and_then(|validator| validator.is_greater_than(10))
        .unwrap_err();
    assert_eq!(error.to_string(), "\"count\" must be less than 3.\nactual: 5");
}

#[test]
#[should_panic(expected = "\"count\" must be less than 3.")]
fn assert_panics_on_failure() {
    let _ = plain().assert_that(5, "count").is_less_than(3);
}

#[test]
fn assert_passes_silently() {
    let validator = plain().assert_that(String::from("ok"), "status").is_not_empty();
    assert_eq!(validator.value(), "ok");
}

#[test]
fn check_records_instead_of_failing() {
    let validator = plain().check_if(5, "count").is_less_than(3).is_greater_than(10);
    assert_eq!(
        validator.else_get_messages(),
        vec![
            "\"count\" must be less than 3.\nactual: 5".to_owned(),
            "\"count\" must be greater than 10.\nactual: 5".to_owned(),
        ]
    );
}

#[test]
fn require_without_throw_records_failures() {
    let validators = plain().update_configuration(|configuration| configuration.with_throw_on_failure(false));
    let Ok(validator) = validators.require_that(5, "count").is_less_than(3) else {
        panic!("failures are recorded when throw_on_failure is disabled");
    };
    assert_eq!(validator.failures().len(), 1);
}

// ============================================================================
// AGGREGATION
// ============================================================================

#[test]
fn combined_failures_are_numbered() {
    let validators = plain();
    let error = validators
        .check_if(vec![1, 2], "list")
        .is_empty()
        .and(validators.check_if(5, "count").is_less_than(3))
        .else_throw()
        .unwrap_err();

    assert!(matches!(error, ValidationError::Multiple(_)));
    assert_eq!(
        error.to_string(),
        "2 validation failures occurred.\n\
         \n\
         1. InvalidArgument\n\
         \"list\" must be empty.\n\
         actual: [1, 2]\n\
         \n\
         2. InvalidArgument\n\
         \"count\" must be less than 3.\n\
         actual: 5"
    );
}

#[test]
fn single_failure_is_not_wrapped() {
    let error = plain().check_if(5, "count").is_less_than(3).else_throw().unwrap_err();
    assert!(matches!(error, ValidationError::InvalidArgument { .. }));
    assert_eq!(error.to_string(), "\"count\" must be less than 3.\nactual: 5");
}

#[test]
fn no_failures_is_ok() {
    let validator = plain().check_if(Some(5), "count").is_not_null();
    assert!(validator.else_get_error().is_none());
    assert!(validator.else_throw().is_ok());
}

#[test]
fn multiple_failures_expose_each_error() {
    let validators = plain();
    let failures = validators
        .check_if(Option::<String>::None, "name")
        .is_not_null()
        .and(validators.check_if(-1, "age").is_between(0, 150))
        .into_failures();
    let Some(ValidationError::Multiple(multiple)) = failures.error() else {
        panic!("two failures aggregate");
    };
    let kinds: Vec<_> = multiple.errors().iter().map(ValidationError::kind).collect();
    assert_eq!(kinds, vec![Some(FailureKind::NullValue), Some(FailureKind::InvalidArgument)]);
}

// ============================================================================
// TRANSFORMATION
// ============================================================================

#[derive(Debug, thiserror::Error)]
#[error("configuration rejected: {0}")]
struct ConfigError(String);

#[test]
fn transformer_substitutes_error() {
    let validators = plain().update_configuration(|configuration| {
        configuration.with_exception_transformer(|error| ValidationError::custom(ConfigError(error.to_string())))
    });
    let error = validators.require_that(5, "count").is_less_than(3).unwrap_err();
    assert!(error.downcast_ref::<ConfigError>().is_some());
    assert!(error.to_string().starts_with("configuration rejected: \"count\""));
}

#[test]
fn wrapped_errors_are_unwrapped() {
    let validators = plain().update_configuration(|configuration| {
        configuration.with_exception_transformer(|error| ValidationError::Custom {
            type_name: "WrappedError",
            source: Box::new(WrappedError::new(ConfigError(error.to_string()))),
        })
    });
    let error = validators.check_if(5, "count").is_less_than(3).else_throw().unwrap_err();
    assert!(error.downcast_ref::<ConfigError>().is_some());
    assert!(error.downcast_ref::<WrappedError>().is_none());
    assert!(error.type_name().ends_with("ConfigError"));
}

#[test]
fn assertion_panics_with_failure_message() {
    let result = std::panic::catch_unwind(|| {
        let _ = plain().assert_that(false, "ready").is_true();
    });
    let payload = result.unwrap_err();
    let message = payload.downcast_ref::<String>().cloned().unwrap_or_default();
    assert_eq!(message, "\"ready\" must be true");
}
