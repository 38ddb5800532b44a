//! Failure message layout.

use pretty_assertions::assert_eq;
use requisite_validator::message::DIFF_LEGEND;
use requisite_validator::prelude::*;
use rstest::rstest;

fn plain() -> Validators {
    Validators::new().with_terminal_encoding(TerminalEncoding::None)
}

// ============================================================================
// EQUALITY
// ============================================================================

#[test]
fn short_values_are_compared_without_diff() {
    let error = plain()
        .require_that("int[6]", "actual")
        .is_equal_to("int[5]")
        .unwrap_err();
    assert_eq!(error.to_string(), "\"actual\" must be equal to \"int[5]\".\nactual: \"int[6]\"");
}

#[test]
fn disallowed_diff_lists_actual_value() {
    let validators = plain().update_configuration(|configuration| configuration.with_allow_diff(false));
    let error = validators
        .require_that("The value is 6", "value")
        .is_equal_to("The value is 5")
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "\"value\" must be equal to \"The value is 5\".\nactual: \"The value is 6\""
    );
}

#[test]
fn long_values_are_compared_with_diff() {
    let error = plain()
        .require_that("The value is 6", "value")
        .is_equal_to("The value is 5")
        .unwrap_err();
    let expected = format!(
        "\"value\" had an unexpected value.\n\
         \n\
         actual  : \"The value is 6 \"\\0\n\
         diff    : ==============-+===\n\
         expected: \"The value is  5\"\\0\n\
         \n\
         {DIFF_LEGEND}"
    );
    assert_eq!(error.to_string(), expected);
}

#[test]
fn named_expected_value_is_quoted() {
    let error = plain()
        .require_that(3, "count")
        .is_equal_to_named(4, "limit")
        .unwrap_err();
    assert_eq!(error.to_string(), "\"count\" must be equal to \"limit\".\nactual: 3\nlimit : 4");
}

#[test]
fn multiline_values_are_keyed_by_line() {
    let error = plain()
        .require_that("first line\nsecond line\nthird line", "text")
        .is_equal_to("first line\nsecond lane\nthird line")
        .unwrap_err();
    let message = error.to_string();
    assert!(message.starts_with("\"text\" had an unexpected value.\n\n"), "{message}");
    assert!(message.contains("actual@1"), "{message}");
    assert!(message.contains("expected@1"), "{message}");
    assert!(message.contains("\ndiff"), "{message}");
    assert!(message.ends_with(DIFF_LEGEND), "{message}");
}

#[rstest]
#[case::xterm_8color(TerminalEncoding::Xterm8Color)]
#[case::xterm_16color(TerminalEncoding::Xterm16Color)]
#[case::xterm_256color(TerminalEncoding::Xterm256Color)]
#[case::rgb_888color(TerminalEncoding::Rgb888Color)]
fn colored_diffs_have_no_marker_line(#[case] encoding: TerminalEncoding) {
    let error = Validators::new()
        .with_terminal_encoding(encoding)
        .require_that("The value is 6", "value")
        .is_equal_to("The value is 5")
        .unwrap_err();
    let message = error.to_string();
    assert!(message.contains('\u{1b}'), "{message}");
    assert!(!message.contains("\ndiff"), "{message}");
    assert!(!message.contains("Legend"), "{message}");
}

#[test]
fn lists_are_compared_by_element() {
    let error = plain()
        .require_that(vec![1, 2, 3], "list")
        .is_equal_to_elements(&[1, 9])
        .unwrap_err();
    let message = error.to_string();
    assert!(
        message.starts_with("\"list\" had an unexpected value.\n\nactual[0]  : 1\nexpected[0]: 1\n\n"),
        "{message}"
    );
    assert!(message.contains("actual[1]  : 2"), "{message}");
    assert!(message.contains("actual[2]  : 3\nexpected   :\n"), "{message}");
}

#[test]
fn multiline_values_keep_first_and_last_line() {
    let actual = "line zero\nline one\nline two\nline three\nline four".to_owned();
    let expected = actual.replace("line two", "line 2");
    let error = plain().require_that(actual, "text").is_equal_to(expected).unwrap_err();
    let message = error.to_string();
    assert!(
        message.starts_with("\"text\" had an unexpected value.\n\nactual@0  : \"line zero\\n\n"),
        "{message}"
    );
    assert!(message.contains("actual@4  : line four\"\\0\n"), "{message}");
    assert!(message.contains("expected@4: line four\"\\0\n"), "{message}");
    assert!(!message.contains("actual@1"), "{message}");
    assert!(!message.contains("actual@3"), "{message}");
    assert_eq!(message.matches("[...]").count(), 2, "{message}");
}

// ============================================================================
// NAMES
// ============================================================================

#[rstest]
#[case::actual("actual")]
#[case::diff("diff")]
#[should_panic(expected = "name")]
fn expected_name_may_not_collide_with_comparison_keys(#[case] name: &str) {
    let _ = plain()
        .require_that("some long text here", "value")
        .is_equal_to_named("some long other here", name);
}

#[test]
#[should_panic(expected = "may not share the name")]
fn expected_name_actual_is_rejected_even_when_equal() {
    let _ = plain().require_that(3, "count").is_equal_to_named(3, "actual");
}

#[test]
#[should_panic(expected = "whitespace")]
fn failure_context_keys_are_validated() {
    let validator = plain().require_that(7, "value");
    let _ = MessageBuilder::new(&validator, "\"value\" is odd.").with_context(2, "bad key: x");
}

#[test]
#[should_panic(expected = "colon")]
fn unwanted_value_names_are_validated() {
    let _ = plain().require_that(3, "count").is_not_equal_to_named(4, "limit:max");
}

// ============================================================================
// PERIODS
// ============================================================================

#[test]
fn lone_statement_loses_period() {
    let error = plain().require_that(Option::<i32>::None, "value").is_not_null().unwrap_err();
    assert_eq!(error.to_string(), "\"value\" may not be null");
    assert_eq!(error.kind(), Some(FailureKind::NullValue));
}

#[test]
fn statement_with_comma_keeps_period() {
    let validator = plain().require_that(7, "value");
    let message = MessageBuilder::new(&validator, "\"value\" must be 1, 2 or 3.").build();
    assert_eq!(message, "\"value\" must be 1, 2 or 3.");
}

#[test]
fn statement_with_context_keeps_period() {
    let validator = plain().require_that(7, "value");
    let message = MessageBuilder::new(&validator, "\"value\" is odd.")
        .with_context(2, "divisor")
        .to_string();
    assert_eq!(message, "\"value\" is odd.\ndivisor: 2");
}

#[test]
fn member_names_are_not_quoted() {
    let error = plain().require_that(false, "user.active").is_true().unwrap_err();
    assert_eq!(error.to_string(), "user.active must be true");
}
