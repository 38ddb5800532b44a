//! Borrowed and opted-in subjects.

use pretty_assertions::assert_eq;
use requisite_validator::message::DIFF_LEGEND;
use requisite_validator::prelude::*;

fn plain() -> Validators {
    Validators::new().with_terminal_encoding(TerminalEncoding::None)
}

fn require_name(name: &str) -> Result<&str, ValidationError> {
    Ok(require_that(name, "name").is_not_empty()?.into_value())
}

#[test]
fn borrowed_str_is_validated_in_place() {
    assert_eq!(require_name("ada").ok(), Some("ada"));
    let error = require_name("").unwrap_err();
    assert_eq!(error.to_string(), "\"name\" may not be empty");
}

#[test]
fn borrowed_str_diffs_like_an_owned_string() {
    let text = String::from("The value is 6");
    let error = plain()
        .require_that(text.as_str(), "value")
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
fn borrowed_slices_are_checked() {
    let ids: Vec<u32> = Vec::new();
    let messages = plain().check_if(ids.as_slice(), "ids").is_not_empty().else_get_messages();
    assert_eq!(messages, vec!["\"ids\" may not be empty".to_owned()]);
}

#[test]
fn references_to_owned_values_render_their_referent() {
    let count = 5;
    let error = plain().require_that(&count, "count").is_less_than(&3).unwrap_err();
    assert_eq!(error.to_string(), "\"count\" must be less than 3.\nactual: 5");
}

#[derive(Debug, PartialEq, PartialOrd)]
struct Celsius(f64);

impl Subject for Celsius {}

#[derive(Debug, PartialEq)]
struct Kelvin(u32);

impl Subject for Kelvin {
    fn render(&self, mappers: &StringMappers) -> String {
        mappers.render(self)
    }
}

#[test]
fn opted_in_types_render_with_debug() {
    let error = plain()
        .require_that(Celsius(40.0), "temperature")
        .is_less_than(Celsius(38.5))
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "\"temperature\" must be less than Celsius(38.5).\nactual: Celsius(40.0)"
    );
}

#[test]
fn opted_in_types_can_use_mappers() {
    let mappers = StringMappers::default().with_mapper::<Kelvin>(|value, _| format!("{}K", value.0));
    let validators = plain().update_configuration(|configuration| configuration.with_string_mappers(mappers));
    let error = validators
        .require_that(Kelvin(300), "temperature")
        .is_equal_to(Kelvin(273))
        .unwrap_err();
    assert_eq!(error.to_string(), "\"temperature\" must be equal to 273K.\nactual: 300K");
}
