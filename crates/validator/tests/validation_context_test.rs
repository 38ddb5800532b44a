//! Context precedence across failure, validator, factory and thread.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use requisite_validator::prelude::*;

fn plain() -> Validators {
    Validators::new().with_terminal_encoding(TerminalEncoding::None)
}

#[test]
fn validator_context_shadows_factory_context() {
    let validators = plain().with_context(1, "name2");
    let validator = validators.check_if(5, "count").with_context(2, "name2").is_less_than(3);
    assert_eq!(
        validator.else_get_messages(),
        vec!["\"count\" must be less than 3.\nactual: 5\nname2 : 2".to_owned()]
    );
}

#[test]
fn factory_context_is_copied_into_validators() {
    let validators = plain().with_context("eu-west".to_owned(), "region");
    let first = validators.check_if(5, "count").with_context(1, "attempt");
    let second = validators.check_if(6, "count");
    assert_eq!(first.context().len(), 2);
    assert_eq!(second.context().len(), 1);
    assert_eq!(validators.context().len(), 1);
}

#[test]
fn failure_context_shadows_validator_context() {
    let validator = plain().require_that(5, "count").with_context(99, "limit");
    let message = MessageBuilder::new(&validator, "\"count\" is too large.")
        .with_context(3, "limit")
        .build();
    assert_eq!(message, "\"count\" is too large.\nlimit: 3");
}

#[test]
fn ambient_context_has_lowest_precedence() {
    let _request = AmbientContext::enter("request_id", "r-42");
    let _limit = AmbientContext::enter("limit", 1);

    let error = plain()
        .require_that(5, "count")
        .with_context(3, "limit")
        .is_less_than(3)
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "\"count\" must be less than 3.\nactual    : 5\nlimit     : 3\nrequest_id: \"r-42\""
    );
}

#[test]
fn ambient_context_ends_with_scope() {
    AmbientContext::scope_sync("job", 7, || {
        let validator = plain().check_if(5, "count");
        assert!(validator.context().contains_key("job"));
    });
    assert!(!plain().check_if(5, "count").context().contains_key("job"));
}

#[test]
#[should_panic(expected = "may not be equal to the name of the value")]
fn context_name_may_not_shadow_value_name() {
    let _ = plain().require_that(5, "count").with_context(1, "count");
}

#[test]
#[should_panic(expected = "whitespace")]
fn value_names_may_not_contain_whitespace() {
    let _ = plain().require_that(5, "item count");
}

#[test]
fn string_mappers_render_context() {
    let mappers = StringMappers::default().with_mapper::<i32>(|value, _| format!("#{value}"));
    let validators = plain().update_configuration(|configuration| configuration.with_string_mappers(mappers));
    let error = validators.require_that(5, "count").is_less_than(3).unwrap_err();
    assert_eq!(error.to_string(), "\"count\" must be less than #3.\nactual: #5");
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn failures_are_traced() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let _ = plain().check_if(5, "count").is_less_than(3);
    });

    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("validation failed"), "{output}");
    assert!(output.contains("name=count"), "{output}");
}
