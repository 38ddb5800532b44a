//! Context entries that compare an actual value with an expected one.

use indexmap::IndexMap;
use requisite_diff::{DiffGenerator, DiffResult, TerminalEncoding};

use super::section::MessageSection;
use crate::mappers::{ContextValue, StringMappers, Subject};

/// Explains the markers of a textual diff.
pub const DIFF_LEGEND: &str = "Legend\n\
------\n\
=           : This character is unchanged\n\
+           : Add this character to the value\n\
-           : Remove this character from the value\n\
[index]     : Refers to the index of a collection element\n\
@line-number: Refers to the line number of a multiline string";

/// Key of the marker line.
pub(crate) const DIFF_KEY: &str = "diff";

/// Stands in for equal lines or elements that are omitted.
const SKIPPED: &str = "[...]";

/// Panics unless the two names of a comparison can share one context block.
#[track_caller]
pub(crate) fn require_distinct_names(actual_name: &str, expected_name: &str) {
    crate::validator::require_valid_name(actual_name);
    crate::validator::require_valid_name(expected_name);
    assert!(
        actual_name != expected_name,
        "the expected value may not share the name of the actual value: {expected_name:?}"
    );
    assert!(
        actual_name != DIFF_KEY && expected_name != DIFF_KEY,
        "the name {DIFF_KEY:?} is reserved for the marker line of a diff"
    );
}

/// A value rendered for comparison.
#[derive(Debug, Clone)]
pub(crate) struct Operand {
    text: String,
    type_name: &'static str,
    is_bool: bool,
}

impl Operand {
    pub(crate) fn new(value: &dyn ContextValue, mappers: &StringMappers) -> Self {
        Self {
            text: mappers.render(value),
            type_name: ContextValue::type_name(value),
            is_bool: ContextValue::as_any(value).is::<bool>(),
        }
    }

    pub(crate) fn subject(value: &dyn Subject, mappers: &StringMappers) -> Self {
        Self {
            text: value.render(mappers),
            type_name: value.subject_type(),
            is_bool: value.is_bool(),
        }
    }
}

/// A comparison requested by a message.
#[derive(Debug, Clone)]
pub(crate) enum Comparison {
    Values {
        actual_name: String,
        actual: Operand,
        expected_name: String,
        expected: Operand,
    },
    Lists {
        actual_name: String,
        actual: Vec<Operand>,
        expected_name: String,
        expected: Vec<Operand>,
    },
}

/// How a comparison is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rendered {
    /// Plain entries that join the message's context block.
    Inline(IndexMap<String, String>),
    /// A separate diff block.
    Sections(Vec<MessageSection>),
}

/// Renders comparisons for one terminal encoding.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ContextGenerator {
    generator: DiffGenerator,
    allow_diff: bool,
}

impl ContextGenerator {
    pub(crate) const fn new(encoding: TerminalEncoding, allow_diff: bool) -> Self {
        Self {
            generator: DiffGenerator::new(encoding),
            allow_diff,
        }
    }

    pub(crate) fn render(&self, comparison: &Comparison) -> Rendered {
        match comparison {
            Comparison::Values {
                actual_name,
                actual,
                expected_name,
                expected,
            } => {
                if !self.allow_diff || actual.is_bool || expected.is_bool {
                    return Rendered::Inline(plain(actual_name, actual, expected_name, expected));
                }
                let mut sections = Vec::new();
                let marked = self.value_sections(actual_name, actual, expected_name, expected, &mut sections);
                if marked {
                    push_legend(&mut sections);
                }
                Rendered::Sections(sections)
            }
            Comparison::Lists {
                actual_name,
                actual,
                expected_name,
                expected,
            } => {
                if !self.allow_diff {
                    let mut entries = IndexMap::new();
                    entries.insert(actual_name.clone(), join(actual));
                    entries.insert(expected_name.clone(), join(expected));
                    return Rendered::Inline(entries);
                }
                Rendered::Sections(self.list_sections(actual_name, actual, expected_name, expected))
            }
        }
    }

    fn list_sections(
        &self,
        actual_name: &str,
        actual: &[Operand],
        expected_name: &str,
        expected: &[Operand],
    ) -> Vec<MessageSection> {
        let mut sections = Vec::new();
        let mut marked = false;
        let mut skipping = false;
        let length = actual.len().max(expected.len());
        for index in 0..length {
            let actual_key = format!("{actual_name}[{index}]");
            let expected_key = format!("{expected_name}[{index}]");
            match (actual.get(index), expected.get(index)) {
                (Some(a), Some(e)) if a.text == e.text && a.type_name == e.type_name => {
                    if index != 0 && index != length - 1 {
                        if !skipping {
                            push_text(&mut sections, SKIPPED);
                            skipping = true;
                        }
                        continue;
                    }
                    skipping = false;
                    push_context(&mut sections, plain(&actual_key, a, &expected_key, e));
                }
                (Some(a), Some(e)) => {
                    skipping = false;
                    if a.is_bool || e.is_bool {
                        push_context(&mut sections, plain(&actual_key, a, &expected_key, e));
                    } else {
                        marked |= self.value_sections(&actual_key, a, &expected_key, e, &mut sections);
                    }
                }
                (a, e) => {
                    skipping = false;
                    let mut entries = IndexMap::new();
                    match a {
                        Some(a) => entries.insert(actual_key, a.text.clone()),
                        None => entries.insert(actual_name.to_owned(), String::new()),
                    };
                    match e {
                        Some(e) => entries.insert(expected_key, e.text.clone()),
                        None => entries.insert(expected_name.to_owned(), String::new()),
                    };
                    push_context(&mut sections, entries);
                }
            }
        }
        if marked {
            push_legend(&mut sections);
        }
        sections
    }

    /// Appends the diff of two values. Returns `true` if a marker line shows
    /// a difference.
    fn value_sections(
        &self,
        actual_name: &str,
        actual: &Operand,
        expected_name: &str,
        expected: &Operand,
        sections: &mut Vec<MessageSection>,
    ) -> bool {
        let result = self.generator.diff(&actual.text, &expected.text);
        if result.is_multiline() {
            multiline(&result, actual_name, expected_name, sections);
        } else {
            push_context(sections, line_entries(&result, 0, actual_name.to_owned(), expected_name.to_owned()));
        }

        if actual.text == expected.text && actual.type_name != expected.type_name {
            let mut types = IndexMap::new();
            types.insert(format!("{actual_name}.type"), actual.type_name.to_owned());
            types.insert(format!("{expected_name}.type"), expected.type_name.to_owned());
            push_context(sections, types);
        }

        !result.diff_lines().is_empty() && result.equal_lines().contains(&false)
    }
}

fn multiline(result: &DiffResult, actual_name: &str, expected_name: &str, sections: &mut Vec<MessageSection>) {
    let equal = result.equal_lines();
    let last = result.len().saturating_sub(1);
    let mut skipping = false;
    for index in 0..result.len() {
        if equal[index] && index != 0 && index != last {
            if !skipping {
                push_text(sections, SKIPPED);
                skipping = true;
            }
            continue;
        }
        skipping = false;
        let actual_key = numbered(actual_name, result.actual_line_numbers()[index]);
        let expected_key = numbered(expected_name, result.expected_line_numbers()[index]);
        push_context(sections, line_entries(result, index, actual_key, expected_key));
    }
}

fn line_entries(result: &DiffResult, index: usize, actual_key: String, expected_key: String) -> IndexMap<String, String> {
    let mut entries = IndexMap::new();
    entries.insert(actual_key, result.actual_lines()[index].clone());
    if !result.equal_lines()[index]
        && let Some(markers) = result.diff_lines().get(index)
    {
        entries.insert(DIFF_KEY.to_owned(), markers.clone());
    }
    entries.insert(expected_key, result.expected_lines()[index].clone());
    entries
}

fn numbered(name: &str, line_number: Option<usize>) -> String {
    match line_number {
        Some(number) => format!("{name}@{number}"),
        None => name.to_owned(),
    }
}

fn plain(actual_name: &str, actual: &Operand, expected_name: &str, expected: &Operand) -> IndexMap<String, String> {
    let mut entries = IndexMap::new();
    entries.insert(actual_name.to_owned(), actual.text.clone());
    entries.insert(expected_name.to_owned(), expected.text.clone());
    if actual.text == expected.text && actual.type_name != expected.type_name {
        entries.insert(format!("{actual_name}.type"), actual.type_name.to_owned());
        entries.insert(format!("{expected_name}.type"), expected.type_name.to_owned());
    }
    entries
}

fn join(operands: &[Operand]) -> String {
    let items: Vec<&str> = operands.iter().map(|operand| operand.text.as_str()).collect();
    format!("[{}]", items.join(", "))
}

fn push_text(sections: &mut Vec<MessageSection>, text: &str) {
    if !sections.is_empty() {
        sections.push(MessageSection::Text(String::new()));
    }
    sections.push(MessageSection::Text(text.to_owned()));
}

fn push_context(sections: &mut Vec<MessageSection>, entries: IndexMap<String, String>) {
    if !sections.is_empty() {
        sections.push(MessageSection::Text(String::new()));
    }
    sections.push(MessageSection::Context(entries));
}

fn push_legend(sections: &mut Vec<MessageSection>) {
    push_text(sections, DIFF_LEGEND);
}
