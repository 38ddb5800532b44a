//! Character-level edit scripts.
//!
//! The minimal edit script comes from the Myers implementation in
//! [`similar`]. The raw script is then normalized:
//!
//! 1. Runs of deletions and insertions between two equal runs collapse into a
//!    single deletion followed by a single insertion.
//! 2. Empty deltas are dropped and adjacent equal runs are merged.
//! 3. Words that the script shreds into more than two unequal fragments are
//!    replaced by a whole-word deletion and insertion.
//!
//! Step 3 keeps the output readable: `dog` against `fox` reads better as
//! `-dog +fox` than as `-d +f o -g +x`.

use std::sync::LazyLock;

use regex::Regex;
use similar::{Algorithm, DiffOp, capture_diff_slices};

/// Characters that separate words inside equal runs.
static WORD_DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{Zs}+|\r\n|[\r\n]|[\[\](){}/\\*+\-#:;.]").expect("word delimiter pattern is valid")
});

/// Maximum number of unequal fragments a word may contain before it is
/// rewritten as a whole-word replacement.
const MAX_FRAGMENTS_PER_WORD: usize = 2;

/// The kind of an edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Text present in both values.
    Equal,
    /// Text present only in the actual value.
    Delete,
    /// Text present only in the expected value.
    Insert,
}

/// One operation of an edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    /// The operation.
    pub tag: Tag,
    /// The text the operation applies to.
    pub text: String,
}

impl Delta {
    /// Creates a new delta.
    pub fn new(tag: Tag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }
}

/// Computes the normalized edit script that turns `actual` into `expected`.
///
/// Deltas are returned in document order. Concatenating the text of every
/// `Equal` and `Delete` delta reproduces `actual`; concatenating `Equal` and
/// `Insert` reproduces `expected`.
pub fn diff(actual: &str, expected: &str) -> Vec<Delta> {
    let old: Vec<char> = actual.chars().collect();
    let new: Vec<char> = expected.chars().collect();

    let mut raw = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
        match op {
            DiffOp::Equal { old_index, len, .. } => {
                raw.push(Delta::new(Tag::Equal, collect(&old[old_index..old_index + len])));
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                raw.push(Delta::new(Tag::Delete, collect(&old[old_index..old_index + old_len])));
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                raw.push(Delta::new(Tag::Insert, collect(&new[new_index..new_index + new_len])));
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                raw.push(Delta::new(Tag::Delete, collect(&old[old_index..old_index + old_len])));
                raw.push(Delta::new(Tag::Insert, collect(&new[new_index..new_index + new_len])));
            }
        }
    }
    simplify(merge(raw))
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Merges adjacent deltas of the same kind and drops empty ones.
///
/// Between two equal runs, all deletions are emitted before all insertions.
pub fn merge(deltas: Vec<Delta>) -> Vec<Delta> {
    let mut merged: Vec<Delta> = Vec::with_capacity(deltas.len());
    let mut deleted = String::new();
    let mut inserted = String::new();

    for delta in deltas {
        match delta.tag {
            Tag::Delete => deleted.push_str(&delta.text),
            Tag::Insert => inserted.push_str(&delta.text),
            Tag::Equal => {
                flush_pending(&mut merged, &mut deleted, &mut inserted);
                if delta.text.is_empty() {
                    continue;
                }
                match merged.last_mut() {
                    Some(last) if last.tag == Tag::Equal => last.text.push_str(&delta.text),
                    _ => merged.push(delta),
                }
            }
        }
    }
    flush_pending(&mut merged, &mut deleted, &mut inserted);
    merged
}

fn flush_pending(merged: &mut Vec<Delta>, deleted: &mut String, inserted: &mut String) {
    if !deleted.is_empty() {
        merged.push(Delta::new(Tag::Delete, std::mem::take(deleted)));
    }
    if !inserted.is_empty() {
        merged.push(Delta::new(Tag::Insert, std::mem::take(inserted)));
    }
}

/// Rewrites words that are split into too many fragments.
///
/// Word boundaries are only recognized inside equal runs; a word is the
/// stretch of deltas between two boundaries. When a word holds more than
/// two unequal deltas it becomes one deletion of the actual word followed by
/// one insertion of the expected word.
pub fn simplify(deltas: Vec<Delta>) -> Vec<Delta> {
    let mut output = Vec::with_capacity(deltas.len());
    let mut word: Vec<Delta> = Vec::new();

    for delta in deltas {
        if delta.tag != Tag::Equal {
            word.push(delta);
            continue;
        }
        let mut start = 0;
        for boundary in WORD_DELIMITER.find_iter(&delta.text) {
            if boundary.start() > start {
                word.push(Delta::new(Tag::Equal, &delta.text[start..boundary.start()]));
            }
            close_word(&mut word, &mut output);
            output.push(Delta::new(Tag::Equal, boundary.as_str()));
            start = boundary.end();
        }
        if start < delta.text.len() {
            word.push(Delta::new(Tag::Equal, &delta.text[start..]));
        }
    }
    close_word(&mut word, &mut output);
    merge(output)
}

fn close_word(word: &mut Vec<Delta>, output: &mut Vec<Delta>) {
    let fragments = word.iter().filter(|delta| delta.tag != Tag::Equal).count();
    if fragments <= MAX_FRAGMENTS_PER_WORD {
        output.append(word);
        return;
    }
    let mut actual = String::new();
    let mut expected = String::new();
    for delta in word.drain(..) {
        match delta.tag {
            Tag::Equal => {
                actual.push_str(&delta.text);
                expected.push_str(&delta.text);
            }
            Tag::Delete => actual.push_str(&delta.text),
            Tag::Insert => expected.push_str(&delta.text),
        }
    }
    output.push(Delta::new(Tag::Delete, actual));
    output.push(Delta::new(Tag::Insert, expected));
}
