//! Message sections.

use indexmap::IndexMap;

/// One block of a failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSection {
    /// Free text, rendered as is.
    Text(String),
    /// Key/value pairs, rendered one per line with aligned keys.
    Context(IndexMap<String, String>),
}

impl MessageSection {
    /// Width of the widest key, in characters. Zero for text.
    pub fn key_width(&self) -> usize {
        match self {
            Self::Text(_) => 0,
            Self::Context(entries) => entries.keys().map(|key| key.chars().count()).max().unwrap_or(0),
        }
    }

    /// Renders the section, padding keys to `key_width` characters.
    pub fn render(&self, key_width: usize) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Context(entries) => entries
                .iter()
                .map(|(key, value)| match value.as_str() {
                    "" => format!("{key:<key_width$}:"),
                    value => format!("{key:<key_width$}: {value}"),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Renders sections one after another, aligning keys across all of them.
pub fn render_sections(sections: &[MessageSection]) -> String {
    let key_width = sections.iter().map(MessageSection::key_width).max().unwrap_or(0);
    sections
        .iter()
        .map(|section| section.render(key_width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_align_across_sections() {
        let sections = vec![
            MessageSection::Context(IndexMap::from([("a".to_owned(), "1".to_owned())])),
            MessageSection::Text(String::new()),
            MessageSection::Context(IndexMap::from([("longer".to_owned(), "2".to_owned())])),
        ];
        assert_eq!(render_sections(&sections), "a     : 1\n\nlonger: 2");
    }

    #[test]
    fn empty_values_end_at_the_colon() {
        let section = MessageSection::Context(IndexMap::from([
            ("actual[2]".to_owned(), "3".to_owned()),
            ("expected".to_owned(), String::new()),
        ]));
        assert_eq!(section.render(section.key_width()), "actual[2]: 3\nexpected :");
    }
}
