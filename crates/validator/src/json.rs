//! Rendering of JSON trees in failure messages.

use crate::mappers::{StringMappers, Subject};

impl Subject for serde_json::Value {
    fn render(&self, mappers: &StringMappers) -> String {
        mappers.render(self)
    }
}

/// Registers a pretty-printing mapper for [`serde_json::Value`], so JSON
/// documents diff line by line.
pub(crate) fn register(mappers: StringMappers) -> StringMappers {
    mappers.with_mapper::<serde_json::Value>(|value, _| {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    })
}
