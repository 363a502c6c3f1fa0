/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde_json::Value;

/// Key the API uses to wrap text values, e.g. `{"title": {"_content": "Sunset"}}`.
pub const TEXT_NODE_KEY: &str = "_content";

/// Collapses text-node wrappers into their values at every depth, root included.
///
/// Works bottom-up: children are cleaned first, then a container holding only
/// [`TEXT_NODE_KEY`] is replaced by its (already cleaned) value. Running it twice gives the
/// same result as running it once.
pub fn clean_text_nodes(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut map: serde_json::Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, clean_text_nodes(v)))
                .collect();
            if map.len() == 1 {
                if let Some(text) = map.remove(TEXT_NODE_KEY) {
                    return text;
                }
            }
            Value::Object(map)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(clean_text_nodes).collect()),
        other => other,
    }
}
