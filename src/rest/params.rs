/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use std::collections::BTreeMap;

/// A single request parameter value.
///
/// Absent values and empty strings are both treated as "not sent". Everything else is
/// carried in its wire (string) form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamValue(Option<String>);

impl ParamValue {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_deref().is_none_or(str::is_empty)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self(Some(v.to_string()))
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self(Some(v))
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        Self(Some(v.clone()))
    }
}

// The API uses 1/0 for flags
impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self(Some(if v { "1" } else { "0" }.to_string()))
    }
}

macro_rules! param_value_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(v: $t) -> Self {
                    Self(Some(v.to_string()))
                }
            }
        )*
    };
}

param_value_from_display!(i32, i64, u32, u64, usize, f64);

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self(None), Into::into)
    }
}

/// Drops absent and empty parameters and returns the rest in a stable (sorted) order.
///
/// The result is what gets hashed for the cache key and what gets signed and sent, so the
/// two can never disagree.
pub fn normalize_params<K: AsRef<str>>(params: &[(K, ParamValue)]) -> BTreeMap<String, String> {
    params
        .iter()
        .filter_map(|(k, v)| match v.as_str() {
            Some(s) if !s.is_empty() => Some((k.as_ref().to_string(), s.to_string())),
            _ => None,
        })
        .collect()
}

/// Flattens tags into the space separated form the API expects.
///
/// Double quotes can't appear in a tag so they are removed, and tags containing spaces are
/// wrapped in quotes.
pub fn tag_list<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| {
            let clean = tag.as_ref().replace('"', "");
            if clean.contains(' ') {
                format!("\"{}\"", clean)
            } else {
                clean
            }
        })
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keys the client writes itself: the envelope fields and the OAuth protocol parameters.
pub fn is_reserved_param(name: &str) -> bool {
    matches!(name, "method" | "format" | "nojsoncallback") || name.starts_with("oauth_")
}

/// Flattens a list (extras, ids) into a comma separated value.
pub fn comma_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
