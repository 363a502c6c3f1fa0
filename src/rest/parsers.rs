/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::Error;

// The API is loose about numbers, the same field may arrive as 10 or "10"
#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Num(u64),
    Str(String),
}

impl NumOrStr {
    fn into_u64<E: Error>(self) -> Result<u64, E> {
        match self {
            NumOrStr::Num(n) => Ok(n),
            NumOrStr::Str(s) if s.is_empty() => Ok(0),
            NumOrStr::Str(s) => s.parse().map_err(E::custom),
        }
    }
}

// Parses counters that may be numbers or strings
pub fn from_num_or_str<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    NumOrStr::deserialize(deserializer)?.into_u64()
}

// Parses 0/1 flags (numeric or string) into a bool
pub fn from_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(NumOrStr::deserialize(deserializer)?.into_u64::<D::Error>()? != 0)
}

// Parses unix timestamps sent as strings, e.g. "dateupload"
pub fn from_unix_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = NumOrStr::deserialize(deserializer)?.into_u64::<D::Error>()?;
    let secs = i64::try_from(secs).map_err(D::Error::custom)?;
    Ok(DateTime::from_timestamp(secs, 0))
}

// Parses strings that may be "" and sets to None
pub fn from_empty_str_to_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s.is_empty() { Ok(None) } else { Ok(Some(s)) }
}
