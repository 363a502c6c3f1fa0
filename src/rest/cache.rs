/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Derives the cache key for a request.
///
/// `params` must already be normalized; the sorted map makes the key independent of the
/// order the caller supplied the parameters in.
pub fn cache_key(method: &str, params: &BTreeMap<String, String>) -> String {
    let mut buf = method.as_bytes().to_vec();
    for (k, v) in params {
        // Separators keep ("ab","c") and ("a","bc") apart
        buf.push(0);
        buf.extend_from_slice(k.as_bytes());
        buf.push(b'=');
        buf.extend_from_slice(v.as_bytes());
    }
    format!("{:x}", md5::compute(buf))
}

/// Storage for raw (undecoded) response bodies.
///
/// Errors returned from a backend are logged by the client and treated as a miss, they never
/// fail the request.
pub trait CacheBackend: Send + Sync {
    /// Returns the value stored under `key` if it exists and has not expired.
    fn get(&self, key: &str) -> Result<Option<String>, FlickrError>;

    /// Stores `value` under `key` for `ttl`.
    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), FlickrError>;
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct CacheEntry {
    expires: DateTime<Utc>,
    value: String,
}

impl CacheEntry {
    fn new(value: &str, ttl: Duration) -> Self {
        Self {
            expires: Utc::now() + ttl,
            value: value.to_string(),
        }
    }

    fn is_live(&self) -> bool {
        Utc::now() < self.expires
    }
}

/// In-process cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheBackend for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>, FlickrError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| FlickrError::Cache(e.to_string()))?;
        match entries.get(key) {
            Some(entry) if entry.is_live() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), FlickrError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| FlickrError::Cache(e.to_string()))?;
        entries.retain(|_, entry| entry.is_live());
        entries.insert(key.to_string(), CacheEntry::new(value, ttl));
        Ok(())
    }
}

/// Cache that keeps one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Creates the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, FlickrError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl CacheBackend for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>, FlickrError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let entry: CacheEntry = serde_json::from_slice(&fs::read(&path)?)?;
        if entry.is_live() {
            Ok(Some(entry.value))
        } else {
            fs::remove_file(&path)?;
            Ok(None)
        }
    }

    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), FlickrError> {
        let entry = CacheEntry::new(value, ttl);
        fs::write(self.path_for(key), serde_json::to_vec(&entry)?)?;
        Ok(())
    }
}
