//! Core type definitions for the cache system

use crate::files::DecodeMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cache key type - the remote filename
pub type CacheKey = String;

/// A decoded remote file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CachedContent {
    /// Parsed JSON document
    Json(serde_json::Value),
    /// Raw text body
    Text(String),
}

impl CachedContent {
    /// Decode a raw body according to `mode`
    pub fn decode(body: String, mode: DecodeMode) -> serde_json::Result<Self> {
        match mode {
            DecodeMode::Json => serde_json::from_str(&body).map(CachedContent::Json),
            DecodeMode::Text => Ok(CachedContent::Text(body)),
        }
    }

    pub fn mode(&self) -> DecodeMode {
        match self {
            CachedContent::Json(_) => DecodeMode::Json,
            CachedContent::Text(_) => DecodeMode::Text,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            CachedContent::Json(value) => Some(value),
            CachedContent::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CachedContent::Text(text) => Some(text),
            CachedContent::Json(_) => None,
        }
    }
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from memory
    pub hits: u64,

    /// Lookups that had to go to the remote source
    pub misses: u64,

    /// Successful remote retrievals
    pub fetches: u64,

    /// Failed remote retrievals (nothing cached)
    pub failed_fetches: u64,

    /// Number of entries currently in cache
    pub entries: usize,

    /// Total size of the raw bodies behind the cached entries
    pub size_bytes: usize,
}

impl CacheStats {
    /// Calculate cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ hits: {}, misses: {}, hit_rate: {:.2}%, fetches: {}, failed: {}, entries: {}, size: {} bytes }}",
            self.hits,
            self.misses,
            self.hit_rate(),
            self.fetches,
            self.failed_fetches,
            self.entries,
            self.size_bytes
        )
    }
}
