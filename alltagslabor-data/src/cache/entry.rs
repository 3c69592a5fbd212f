//! Cache entries and their metadata

use crate::cache::types::{CacheKey, CachedContent};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// A decoded remote file held for the lifetime of the process
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The remote filename
    pub key: CacheKey,

    /// Shared decoded content, handed out to readers without copying
    pub content: Arc<CachedContent>,

    /// Entry metadata
    pub metadata: CacheMetadata,
}

/// Metadata recorded when an entry is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheMetadata {
    /// When the remote retrieval completed
    pub fetched_at: DateTime<Utc>,

    /// Length of the raw body in bytes
    pub size_bytes: usize,
}

/// Snapshot of one stored entry, without its content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub filename: CacheKey,

    #[serde(flatten)]
    pub metadata: CacheMetadata,
}

impl CacheEntry {
    pub fn new(key: CacheKey, content: CachedContent, size_bytes: usize) -> Self {
        Self {
            key,
            content: Arc::new(content),
            metadata: CacheMetadata {
                fetched_at: Utc::now(),
                size_bytes,
            },
        }
    }

    pub fn info(&self) -> EntryInfo {
        EntryInfo {
            filename: self.key.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

impl EntryInfo {
    /// Time since the entry was fetched
    pub fn age(&self) -> Duration {
        (Utc::now() - self.metadata.fetched_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}
