//! # Content Cache
//!
//! Process-lifetime cache of decoded remote files.
//!
//! ## Behaviour
//!
//! - **Fetch on first access**: a filename is retrieved from the
//!   [`RemoteSource`](crate::source::RemoteSource) the first time it is asked for
//! - **No expiry**: stored entries are never refreshed, evicted or invalidated
//! - **Failures are not cached**: a failed retrieval leaves no entry behind,
//!   so the next request retries
//! - **Single flight**: concurrent misses for one filename share a single
//!   retrieval (configurable)
//!
//! ## Example
//!
//! ```no_run
//! use alltagslabor_data::cache::{CacheConfig, ContentCache};
//! use alltagslabor_data::source::{HttpSource, SourceConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let source = HttpSource::new(SourceConfig::default())?;
//! let cache = ContentCache::new(source, CacheConfig::default());
//!
//! // Fetched over the network
//! let subjects = cache.get_json("subjects.json").await?;
//! // Served from memory
//! let again = cache.get_json("subjects.json").await?;
//! assert_eq!(subjects, again);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod entry;
pub mod store;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use entry::{CacheEntry, CacheMetadata, EntryInfo};
pub use store::ContentCache;
pub use types::{CacheKey, CacheStats, CachedContent};
