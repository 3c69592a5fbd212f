//! # Alltagslabor Data (alltagslabor-data)
//!
//! Access to the static files behind the Alltagslabor experiment catalog.
//!
//! ## Features
//!
//! - Pluggable remote source with an HTTP implementation (bounded timeout, no retries)
//! - Process-lifetime content cache that fetches each file once
//! - Strict decoding of experiment records and region lookup tables
//! - A single error type distinguishing fetch, lookup and validation failures
//!
//! ## Loading the experiment collection
//!
//! ```no_run
//! use alltagslabor_data::{decode_experiments, ContentCache, HttpSource, RemoteFile, SourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = HttpSource::new(SourceConfig::from_env())?;
//!     let cache = ContentCache::with_defaults(source);
//!
//!     let content = cache.get_file(RemoteFile::Experiments).await?;
//!     let experiments = decode_experiments(content.as_json().unwrap_or(&serde_json::Value::Null))?;
//!     println!("{} experiments", experiments.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Lookup tables
//!
//! ```no_run
//! use alltagslabor_data::{ContentCache, HttpSource, RegionTable, RemoteFile, SourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = ContentCache::with_defaults(HttpSource::new(SourceConfig::default())?);
//!
//!     let file = RemoteFile::Subjects;
//!     let content = cache.get_file(file).await?;
//!     let subjects = RegionTable::from_value(content.as_json().unwrap_or(&serde_json::Value::Null), file.filename())?;
//!     for region in subjects.regions() {
//!         println!("{region}: {:?}", subjects.get(region));
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod files;
pub mod schema;
pub mod source;

// Re-export main types for convenience
pub use cache::{CacheConfig, CacheConfigBuilder, CacheStats, CachedContent, ContentCache, EntryInfo};
pub use error::{DataError, Result};
pub use files::{DecodeMode, RemoteFile};
pub use schema::{decode_experiments, Experiment, ExperimentStep, Impressum, RegionTable};
pub use source::{HttpSource, RemoteSource, SourceConfig};
