//! Fetch-on-first-access content cache

use crate::cache::{
    config::CacheConfig,
    entry::{CacheEntry, EntryInfo},
    types::{CacheKey, CacheStats, CachedContent},
};
use crate::error::{DataError, Result};
use crate::files::{DecodeMode, RemoteFile};
use crate::source::RemoteSource;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{debug, info, warn};

/// Outcome of one remote retrieval, shared by every caller that joined it
type Flight = Arc<OnceCell<Result<Arc<CachedContent>>>>;

/// In-memory cache of decoded remote files
///
/// The first request for a filename retrieves it from the remote source,
/// decodes it and stores the result; every later request is answered from
/// memory. Entries are never refreshed or evicted. A failed retrieval stores
/// nothing, so the next request tries again.
///
/// With `single_flight` enabled, callers that miss while a retrieval for the
/// same filename is running wait for that retrieval and receive its outcome,
/// success or failure, instead of starting their own.
pub struct ContentCache<S> {
    /// Cache configuration
    config: CacheConfig,

    /// Where misses are fetched from
    source: S,

    /// Main storage: filename -> entry
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,

    /// Hit/miss/fetch counters
    counters: Counters,

    /// Retrievals currently running, used when `single_flight` is enabled
    inflight: Mutex<HashMap<CacheKey, Flight>>,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    fetches: AtomicU64,
    failed_fetches: AtomicU64,
}

impl<S: RemoteSource> ContentCache<S> {
    /// Create a new cache in front of `source`
    pub fn new(source: S, config: CacheConfig) -> Self {
        info!("Initializing content cache with config: {:?}", config);

        Self {
            config,
            source,
            entries: RwLock::new(HashMap::new()),
            counters: Counters::default(),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Create a cache with the default configuration
    pub fn with_defaults(source: S) -> Self {
        Self::new(source, CacheConfig::default())
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get the decoded content of `filename`, fetching it on first access
    pub async fn get(&self, filename: &str, mode: DecodeMode) -> Result<Arc<CachedContent>> {
        if let Some(content) = self.lookup(filename).await {
            return check_mode(filename, content, mode);
        }

        let content = if self.config.single_flight {
            self.join_flight(filename, mode).await?
        } else {
            self.fetch_and_store(filename, mode).await?
        };
        check_mode(filename, content, mode)
    }

    /// Get a JSON-decoded remote file
    pub async fn get_json(&self, filename: &str) -> Result<Arc<CachedContent>> {
        self.get(filename, DecodeMode::Json).await
    }

    /// Get a text remote file
    pub async fn get_text(&self, filename: &str) -> Result<Arc<CachedContent>> {
        self.get(filename, DecodeMode::Text).await
    }

    /// Get one of the known remote files using its own decode mode
    pub async fn get_file(&self, file: RemoteFile) -> Result<Arc<CachedContent>> {
        self.get(file.filename(), file.decode_mode()).await
    }

    /// Check if a filename is cached (does not count as a hit)
    pub async fn contains(&self, filename: &str) -> bool {
        self.entries.read().await.contains_key(filename)
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;

        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            fetches: self.counters.fetches.load(Ordering::Relaxed),
            failed_fetches: self.counters.failed_fetches.load(Ordering::Relaxed),
            entries: entries.len(),
            size_bytes: entries.values().map(|e| e.metadata.size_bytes).sum(),
        }
    }

    /// Snapshot of the stored entries, ordered by filename
    pub async fn entries(&self) -> Vec<EntryInfo> {
        let entries = self.entries.read().await;

        let mut infos: Vec<EntryInfo> = entries.values().map(CacheEntry::info).collect();
        infos.sort_by(|a, b| a.filename.cmp(&b.filename));
        infos
    }

    /// Get number of entries in cache
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if cache is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry; the next access to each file fetches it again
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;

        let count = entries.len();
        entries.clear();

        info!("Cleared {} entries from content cache", count);
    }

    fn count(&self, counter: &AtomicU64) {
        if self.config.enable_metrics {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Internal: return the cached content and count a hit
    async fn lookup(&self, filename: &str) -> Option<Arc<CachedContent>> {
        let content = {
            let entries = self.entries.read().await;
            entries.get(filename).map(|e| Arc::clone(&e.content))?
        };

        self.count(&self.counters.hits);
        debug!("Cache hit: {}", filename);
        Some(content)
    }

    /// Internal: run the retrieval for `filename`, or wait for the one
    /// already running and share its outcome
    async fn join_flight(&self, filename: &str, mode: DecodeMode) -> Result<Arc<CachedContent>> {
        let flight = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(inflight.entry(filename.to_string()).or_default())
        };

        let led = AtomicBool::new(false);
        let led_flag = &led;
        let own = Arc::clone(&flight);
        let outcome = flight
            .get_or_init(move || async move {
                led_flag.store(true, Ordering::Relaxed);

                // An earlier flight may have stored the entry after our lookup.
                let outcome = match self.lookup(filename).await {
                    Some(content) => Ok(content),
                    None => self.fetch_and_store(filename, mode).await,
                };

                // Settled flights leave the map; the next miss starts a new one.
                let mut inflight = self.inflight.lock().await;
                if inflight.get(filename).is_some_and(|f| Arc::ptr_eq(f, &own)) {
                    inflight.remove(filename);
                }
                outcome
            })
            .await
            .clone();

        if !led.load(Ordering::Relaxed) && outcome.is_ok() {
            self.count(&self.counters.hits);
            debug!("Shared in-flight fetch: {}", filename);
        }
        outcome
    }

    /// Internal: retrieve, decode and store one file
    async fn fetch_and_store(&self, filename: &str, mode: DecodeMode) -> Result<Arc<CachedContent>> {
        debug!("Cache miss: {}", filename);
        self.count(&self.counters.misses);

        let decoded = match self.source.fetch(filename).await {
            Ok(body) => {
                let size = body.len();
                CachedContent::decode(body, mode)
                    .map(|content| (content, size))
                    .map_err(|e| DataError::fetch(filename, format!("malformed payload: {e}")))
            }
            Err(e) => Err(e),
        };

        let (content, size) = match decoded {
            Ok(decoded) => decoded,
            Err(e) => {
                self.count(&self.counters.failed_fetches);
                warn!("Fetching {} failed: {}", filename, e);
                return Err(e);
            }
        };

        let entry = CacheEntry::new(filename.to_string(), content, size);
        let shared = Arc::clone(&entry.content);

        if self
            .entries
            .write()
            .await
            .insert(filename.to_string(), entry)
            .is_some()
        {
            debug!("Replacing concurrently fetched entry: {}", filename);
        }
        self.count(&self.counters.fetches);

        info!("Cached {} ({} bytes)", filename, size);
        Ok(shared)
    }
}

fn check_mode(filename: &str, content: Arc<CachedContent>, mode: DecodeMode) -> Result<Arc<CachedContent>> {
    if content.mode() == mode {
        Ok(content)
    } else {
        Err(DataError::Validation(format!(
            "{} is cached as {:?}, requested as {:?}",
            filename,
            content.mode(),
            mode
        )))
    }
}
