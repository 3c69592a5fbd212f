//! Integration tests for the content cache
//!
//! These tests verify:
//! - One retrieval per filename across repeated and concurrent calls
//! - Failed retrievals are retried on the next call
//! - The HTTP source against a mock content host (status, timeout, URL layout)

use alltagslabor_data::{
    decode_experiments, CacheConfig, ContentCache, DataError, HttpSource, RemoteFile,
    RemoteSource, Result, SourceConfig,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXPERIMENTS: &str = r#"[
    {"title": "Mechanik Experimente", "shortDescription": "Hebel", "subject": "Physik",
     "gradeLevel": "7", "schoolType": "Gymnasium", "steps": []}
]"#;

/// In-process source that counts calls and can be told to fail
struct CountingSource {
    files: HashMap<String, String>,
    calls: AtomicUsize,
    failures_left: AtomicUsize,
    delay: Duration,
}

impl CountingSource {
    fn new() -> Self {
        let mut files = HashMap::new();
        files.insert("_experiments.json".to_string(), EXPERIMENTS.to_string());
        files.insert("impressum.txt".to_string(), "Angaben gemäß § 5 TMG".to_string());
        Self {
            files,
            calls: AtomicUsize::new(0),
            failures_left: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    fn failing_first(self, failures: usize) -> Self {
        self.failures_left.store(failures, Ordering::SeqCst);
        self
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteSource for CountingSource {
    async fn fetch(&self, filename: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(DataError::fetch(filename, "connection reset"));
        }

        self.files
            .get(filename)
            .cloned()
            .ok_or_else(|| DataError::fetch(filename, "HTTP status 404 Not Found"))
    }
}

#[tokio::test]
async fn test_repeated_get_fetches_once() {
    let source = Arc::new(CountingSource::new());
    let cache = ContentCache::with_defaults(Arc::clone(&source));

    let first = cache.get_file(RemoteFile::Experiments).await.unwrap();
    let second = cache.get_file(RemoteFile::Experiments).await.unwrap();

    assert_eq!(source.calls(), 1);
    assert_eq!(first, second);

    let experiments = decode_experiments(second.as_json().unwrap()).unwrap();
    assert_eq!(experiments[0].title, "Mechanik Experimente");
}

#[tokio::test]
async fn test_failed_fetch_is_retried_on_next_call() {
    let source = Arc::new(CountingSource::new().failing_first(1));
    let cache = ContentCache::with_defaults(Arc::clone(&source));

    let err = cache.get_text("impressum.txt").await.unwrap_err();
    assert!(matches!(err, DataError::Fetch { ref filename, .. } if filename == "impressum.txt"));
    assert!(!cache.contains("impressum.txt").await);

    let text = cache.get_text("impressum.txt").await.unwrap();
    assert_eq!(text.as_text(), Some("Angaben gemäß § 5 TMG"));
    assert_eq!(source.calls(), 2);

    let stats = cache.stats().await;
    assert_eq!(stats.failed_fetches, 1);
    assert_eq!(stats.fetches, 1);
}

#[tokio::test]
async fn test_distinct_filenames_are_cached_separately() {
    let source = Arc::new(CountingSource::new());
    let cache = ContentCache::with_defaults(Arc::clone(&source));

    cache.get_file(RemoteFile::Experiments).await.unwrap();
    cache.get_file(RemoteFile::Impressum).await.unwrap();
    cache.get_file(RemoteFile::Impressum).await.unwrap();

    assert_eq!(source.calls(), 2);
    assert_eq!(cache.len().await, 2);
}

#[tokio::test]
async fn test_concurrent_misses_share_one_fetch() {
    let source = Arc::new(CountingSource::new().slow(Duration::from_millis(50)));
    let cache = Arc::new(ContentCache::with_defaults(Arc::clone(&source)));

    let lookups = (0..8).map(|_| {
        let cache = Arc::clone(&cache);
        async move { cache.get_file(RemoteFile::Experiments).await }
    });
    let results = futures::future::join_all(lookups).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(source.calls(), 1);

    let stats = cache.stats().await;
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 7);
}

#[tokio::test]
async fn test_concurrent_misses_share_one_failure() {
    let source = Arc::new(
        CountingSource::new()
            .failing_first(100)
            .slow(Duration::from_millis(200)),
    );
    let cache = Arc::new(ContentCache::with_defaults(Arc::clone(&source)));

    let started = Instant::now();
    let lookups = (0..5).map(|_| {
        let cache = Arc::clone(&cache);
        async move {
            let result = cache.get_json("_experiments.json").await;
            (result, started.elapsed())
        }
    });
    let results = futures::future::join_all(lookups).await;

    // Every waiter gets the one failure instead of retrying in turn.
    assert!(results
        .iter()
        .all(|(r, _)| matches!(r, Err(DataError::Fetch { .. }))));
    assert_eq!(source.calls(), 1);

    let worst = results.iter().map(|(_, elapsed)| *elapsed).max().unwrap();
    assert!(worst < Duration::from_millis(600), "worst latency {worst:?}");

    // Nothing was kept, so the next request retries.
    assert!(cache.get_json("_experiments.json").await.is_err());
    assert_eq!(source.calls(), 2);

    let stats = cache.stats().await;
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.failed_fetches, 2);
    assert_eq!(stats.hits, 0);
}

#[tokio::test]
async fn test_concurrent_misses_without_single_flight() {
    let source = Arc::new(CountingSource::new().slow(Duration::from_millis(50)));
    let config = CacheConfig::builder().single_flight(false).build();
    let cache = Arc::new(ContentCache::new(Arc::clone(&source), config));

    let lookups = (0..4).map(|_| {
        let cache = Arc::clone(&cache);
        async move { cache.get_file(RemoteFile::Experiments).await }
    });
    let results = futures::future::join_all(lookups).await;

    // Each concurrent miss fetches; the last write wins and one entry remains.
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(source.calls(), 4);
    assert_eq!(cache.len().await, 1);

    let stats = cache.stats().await;
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.fetches, 4);

    cache.get_file(RemoteFile::Experiments).await.unwrap();
    assert_eq!(source.calls(), 4);
    assert_eq!(cache.stats().await.hits, 1);
}

#[tokio::test]
async fn test_http_source_fetches_from_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/main/_experiments.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EXPERIMENTS))
        .expect(1)
        .mount(&server)
        .await;

    let config = SourceConfig::new(format!("{}/raw/main/", server.uri()));
    let cache = ContentCache::with_defaults(HttpSource::new(config).unwrap());

    let first = cache.get_json("_experiments.json").await.unwrap();
    let second = cache.get_json("_experiments.json").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_json().unwrap().as_array().unwrap().len(), 1);
    // MockServer verifies the single expected request on drop.
}

#[tokio::test]
async fn test_http_source_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/subjects.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpSource::new(SourceConfig::new(server.uri())).unwrap();
    let err = source.fetch("subjects.json").await.unwrap_err();

    match err {
        DataError::Fetch { filename, reason } => {
            assert_eq!(filename, "subjects.json");
            assert!(reason.contains("404"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_source_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/impressum.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("slow")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = SourceConfig::new(server.uri()).with_timeout(Duration::from_millis(200));
    let source = HttpSource::new(config).unwrap();

    let err = source.fetch("impressum.txt").await.unwrap_err();
    assert!(matches!(err, DataError::Fetch { .. }));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_http_source_unreachable_host() {
    // Port 9 (discard) is not expected to be listening locally.
    let config = SourceConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
    let cache = ContentCache::with_defaults(HttpSource::new(config).unwrap());

    let err = cache.get_text("impressum.txt").await.unwrap_err();
    assert!(matches!(err, DataError::Fetch { .. }));
    assert!(cache.is_empty().await);
}
