//! Remote content host access
//!
//! The [`RemoteSource`] trait is the single seam between the cache and the
//! network. [`HttpSource`] is the production implementation; tests install
//! their own sources to count or fail retrievals.

use crate::error::{DataError, Result};
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Public raw-file URL of the upstream data repository
pub const DEFAULT_BASE_URL: &str = "https://gitlab.com/Datenflix007/alltagslabordata/-/raw/main";

/// Default bound on a single retrieval
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding the base URL of the content host
pub const BASE_URL_ENV: &str = "ALLTAGSLABOR_DATA_URL";

/// Environment variable holding the retrieval timeout in seconds
pub const TIMEOUT_ENV: &str = "ALLTAGSLABOR_FETCH_TIMEOUT_SECS";

/// A read-only store of files addressed by filename
pub trait RemoteSource: Send + Sync + 'static {
    /// Retrieve the raw body of `filename`
    fn fetch(&self, filename: &str) -> impl Future<Output = Result<String>> + Send;
}

impl<S: RemoteSource> RemoteSource for Arc<S> {
    fn fetch(&self, filename: &str) -> impl Future<Output = Result<String>> + Send {
        (**self).fetch(filename)
    }
}

/// Configuration for the HTTP content source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Base URL; filenames are appended after a `/`
    pub base_url: String,
    /// Upper bound for one request, connect to last body byte
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SourceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `ALLTAGSLABOR_DATA_URL` and `ALLTAGSLABOR_FETCH_TIMEOUT_SECS`,
    /// falling back to the defaults for unset or unparsable values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| {
            info!("{BASE_URL_ENV} not set, using default: {}", defaults.base_url);
            defaults.base_url.clone()
        });
        let timeout = try_load::<u64>(TIMEOUT_ENV)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self { base_url, timeout }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(DataError::Config("base_url must not be empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(DataError::Config(format!(
                "base_url must be an http(s) URL, got {base}"
            )));
        }
        if self.timeout.is_zero() {
            return Err(DataError::Config("timeout must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Full URL of a remote file
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url.trim().trim_end_matches('/'), filename)
    }
}

fn try_load<T: FromStr>(key: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).ok()?;
    raw.trim()
        .parse()
        .map_err(|e| warn!("Invalid {key} value {raw:?}: {e}, using default"))
        .ok()
}

/// Content source backed by plain HTTP GETs
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    config: SourceConfig,
}

impl HttpSource {
    /// Create a source after validating the configuration
    pub fn new(config: SourceConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Config(e.to_string()))?;

        info!(
            "Using content host {} (timeout: {:?})",
            config.base_url, config.timeout
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn describe(&self, e: reqwest::Error) -> String {
        if e.is_timeout() {
            format!("request timed out after {:?}", self.config.timeout)
        } else {
            e.to_string()
        }
    }
}

impl RemoteSource for HttpSource {
    async fn fetch(&self, filename: &str) -> Result<String> {
        let url = self.config.url_for(filename);
        debug!("GET {}", url);
        let started = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataError::fetch(filename, self.describe(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::fetch(filename, format!("HTTP status {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DataError::fetch(filename, self.describe(e)))?;

        debug!(
            "Fetched {} ({} bytes) in {}ms",
            filename,
            body.len(),
            started.elapsed().as_millis()
        );
        Ok(body)
    }
}
