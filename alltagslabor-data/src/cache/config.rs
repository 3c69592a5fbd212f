//! Configuration for the content cache

use serde::{Deserialize, Serialize};

/// Configuration for the content cache
///
/// Entries never expire and are never evicted; the options only control how
/// concurrent first accesses are coordinated and whether statistics are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Serialize concurrent misses for the same filename so the remote
    /// source is asked at most once per successful fetch.
    /// When disabled, simultaneous misses each fetch and the last write wins.
    pub single_flight: bool,

    /// Enable hit/miss/fetch counters
    pub enable_metrics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            single_flight: true,
            enable_metrics: true,
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    single_flight: Option<bool>,
    enable_metrics: Option<bool>,
}

impl CacheConfigBuilder {
    /// Enable or disable per-filename fetch coordination
    pub fn single_flight(mut self, enable: bool) -> Self {
        self.single_flight = Some(enable);
        self
    }

    /// Enable or disable metrics collection
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = Some(enable);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            single_flight: self.single_flight.unwrap_or(defaults.single_flight),
            enable_metrics: self.enable_metrics.unwrap_or(defaults.enable_metrics),
        }
    }
}
