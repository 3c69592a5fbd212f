//! API server for Alltagslabor

use alltagslabor_data::{CacheConfig, ContentCache, HttpSource, RemoteSource, SourceConfig};
use anyhow::Result;
use axum::{middleware::from_fn, routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::search::ExperimentCatalog;

use super::middleware::log_requests;
use super::routes::{
    get_experiment, grades, impressum, list_experiments, school_types, search_experiments,
    service_info, subjects, AppState,
};

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    pub host: String,
    pub port: u16,
    pub source: SourceConfig,
    pub cache: CacheConfig,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            source: SourceConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl ApiServerConfig {
    /// Load from `ALLTAGSLABOR_HOST`, `ALLTAGSLABOR_PORT` and the source
    /// variables, keeping defaults for anything unset or invalid
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("ALLTAGSLABOR_HOST").unwrap_or(defaults.host);
        let port = match std::env::var("ALLTAGSLABOR_PORT") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
                warn!("Invalid ALLTAGSLABOR_PORT value {raw:?}: {e}, using default");
                defaults.port
            }),
            Err(_) => defaults.port,
        };

        Self {
            host,
            port,
            source: SourceConfig::from_env(),
            cache: defaults.cache,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Build the router for a catalog
pub fn router<S: RemoteSource>(catalog: ExperimentCatalog<S>) -> Router {
    let state = Arc::new(AppState { catalog });

    Router::new()
        .route("/api", get(service_info))
        .route("/api/", get(service_info))
        .route("/api/experiments", get(list_experiments::<S>))
        .route("/api/experiments/search", get(search_experiments::<S>))
        .route("/api/experiments/:title", get(get_experiment::<S>))
        .route("/api/subjects", get(subjects::<S>))
        .route("/api/school-types", get(school_types::<S>))
        .route("/api/grades", get(grades::<S>))
        .route("/api/impressum", get(impressum::<S>))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(log_requests))
                .layer(CorsLayer::permissive()),
        )
}

/// API server
pub struct ApiServer<S = HttpSource> {
    config: ApiServerConfig,
    catalog: ExperimentCatalog<S>,
}

impl ApiServer<HttpSource> {
    /// Create a server reading from the configured HTTP content host
    pub fn new(config: ApiServerConfig) -> alltagslabor_data::Result<Self> {
        let source = HttpSource::new(config.source.clone())?;
        Ok(Self::with_source(config, source))
    }
}

impl<S: RemoteSource> ApiServer<S> {
    /// Create a server over any content source
    pub fn with_source(config: ApiServerConfig, source: S) -> Self {
        let cache = Arc::new(ContentCache::new(source, config.cache.clone()));
        Self {
            config,
            catalog: ExperimentCatalog::new(cache),
        }
    }

    pub fn catalog(&self) -> &ExperimentCatalog<S> {
        &self.catalog
    }

    pub fn router(&self) -> Router {
        router(self.catalog.clone())
    }

    /// Bind the configured address and serve until the process exits
    pub async fn start(self) -> Result<()> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        info!("Starting API server on {}", listener.local_addr()?);

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
