//! Experiment catalog backed by the content cache

use std::sync::Arc;

use alltagslabor_data::{
    decode_experiments, ContentCache, DataError, Experiment, Impressum, RegionTable,
    RemoteFile, RemoteSource, Result,
};
use serde_json::Value;
use tracing::debug;

use super::engine::QueryEngine;
use super::types::SearchFilters;

/// Entry point for every read the service offers
///
/// The catalog keeps no copy of the data: each call takes the current
/// collection from the shared cache, decodes it and runs the query.
pub struct ExperimentCatalog<S> {
    cache: Arc<ContentCache<S>>,
}

impl<S> Clone for ExperimentCatalog<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S: RemoteSource> ExperimentCatalog<S> {
    pub fn new(cache: Arc<ContentCache<S>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ContentCache<S> {
        &self.cache
    }

    /// Decoded experiment collection
    pub async fn experiments(&self) -> Result<Vec<Experiment>> {
        let file = RemoteFile::Experiments;
        let content = self.cache.get_file(file).await?;
        let experiments = decode_experiments(json_of(file, content.as_json())?)?;

        debug!("Decoded {} experiments", experiments.len());
        Ok(experiments)
    }

    pub async fn list_all(&self) -> Result<Vec<Experiment>> {
        self.experiments().await
    }

    pub async fn get_by_title(&self, title: &str) -> Result<Experiment> {
        let experiments = self.experiments().await?;
        QueryEngine::new(&experiments).get_by_title(title).cloned()
    }

    pub async fn search(&self, filters: &SearchFilters) -> Result<Vec<Experiment>> {
        let experiments = self.experiments().await?;
        let results = QueryEngine::new(&experiments)
            .search(filters)
            .into_iter()
            .cloned()
            .collect();
        Ok(results)
    }

    pub async fn grade_levels(&self) -> Result<Vec<String>> {
        let experiments = self.experiments().await?;
        Ok(QueryEngine::new(&experiments).list_grade_levels())
    }

    /// Subjects by region
    pub async fn subjects(&self) -> Result<RegionTable> {
        self.region_table(RemoteFile::Subjects).await
    }

    /// School types by region
    pub async fn school_types(&self) -> Result<RegionTable> {
        self.region_table(RemoteFile::SchoolTypes).await
    }

    pub async fn impressum(&self) -> Result<Impressum> {
        let file = RemoteFile::Impressum;
        let content = self.cache.get_file(file).await?;
        let text = content
            .as_text()
            .ok_or_else(|| DataError::Validation(format!("{file} is not a text document")))?;

        Ok(Impressum {
            content: text.to_string(),
        })
    }

    async fn region_table(&self, file: RemoteFile) -> Result<RegionTable> {
        let content = self.cache.get_file(file).await?;
        RegionTable::from_value(json_of(file, content.as_json())?, file.filename())
    }
}

fn json_of(file: RemoteFile, value: Option<&Value>) -> Result<&Value> {
    value.ok_or_else(|| DataError::Validation(format!("{file} is not a JSON document")))
}
