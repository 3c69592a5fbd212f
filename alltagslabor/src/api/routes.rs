//! API routes for Alltagslabor

use alltagslabor_data::{Experiment, Impressum, RegionTable, RemoteSource};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::search::{ExperimentCatalog, SearchFilters};

use super::error::ApiError;

/// Application state
pub struct AppState<S> {
    pub catalog: ExperimentCatalog<S>,
}

/// Service info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub message: String,
    pub version: String,
}

/// Search query parameters
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub subject: Option<String>,
    pub grade_level: Option<String>,
    pub school_type: Option<String>,
    pub freetext: Option<String>,
}

impl SearchQuery {
    /// Collect the known parameters from decoded query pairs.
    ///
    /// A repeated parameter keeps its last value; unknown names are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "subject" => &mut query.subject,
                "gradeLevel" => &mut query.grade_level,
                "schoolType" => &mut query.school_type,
                "freetext" => &mut query.freetext,
                _ => continue,
            };
            *slot = Some(value);
        }
        query
    }
}

impl From<SearchQuery> for SearchFilters {
    fn from(query: SearchQuery) -> Self {
        SearchFilters {
            subject: query.subject,
            grade_level: query.grade_level,
            school_type: query.school_type,
            freetext: query.freetext,
        }
        .normalized()
    }
}

/// Service info endpoint
pub async fn service_info() -> impl IntoResponse {
    Json(InfoResponse {
        message: "Alltagslabor API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full experiment collection
pub async fn list_experiments<S: RemoteSource>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Experiment>>, ApiError> {
    Ok(Json(state.catalog.list_all().await?))
}

/// Filtered experiment collection
pub async fn search_experiments<S: RemoteSource>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Experiment>>, ApiError> {
    let Query(pairs) = params?;
    let filters = SearchFilters::from(SearchQuery::from_pairs(pairs));
    Ok(Json(state.catalog.search(&filters).await?))
}

/// Exact-title lookup
pub async fn get_experiment<S: RemoteSource>(
    State(state): State<Arc<AppState<S>>>,
    Path(title): Path<String>,
) -> Result<Json<Experiment>, ApiError> {
    Ok(Json(state.catalog.get_by_title(&title).await?))
}

/// Subjects by region
pub async fn subjects<S: RemoteSource>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<RegionTable>, ApiError> {
    Ok(Json(state.catalog.subjects().await?))
}

/// School types by region
pub async fn school_types<S: RemoteSource>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<RegionTable>, ApiError> {
    Ok(Json(state.catalog.school_types().await?))
}

/// Sorted distinct grade levels
pub async fn grades<S: RemoteSource>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.catalog.grade_levels().await?))
}

/// Legal notice
pub async fn impressum<S: RemoteSource>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Impressum>, ApiError> {
    Ok(Json(state.catalog.impressum().await?))
}
