//! Search module for Alltagslabor
//!
//! Filtering, exact lookup and grade listing over the experiment
//! collection. Matching is exact equality or plain substring containment;
//! there is no ranking.

pub mod catalog;
pub mod engine;
pub mod grades;
pub mod matcher;
pub mod types;

pub use catalog::ExperimentCatalog;
pub use engine::QueryEngine;
pub use grades::{grade_order, sort_grades};
pub use matcher::FreeText;
pub use types::SearchFilters;
