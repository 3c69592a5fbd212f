//! Query engine over the experiment collection
//!
//! Every query is a pure read over a borrowed collection; results keep the
//! collection's order.

use alltagslabor_data::{DataError, Experiment, Result};
use std::collections::HashSet;
use tracing::debug;

use super::grades::sort_grades;
use super::matcher::{eq_ignore_case, FreeText};
use super::types::SearchFilters;

/// Read-only queries over a decoded collection
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    experiments: &'a [Experiment],
}

impl<'a> QueryEngine<'a> {
    pub fn new(experiments: &'a [Experiment]) -> Self {
        Self { experiments }
    }

    /// The full collection in source order
    pub fn list_all(&self) -> &'a [Experiment] {
        self.experiments
    }

    /// First experiment whose title equals `title` byte-for-byte
    pub fn get_by_title(&self, title: &str) -> Result<&'a Experiment> {
        self.experiments
            .iter()
            .find(|exp| exp.title == title)
            .ok_or_else(|| DataError::NotFound("Experiment".to_string()))
    }

    /// Experiments satisfying every supplied criterion
    ///
    /// Criteria are applied in the order subject, grade level, school type,
    /// free text.
    pub fn search(&self, filters: &SearchFilters) -> Vec<&'a Experiment> {
        let mut results: Vec<&'a Experiment> = self.experiments.iter().collect();

        if let Some(subject) = filters.subject.as_deref().filter(|s| !s.is_empty()) {
            results.retain(|exp| eq_ignore_case(&exp.subject, subject));
            debug!("subject={:?}: {} remaining", subject, results.len());
        }

        if let Some(grade_level) = filters.grade_level.as_deref().filter(|s| !s.is_empty()) {
            results.retain(|exp| exp.grade_level == grade_level);
            debug!("gradeLevel={:?}: {} remaining", grade_level, results.len());
        }

        if let Some(school_type) = filters.school_type.as_deref().filter(|s| !s.is_empty()) {
            results.retain(|exp| eq_ignore_case(&exp.school_type, school_type));
            debug!("schoolType={:?}: {} remaining", school_type, results.len());
        }

        if let Some(term) = filters.freetext.as_deref().filter(|s| !s.is_empty()) {
            let freetext = FreeText::new(term);
            results.retain(|exp| freetext.matches(exp));
            debug!("freetext={:?}: {} remaining", freetext.term(), results.len());
        }

        results
    }

    /// Distinct grade levels, numeric ones ascending first
    pub fn list_grade_levels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut grades: Vec<String> = self
            .experiments
            .iter()
            .filter(|exp| seen.insert(exp.grade_level.as_str()))
            .map(|exp| exp.grade_level.clone())
            .collect();

        sort_grades(&mut grades);
        grades
    }
}
