//! Text matching rules used by the query engine

use alltagslabor_data::Experiment;

/// Case-insensitive equality (Unicode lowercase on both sides)
pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.to_lowercase()
}

/// Case-insensitive substring search over an experiment's text surfaces
///
/// Searched: title, short description and each step's content. Step type
/// and step description are not searched.
#[derive(Debug, Clone)]
pub struct FreeText {
    needle: String,
}

impl FreeText {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    pub fn term(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, experiment: &Experiment) -> bool {
        self.found_in(&experiment.title)
            || self.found_in(&experiment.short_description)
            || experiment.steps.iter().any(|step| self.found_in(&step.content))
    }

    fn found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }
}
