//! Common types for the query engine

use serde::{Deserialize, Serialize};

/// Optional criteria for an experiment search
///
/// Every supplied criterion must match (logical AND). An empty string counts
/// as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Case-insensitive equality on the subject
    pub subject: Option<String>,
    /// Exact equality on the grade level
    pub grade_level: Option<String>,
    /// Case-insensitive equality on the school type
    pub school_type: Option<String>,
    /// Case-insensitive substring over title, short description and step contents
    pub freetext: Option<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = non_empty(Some(subject.into()));
        self
    }

    pub fn with_grade_level(mut self, grade_level: impl Into<String>) -> Self {
        self.grade_level = non_empty(Some(grade_level.into()));
        self
    }

    pub fn with_school_type(mut self, school_type: impl Into<String>) -> Self {
        self.school_type = non_empty(Some(school_type.into()));
        self
    }

    pub fn with_freetext(mut self, freetext: impl Into<String>) -> Self {
        self.freetext = non_empty(Some(freetext.into()));
        self
    }

    /// Drop criteria given as empty strings
    pub fn normalized(self) -> Self {
        Self {
            subject: non_empty(self.subject),
            grade_level: non_empty(self.grade_level),
            school_type: non_empty(self.school_type),
            freetext: non_empty(self.freetext),
        }
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.grade_level.is_none()
            && self.school_type.is_none()
            && self.freetext.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
