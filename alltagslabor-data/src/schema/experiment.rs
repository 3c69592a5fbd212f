//! Experiment records decoded from the remote collection

use crate::error::{DataError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One step of an experiment's instructions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentStep {
    /// Kind of step (e.g. "text", "image")
    #[serde(rename = "type")]
    pub step_type: String,
    /// Step body; included in free-text search
    pub content: String,
    /// Optional caption, empty when absent or null
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// A single experiment from the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    /// Natural key, matched byte-for-byte by title lookups
    pub title: String,
    pub short_description: String,
    pub subject: String,
    /// Usually a number rendered as text, sometimes a label like "Oberstufe"
    pub grade_level: String,
    pub steps: Vec<ExperimentStep>,
    pub school_type: String,
}

impl ExperimentStep {
    pub fn new(step_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            step_type: step_type.into(),
            content: content.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Legal notice response wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Impressum {
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decode and validate the whole experiment collection
///
/// The payload must be a JSON array whose every element is a complete
/// experiment record. A single malformed record fails the whole decode.
pub fn decode_experiments(value: &Value) -> Result<Vec<Experiment>> {
    let items = value.as_array().ok_or_else(|| {
        DataError::Validation(format!(
            "experiment collection must be a JSON array, got {}",
            json_kind(value)
        ))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Experiment::deserialize(item).map_err(|e| {
                let label = match item.get("title").and_then(Value::as_str) {
                    Some(title) => format!("experiment #{index} ({title:?})"),
                    None => format!("experiment #{index}"),
                };
                DataError::Validation(format!("{label}: {e}"))
            })
        })
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
