//! Region-keyed lookup tables (subjects and school types)

use crate::error::{DataError, Result};
use crate::schema::experiment::json_kind;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Mapping from region name to an ordered list of labels
///
/// Regions keep the order of the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionTable {
    regions: Vec<(String, Vec<String>)>,
}

impl RegionTable {
    /// Decode and validate a lookup document
    ///
    /// `name` identifies the document in error messages.
    pub fn from_value(value: &Value, name: &str) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            DataError::Validation(format!(
                "{name} must be a JSON object, got {}",
                json_kind(value)
            ))
        })?;

        let regions = object
            .iter()
            .map(|(region, labels)| {
                Vec::<String>::deserialize(labels)
                    .map(|labels| (region.clone(), labels))
                    .map_err(|e| {
                        DataError::Validation(format!("{name}: region {region:?}: {e}"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { regions })
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|(region, _)| region.as_str())
    }

    /// Labels for one region
    pub fn get(&self, region: &str) -> Option<&[String]> {
        self.regions
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, labels)| labels.as_slice())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Serialize for RegionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.regions.len()))?;
        for (region, labels) in &self.regions {
            map.serialize_entry(region, labels)?;
        }
        map.end()
    }
}
