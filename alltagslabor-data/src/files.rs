//! The fixed set of resources published by the remote content host

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a fetched body is decoded before it is cached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Parse the body as a JSON document
    Json,
    /// Keep the body as plain text
    Text,
}

/// Remote resources consumed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFile {
    /// The experiment collection (JSON array)
    Experiments,
    /// Subjects grouped by region (JSON object)
    Subjects,
    /// School types grouped by region (JSON object)
    SchoolTypes,
    /// Legal notice (plain text)
    Impressum,
}

impl RemoteFile {
    /// Filename on the content host
    pub fn filename(&self) -> &'static str {
        match self {
            RemoteFile::Experiments => "_experiments.json",
            RemoteFile::Subjects => "subjects.json",
            // The upstream repository spells it this way.
            RemoteFile::SchoolTypes => "typeOfSchoole.json",
            RemoteFile::Impressum => "impressum.txt",
        }
    }

    pub fn decode_mode(&self) -> DecodeMode {
        match self {
            RemoteFile::Impressum => DecodeMode::Text,
            _ => DecodeMode::Json,
        }
    }

    pub fn all() -> [RemoteFile; 4] {
        [
            RemoteFile::Experiments,
            RemoteFile::Subjects,
            RemoteFile::SchoolTypes,
            RemoteFile::Impressum,
        ]
    }
}

impl fmt::Display for RemoteFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filename())
    }
}
