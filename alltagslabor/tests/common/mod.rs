//! Shared fixtures: an in-process content source with a sample collection

#![allow(dead_code)]

use alltagslabor_data::{DataError, RemoteSource, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const EXPERIMENTS: &str = r#"[
  {
    "title": "Mechanik Experimente",
    "shortDescription": "Hebel und Kräfte im Alltag",
    "subject": "Physik",
    "gradeLevel": "7",
    "schoolType": "Gymnasium",
    "steps": [
      {"type": "text", "content": "Lineal auf einen Stift legen", "description": "Aufbau"},
      {"type": "image", "content": "hebel.png"}
    ]
  },
  {
    "title": "Rotkohl-Indikator",
    "shortDescription": "Säuren und Basen sichtbar machen",
    "subject": "Chemie",
    "gradeLevel": "8",
    "schoolType": "Realschule",
    "steps": [
      {"type": "text", "content": "Rotkohl kochen und den Saft abgießen", "description": "Mechanik nicht nötig"}
    ]
  },
  {
    "title": "Lichtbrechung",
    "shortDescription": "Ein Strohhalm im Wasserglas",
    "subject": "physik",
    "gradeLevel": "10",
    "schoolType": "gymnasium",
    "steps": [
      {"type": "text", "content": "Die MECHANIK des Auges beobachten"}
    ]
  },
  {
    "title": "Zellen unter dem Mikroskop",
    "shortDescription": "Zwiebelhaut untersuchen",
    "subject": "Biologie",
    "gradeLevel": "Oberstufe",
    "schoolType": "Gymnasium",
    "steps": []
  },
  {
    "title": "Schwimmen und Sinken",
    "shortDescription": "Was schwimmt?",
    "subject": "Sachunterricht",
    "gradeLevel": "5",
    "schoolType": "Grundschule",
    "steps": [
      {"type": "text", "content": "Gegenstände ins Wasser legen"}
    ]
  },
  {
    "title": "Kristalle züchten",
    "shortDescription": "Salzkristalle am Faden",
    "subject": "Chemie",
    "gradeLevel": "7a",
    "schoolType": "Gymnasium",
    "steps": []
  }
]"#;

pub const SUBJECTS: &str = r#"{"Sachsen": ["Physik", "Chemie"], "Bayern": ["Biologie"]}"#;

pub const SCHOOL_TYPES: &str = r#"{"Sachsen": ["Gymnasium", "Oberschule"], "Bayern": ["Realschule"]}"#;

pub const IMPRESSUM: &str = "Alltagslabor\nAngaben gemäß § 5 TMG";

/// Content source serving fixed files, counting and optionally failing calls
pub struct FixtureSource {
    files: HashMap<String, String>,
    calls: AtomicUsize,
    failures_left: AtomicUsize,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::with_experiments(EXPERIMENTS)
    }

    pub fn with_experiments(experiments: &str) -> Self {
        let files = [
            ("_experiments.json", experiments),
            ("subjects.json", SUBJECTS),
            ("typeOfSchoole.json", SCHOOL_TYPES),
            ("impressum.txt", IMPRESSUM),
        ]
        .into_iter()
        .map(|(name, body)| (name.to_string(), body.to_string()))
        .collect();

        Self {
            files,
            calls: AtomicUsize::new(0),
            failures_left: AtomicUsize::new(0),
        }
    }

    /// Fail the next `n` retrievals
    pub fn failing_first(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteSource for FixtureSource {
    async fn fetch(&self, filename: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(DataError::fetch(filename, "connection reset by peer"));
        }

        self.files
            .get(filename)
            .cloned()
            .ok_or_else(|| DataError::fetch(filename, "HTTP status 404 Not Found"))
    }
}
