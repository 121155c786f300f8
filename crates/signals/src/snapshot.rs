//! Per-collection results.

use chrono::{DateTime, Utc};

/// One evaluated signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub help: String,
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

/// Every registered signal evaluated at one instant.
///
/// Built fresh for each collection request and dropped after serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSnapshot {
    pub taken_at: DateTime<Utc>,
    /// Sorted by name.
    pub samples: Vec<Sample>,
}

impl SignalSnapshot {
    /// Value of the named signal, if present.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.samples.iter().find(|s| s.name == name).map(|s| s.value)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}
