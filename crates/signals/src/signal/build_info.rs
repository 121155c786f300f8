use chrono::{DateTime, Utc};
use cronwave_core::Result;

use super::Signal;

/// Constant `1` carrying the running build's name and version as labels.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    name: String,
    version: String,
}

impl BuildInfo {
    pub const NAME: &'static str = "cronwave_build_info";

    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl Signal for BuildInfo {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn help(&self) -> &str {
        "Build information about the running binary."
    }

    fn labels(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone()), ("version", self.version.clone())]
    }

    fn sample(&self, _now: DateTime<Utc>) -> Result<f64> {
        Ok(1.0)
    }
}
