use chrono::{DateTime, Utc};
use cronwave_core::Result;

use super::Signal;

/// Whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl WallClock {
    pub const NAME: &'static str = "epoch_seconds";
}

impl Signal for WallClock {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn help(&self) -> &str {
        "Seconds since Unix epoch."
    }

    fn sample(&self, now: DateTime<Utc>) -> Result<f64> {
        Ok(now.timestamp() as f64)
    }
}
