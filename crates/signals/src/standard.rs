use chrono::{DateTime, Utc};
use cronwave_core::{Config, Result};

use crate::registry::SignalRegistry;
use crate::schedule::CronSchedule;
use crate::signal::{BuildInfo, Oscillation, WallClock, WindowMembership};

/// Build the registry the exporter serves: `sin`, `epoch_seconds`,
/// `time_interval` and the build-info gauge.
///
/// `start` is the oscillation's phase origin. Fails on an invalid cron
/// expression or period.
pub fn standard_registry(
    config: &Config,
    start: DateTime<Utc>,
    build: BuildInfo,
) -> Result<SignalRegistry> {
    let schedule = CronSchedule::parse(&config.cron_expression)?;

    let mut registry = SignalRegistry::new();
    registry.register(Oscillation::new(start, config.oscillation_period)?)?;
    registry.register(WallClock)?;
    registry.register(WindowMembership::new(schedule))?;
    registry.register(build)?;
    Ok(registry)
}
