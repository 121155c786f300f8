use std::time::Duration;

use chrono::{DateTime, Utc};
use cronwave_core::{CronwaveError, Result};

use super::Signal;
use crate::schedule::CronSchedule;

/// How far ahead of the next scheduled occurrence the indicator turns on.
pub const WINDOW_LOOKAHEAD: Duration = Duration::from_secs(60);

/// 1 while the next occurrence of `schedule` is less than [`WINDOW_LOOKAHEAD`]
/// away, 0 otherwise.
///
/// For a schedule listing consecutive minutes (e.g. `0-5`) this stays 1 for
/// the whole window, dropping to 0 only at the exact minute boundaries.
#[derive(Debug, Clone)]
pub struct WindowMembership {
    schedule: CronSchedule,
    lookahead: Duration,
}

impl WindowMembership {
    pub const NAME: &'static str = "time_interval";

    pub fn new(schedule: CronSchedule) -> Self {
        Self {
            schedule,
            lookahead: WINDOW_LOOKAHEAD,
        }
    }

    pub fn schedule(&self) -> &CronSchedule {
        &self.schedule
    }

    /// Both the lookup and the comparison use the same `now`.
    pub fn indicator_at(&self, now: DateTime<Utc>) -> Result<f64> {
        let next = self
            .schedule
            .next_after(now)
            .ok_or_else(|| CronwaveError::Collection {
                signal: Self::NAME.to_string(),
                reason: format!("schedule '{}' has no further occurrence", self.schedule),
            })?;

        let within = next
            .signed_duration_since(now)
            .to_std()
            .map(|remaining| remaining < self.lookahead)
            .unwrap_or(false);
        Ok(if within { 1.0 } else { 0.0 })
    }
}

impl Signal for WindowMembership {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn help(&self) -> &str {
        "1 when the next scheduled window starts in under a minute, otherwise 0."
    }

    fn sample(&self, now: DateTime<Utc>) -> Result<f64> {
        self.indicator_at(now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, h, m, s).unwrap()
    }

    fn window(expr: &str) -> WindowMembership {
        WindowMembership::new(CronSchedule::parse(expr).unwrap())
    }

    #[test]
    fn two_minutes_before_window_is_off() {
        // next occurrence is 11:00, two minutes away
        assert_eq!(window("0-5 * * * *").indicator_at(at(10, 58, 0)).unwrap(), 0.0);
    }

    #[test]
    fn boundary_is_strictly_less_than() {
        let w = window("0-5 * * * *");
        let eps = chrono::Duration::milliseconds(1);

        // exactly 60s before 11:00
        assert_eq!(w.indicator_at(at(10, 59, 0)).unwrap(), 0.0);
        // 60s - ε before
        assert_eq!(w.indicator_at(at(10, 59, 0) + eps).unwrap(), 1.0);
        // 60s + ε before
        assert_eq!(w.indicator_at(at(10, 59, 0) - eps).unwrap(), 0.0);
        assert_eq!(w.indicator_at(at(10, 59, 30)).unwrap(), 1.0);
    }

    #[test]
    fn stays_on_inside_window_except_on_minute_marks() {
        let w = window("0-5 * * * *");
        assert_eq!(w.indicator_at(at(11, 2, 30)).unwrap(), 1.0);
        assert_eq!(w.indicator_at(at(11, 4, 59)).unwrap(), 1.0);
        // on the minute mark the next occurrence is a full minute away
        assert_eq!(w.indicator_at(at(11, 3, 0)).unwrap(), 0.0);
    }

    #[test]
    fn off_after_window_closes() {
        let w = window("0-5 * * * *");
        assert_eq!(w.indicator_at(at(11, 5, 0)).unwrap(), 0.0);
        assert_eq!(w.indicator_at(at(11, 5, 30)).unwrap(), 0.0);
        assert_eq!(w.indicator_at(at(11, 30, 0)).unwrap(), 0.0);
    }

    #[test]
    fn default_expression_toggles_every_ten_minutes() {
        let w = window(cronwave_core::config::DEFAULT_CRON_EXPRESSION);
        assert_eq!(w.indicator_at(at(10, 7, 30)).unwrap(), 0.0);
        assert_eq!(w.indicator_at(at(10, 9, 30)).unwrap(), 1.0);
        assert_eq!(w.indicator_at(at(10, 12, 30)).unwrap(), 1.0);
        assert_eq!(w.indicator_at(at(10, 16, 30)).unwrap(), 0.0);
    }
}
