use std::f64::consts::TAU;
use std::time::Duration;

use chrono::{DateTime, Utc};
use cronwave_core::{CronwaveError, Result};

use super::Signal;

/// Sine wave completing one full cycle per `period`, phase zero at `start`.
#[derive(Debug, Clone)]
pub struct Oscillation {
    start: DateTime<Utc>,
    period: Duration,
}

impl Oscillation {
    pub const NAME: &'static str = "sin";

    /// Fails with `InvalidConfiguration` for a zero period.
    pub fn new(start: DateTime<Utc>, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(CronwaveError::InvalidConfiguration(
                "oscillation period must be positive".to_string(),
            ));
        }
        Ok(Self { start, period })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// `sin(2π · (now − start) / period)`. `now` before `start` gives a
    /// negative phase rather than clamping.
    pub fn value_at(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = now.signed_duration_since(self.start);
        let elapsed_secs = match elapsed.num_nanoseconds() {
            Some(ns) => ns as f64 * 1e-9,
            // beyond ±292 years nanoseconds overflow i64
            None => elapsed.num_milliseconds() as f64 * 1e-3,
        };
        (TAU * elapsed_secs / self.period.as_secs_f64()).sin()
    }
}

impl Signal for Oscillation {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn help(&self) -> &str {
        "Oscillating sin function."
    }

    fn sample(&self, now: DateTime<Utc>) -> Result<f64> {
        Ok(self.value_at(now))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn zero_period_is_rejected() {
        let err = Oscillation::new(t0(), Duration::ZERO).unwrap_err();
        assert!(matches!(err, CronwaveError::InvalidConfiguration(_)));
    }

    #[test]
    fn four_second_period_samples() {
        let osc = Oscillation::new(t0(), Duration::from_secs(4)).unwrap();
        let expected = [0.0, 1.0, 0.0, -1.0, 0.0];
        for (i, want) in expected.iter().enumerate() {
            let now = t0() + chrono::Duration::seconds(i as i64);
            let got = osc.value_at(now);
            assert!(approx(got, *want), "t0+{i}s: got {got}, want {want}");
        }
    }

    #[test]
    fn quarter_period_peaks_and_full_period_repeats() {
        for period_ms in [250u64, 1_000, 60_000, 300_000, 86_400_000] {
            let period = Duration::from_millis(period_ms);
            let osc = Oscillation::new(t0(), period).unwrap();
            let period_ns = period_ms as i64 * 1_000_000;
            let quarter = t0() + chrono::Duration::nanoseconds(period_ns / 4);
            let full = t0() + chrono::Duration::nanoseconds(period_ns);

            assert!(approx(osc.value_at(t0()), 0.0));
            assert!(approx(osc.value_at(quarter), 1.0), "period {period_ms}ms");
            assert!(approx(osc.value_at(full), osc.value_at(t0())), "period {period_ms}ms");
        }
    }

    #[test]
    fn sub_second_elapsed_is_not_truncated() {
        let osc = Oscillation::new(t0(), Duration::from_secs(1)).unwrap();
        let now = t0() + chrono::Duration::milliseconds(250);
        assert!(approx(osc.value_at(now), 1.0));
    }

    #[test]
    fn before_start_is_negative_phase() {
        let osc = Oscillation::new(t0(), Duration::from_secs(4)).unwrap();
        let now = t0() - chrono::Duration::seconds(1);
        assert!(approx(osc.value_at(now), -1.0));

        let now = t0() - chrono::Duration::milliseconds(500);
        let want = -(std::f64::consts::FRAC_PI_4).sin();
        assert!(approx(osc.value_at(now), want));
    }

    #[test]
    fn sample_matches_value_at() {
        let osc = Oscillation::new(t0(), Duration::from_secs(10)).unwrap();
        let now = t0() + chrono::Duration::milliseconds(1_234);
        assert_eq!(osc.sample(now).unwrap(), osc.value_at(now));
        assert_eq!(osc.name(), "sin");
    }
}
