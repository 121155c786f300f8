//! Cron schedule evaluation.
//!
//! [`CronSchedule`] parses a standard 5-field cron expression
//! (`minute hour day-of-month month day-of-week`) and answers "when is the
//! next occurrence after this instant?". Field parsing and validation happen
//! here; calendar iteration (month lengths, leap years) is delegated to the
//! `cron` crate. All evaluation is in UTC.

pub(crate) mod cron;
mod fields;


use std::fmt;

use chrono::{DateTime, Datelike, Timelike, Utc};
use cronwave_core::{CronwaveError, Result};

use self::cron::{compile, expand_macro, parse_fields, to_cron_expressions};
use self::fields::Field;

/// A parsed, immutable recurring schedule.
#[derive(Clone)]
pub struct CronSchedule {
    expression: String,
    fields: [Field; 5],
    compiled: Vec<::cron::Schedule>,
}

impl CronSchedule {
    /// Parse a cron expression.
    ///
    /// Fails with [`CronwaveError::InvalidSchedule`] if the expression is
    /// malformed, a value is out of range, or it can never match.
    pub fn parse(expr: &str) -> Result<Self> {
        let expression = expr.trim().to_string();
        let body = expand_macro(&expression).unwrap_or(expression.as_str());

        let fields = parse_fields(body).map_err(|e| CronwaveError::schedule(&expression, e))?;
        let compiled = compile(&to_cron_expressions(&fields))
            .map_err(|e| CronwaveError::schedule(&expression, e))?;

        let schedule = Self {
            expression,
            fields,
            compiled,
        };

        if schedule.next_after(DateTime::<Utc>::default()).is_none() {
            return Err(CronwaveError::schedule(
                &schedule.expression,
                "expression never matches any date",
            ));
        }

        Ok(schedule)
    }

    /// The expression as written.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The first matching instant strictly after `from`.
    ///
    /// Returns `None` only when no occurrence exists within the calendar range
    /// the `cron` crate iterates (up to year 2100).
    pub fn next_after(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.compiled
            .iter()
            .filter_map(|s| s.after(&from).find(|t| *t > from))
            .min()
    }

    /// Whether `at` is an occurrence of this schedule (second and
    /// sub-second must be zero).
    pub fn matches(&self, at: DateTime<Utc>) -> bool {
        let [minute, hour, dom, month, dow] = &self.fields;
        if at.second() != 0 || at.nanosecond() != 0 {
            return false;
        }
        if !minute.contains(at.minute()) || !hour.contains(at.hour()) || !month.contains(at.month()) {
            return false;
        }

        let dom_hit = dom.contains(at.day());
        let dow_hit = dow.contains(at.weekday().num_days_from_sunday());
        match (dom.wildcard, dow.wildcard) {
            (false, false) => dom_hit || dow_hit,
            _ => dom_hit && dow_hit,
        }
    }
}

impl fmt::Debug for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CronSchedule")
            .field("expression", &self.expression)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl std::str::FromStr for CronSchedule {
    type Err = CronwaveError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
