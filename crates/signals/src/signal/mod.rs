//! The [`Signal`] capability and its concrete variants.
//!
//! A signal is a named, total, side-effect-free value producer. It holds only
//! immutable data fixed at startup and receives the evaluation instant as an
//! argument, so one collection can hand the same `now` to every signal and
//! concurrent collections never share mutable state.

mod build_info;
mod oscillation;
mod wall_clock;
mod window;

pub use build_info::BuildInfo;
pub use oscillation::Oscillation;
pub use wall_clock::WallClock;
pub use window::{WindowMembership, WINDOW_LOOKAHEAD};

use chrono::{DateTime, Utc};
use cronwave_core::Result;

/// A named, zero-argument value producer exposed for collection.
pub trait Signal: Send + Sync + 'static {
    /// Metric name (`[a-zA-Z_:][a-zA-Z0-9_:]*`).
    fn name(&self) -> &str;

    /// One-line description for the `# HELP` line.
    fn help(&self) -> &str;

    /// Constant labels attached to every sample.
    fn labels(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Evaluate the signal at `now`.
    ///
    /// Implementations must not read the clock themselves.
    fn sample(&self, now: DateTime<Utc>) -> Result<f64>;
}

/// Whether `name` is a valid metric name.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}
