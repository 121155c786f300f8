//! Synthetic signal sources and their registry.
//!
//! This crate provides:
//! - Five-field cron expressions with standard semantics, backed by `cron`
//! - The [`Signal`] trait and its variants (oscillation, wall clock, window membership, build info)
//! - [`SignalRegistry`] for name-unique registration and single-instant collection

pub mod registry;
pub mod schedule;
pub mod signal;
pub mod snapshot;
mod standard;

pub use registry::SignalRegistry;
pub use schedule::CronSchedule;
pub use signal::{BuildInfo, Oscillation, Signal, WallClock, WindowMembership, WINDOW_LOOKAHEAD};
pub use snapshot::{Sample, SignalSnapshot};
pub use standard::standard_registry;
