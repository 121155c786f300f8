//! [`SignalRegistry`]: owns the registered signals and evaluates them per collection.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use cronwave_core::{CronwaveError, Result};
use tracing::{debug, info};

use crate::signal::{is_valid_name, Signal};
use crate::snapshot::{Sample, SignalSnapshot};

/// Name-keyed set of signals.
///
/// All registration happens during startup through `&mut self`; the server
/// then shares the registry as `Arc<SignalRegistry>` and only calls
/// [`collect`](SignalRegistry::collect), which takes `&self`. No locking is
/// needed on the read path.
#[derive(Default)]
pub struct SignalRegistry {
    signals: BTreeMap<String, Box<dyn Signal>>,
}

impl SignalRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signal under its own name.
    ///
    /// Fails with `DuplicateSignal` if the name is taken, or
    /// `InvalidConfiguration` if it is not a valid metric name.
    pub fn register<S: Signal>(&mut self, signal: S) -> Result<()> {
        self.register_boxed(Box::new(signal))
    }

    pub fn register_boxed(&mut self, signal: Box<dyn Signal>) -> Result<()> {
        let name = signal.name().to_string();
        if !is_valid_name(&name) {
            return Err(CronwaveError::InvalidConfiguration(format!(
                "invalid signal name '{name}'"
            )));
        }
        if self.signals.contains_key(&name) {
            return Err(CronwaveError::DuplicateSignal(name));
        }

        info!(signal = %name, "Signal registered");
        self.signals.insert(name, signal);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.signals.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.signals.keys().map(String::as_str)
    }

    /// Evaluate every signal at the current instant.
    pub fn collect(&self) -> Result<SignalSnapshot> {
        self.collect_at(Utc::now())
    }

    /// Evaluate every signal exactly once at `now`.
    ///
    /// The first failing signal fails the whole collection; a non-finite
    /// value counts as a failure.
    pub fn collect_at(&self, now: DateTime<Utc>) -> Result<SignalSnapshot> {
        let mut samples = Vec::with_capacity(self.signals.len());

        for (name, signal) in &self.signals {
            let value = signal.sample(now).map_err(|e| match e {
                err @ CronwaveError::Collection { .. } => err,
                other => CronwaveError::Collection {
                    signal: name.clone(),
                    reason: other.to_string(),
                },
            })?;

            if !value.is_finite() {
                return Err(CronwaveError::Collection {
                    signal: name.clone(),
                    reason: format!("produced non-finite value {value}"),
                });
            }

            samples.push(Sample {
                name: name.clone(),
                help: signal.help().to_string(),
                labels: signal
                    .labels()
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
                value,
            });
        }

        debug!(signals = samples.len(), taken_at = %now, "Signals collected");
        Ok(SignalSnapshot {
            taken_at: now,
            samples,
        })
    }
}

impl fmt::Debug for SignalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalRegistry")
            .field("signals", &self.signals.keys().collect::<Vec<_>>())
            .finish()
    }
}
