use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::duration::{format_duration, parse_duration};
use crate::error::{CronwaveError, Result};

/// Default listen address (all interfaces, port 8080).
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:8080";

/// Default oscillation period (5 minutes).
pub const DEFAULT_OSCILLATION_PERIOD: Duration = Duration::from_secs(300);

/// Default recurrence: six-minute windows (minutes 0-5, 10-15, ...) every ten minutes.
pub const DEFAULT_CRON_EXPRESSION: &str = "0-5,10-15,20-25,30-35,40-45,50-55 * * * *";

pub const ENV_LISTEN_ADDRESS: &str = "CRONWAVE_LISTEN_ADDRESS";
pub const ENV_OSCILLATION_PERIOD: &str = "CRONWAVE_OSCILLATION_PERIOD";
pub const ENV_CRON_EXPRESSION: &str = "CRONWAVE_CRON_EXPRESSION";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

// ── Override layers ───────────────────────────────────────────

/// One configuration layer: every field is optional and only set fields
/// replace the value resolved so far.
///
/// Layers come from a TOML file, the environment, and CLI flags. See
/// [`Config::resolve`] for the precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub listen_address: Option<String>,
    pub oscillation_period: Option<String>,
    pub cron_expression: Option<String>,
}

impl ConfigOverrides {
    /// Read the `CRONWAVE_*` environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self::from_lookup(env_opt)
    }

    /// Build a layer from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            listen_address: get(ENV_LISTEN_ADDRESS),
            oscillation_period: get(ENV_OSCILLATION_PERIOD),
            cron_expression: get(ENV_CRON_EXPRESSION),
        }
    }

    /// Parse a layer from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a layer from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.listen_address.is_none()
            && self.oscillation_period.is_none()
            && self.cron_expression.is_none()
    }

    fn apply_to(&self, raw: &mut RawConfig) {
        if let Some(v) = &self.listen_address {
            raw.listen_address = v.clone();
        }
        if let Some(v) = &self.oscillation_period {
            raw.oscillation_period = v.clone();
        }
        if let Some(v) = &self.cron_expression {
            raw.cron_expression = v.clone();
        }
    }
}

/// Unvalidated values accumulated while applying layers.
struct RawConfig {
    listen_address: String,
    oscillation_period: String,
    cron_expression: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            oscillation_period: format_duration(DEFAULT_OSCILLATION_PERIOD),
            cron_expression: DEFAULT_CRON_EXPRESSION.to_string(),
        }
    }
}

// ── Resolved config ───────────────────────────────────────────

/// Validated process configuration. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_address: SocketAddr,
    /// Strictly positive.
    pub oscillation_period: Duration,
    /// Raw cron expression; parsed into a schedule by the signals crate.
    pub cron_expression: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            oscillation_period: DEFAULT_OSCILLATION_PERIOD,
            cron_expression: DEFAULT_CRON_EXPRESSION.to_string(),
        }
    }
}

impl Config {
    /// Resolve configuration from layered overrides, then validate.
    ///
    /// Starts from the built-in defaults and applies `layers` in order, so a
    /// later layer replaces any field an earlier one set. The server passes
    /// `[file, env, cli]`.
    pub fn resolve(layers: &[ConfigOverrides]) -> Result<Self> {
        let mut raw = RawConfig::default();
        for layer in layers {
            layer.apply_to(&mut raw);
        }
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self> {
        let listen_address = parse_listen_address(&raw.listen_address)?;

        let oscillation_period = parse_duration(&raw.oscillation_period).ok_or_else(|| {
            CronwaveError::InvalidConfiguration(format!(
                "invalid oscillation period '{}', expected e.g. '5m', '30s', '250ms'",
                raw.oscillation_period
            ))
        })?;
        if oscillation_period.is_zero() {
            return Err(CronwaveError::InvalidConfiguration(
                "oscillation period must be positive".to_string(),
            ));
        }

        let cron_expression = raw.cron_expression.trim().to_string();
        if cron_expression.is_empty() {
            return Err(CronwaveError::InvalidConfiguration(
                "cron expression must not be empty".to_string(),
            ));
        }

        Ok(Self {
            listen_address,
            oscillation_period,
            cron_expression,
        })
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config resolved:");
        tracing::info!("  listen:      {}", self.listen_address);
        tracing::info!("  period:      {}", format_duration(self.oscillation_period));
        tracing::info!("  schedule:    {}", self.cron_expression);
    }
}

/// Parse `host:port`. A bare `:port` binds all interfaces.
fn parse_listen_address(s: &str) -> Result<SocketAddr> {
    let s = s.trim();
    let candidate = match s.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => s.to_string(),
    };
    candidate.parse().map_err(|_| {
        CronwaveError::InvalidConfiguration(format!(
            "invalid listen address '{s}', expected 'ip:port' or ':port'"
        ))
    })
}
