//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

use cronwave_core::ConfigOverrides;

/// Synthetic signal exporter.
#[derive(Parser, Debug)]
#[command(name = "cronwave", version, about)]
pub struct Cli {
    /// Path to an optional TOML config file.
    #[arg(long, env = "CRONWAVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to serve on, e.g. `0.0.0.0:8080` or `:8080`.
    #[arg(long)]
    pub listen_address: Option<String>,

    /// Full cycle length of the `sin` signal, e.g. `5m`, `1.5m`, `30s`, `250ms`.
    #[arg(long)]
    pub oscillation_period: Option<String>,

    /// Five-field cron expression driving `time_interval`.
    #[arg(long)]
    pub cron_expression: Option<String>,
}

impl Cli {
    /// The flag layer; highest precedence.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listen_address: self.listen_address.clone(),
            oscillation_period: self.oscillation_period.clone(),
            cron_expression: self.cron_expression.clone(),
        }
    }
}
