use thiserror::Error;

#[derive(Error, Debug)]
pub enum CronwaveError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid cron expression '{expression}': {reason}")]
    InvalidSchedule { expression: String, reason: String },

    #[error("signal '{0}' is already registered")]
    DuplicateSignal(String),

    #[error("signal '{signal}' failed during collection: {reason}")]
    Collection { signal: String, reason: String },

    #[error("config I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl CronwaveError {
    /// Build an [`InvalidSchedule`](CronwaveError::InvalidSchedule) error.
    pub fn schedule(expression: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CronwaveError>;
