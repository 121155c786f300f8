use std::sync::Arc;

use chrono::{DateTime, Utc};

use cronwave_signals::SignalRegistry;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub registry: Arc<SignalRegistry>,
    pub started_at: DateTime<Utc>,
}
