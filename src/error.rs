//! Domain errors surfaced by the telemetry pipeline.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The requested lookback window is inverted (start after end).
    #[error("invalid time window: start {start} is after end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The provider key does not name a supported cloud provider.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
