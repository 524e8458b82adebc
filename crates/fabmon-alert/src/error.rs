use chrono::{DateTime, Utc};

/// Errors that can occur while evaluating readings.
///
/// Nothing here is process-fatal: rejection errors
/// ([`AlertError::InvalidReading`], [`AlertError::OutOfOrderReading`])
/// leave engine state untouched, configuration errors
/// ([`AlertError::UnknownDevice`], [`AlertError::InvalidLimits`]) degrade
/// the evaluation to a no-alert outcome, and the window errors are
/// warm-up conditions the engine absorbs internally.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// The reading is structurally unusable: empty device id, non-finite
    /// sensor values, or a risk score outside 0.0..=1.0.
    #[error("Alert: invalid reading: {0}")]
    InvalidReading(String),

    /// The reading's timestamp is older than the newest reading already
    /// processed for the device.
    #[error("Alert: out-of-order reading for '{device_id}': {timestamp} precedes {newest}")]
    OutOfOrderReading {
        device_id: String,
        timestamp: DateTime<Utc>,
        newest: DateTime<Utc>,
    },

    /// No limits are registered for the device.
    #[error("Alert: unknown device '{0}'")]
    UnknownDevice(String),

    /// A registered limit is zero or negative, so proximity ratios are
    /// undefined.
    #[error("Alert: invalid limits for '{device_id}': {detail}")]
    InvalidLimits { device_id: String, detail: String },

    /// The reading window holds no readings yet.
    #[error("Alert: reading window is empty")]
    EmptyWindow,

    /// The reading window holds fewer readings than an analysis needs.
    #[error("Alert: insufficient data: needed {needed}, window holds {held}")]
    InsufficientData { needed: usize, held: usize },
}

/// Convenience `Result` alias for alert-engine operations.
pub type Result<T> = std::result::Result<T, AlertError>;
