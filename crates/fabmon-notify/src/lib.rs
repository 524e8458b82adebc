//! Notification delivery for authorized alerts.
//!
//! The engine core never dispatches notifications; the caller takes each
//! authorized [`fabmon_common::types::AlertRecord`] and routes it through
//! one or more [`NotificationChannel`] implementations. Shipped channels:
//! console (log-only) and webhook (JSON POST).

pub mod channels;
pub mod error;
pub mod message;


use anyhow::Result;
use async_trait::async_trait;
use fabmon_common::types::AlertRecord;

/// A delivery channel for alert notifications.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Delivers the alert. `report` is the rendered report body that
    /// accompanies the record.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails after retries (if applicable).
    async fn send(&self, record: &AlertRecord, report: &str) -> Result<()>;

    /// Returns the channel type name (e.g., `"console"`, `"webhook"`).
    fn channel_name(&self) -> &str;
}
