use crate::message;
use crate::NotificationChannel;
use anyhow::Result;
use async_trait::async_trait;
use fabmon_common::types::AlertRecord;
use tracing;

/// Log-only channel for local runs without a configured gateway.
pub struct ConsoleChannel;

#[async_trait]
impl NotificationChannel for ConsoleChannel {
    async fn send(&self, record: &AlertRecord, _report: &str) -> Result<()> {
        let body = message::body_for(record);
        tracing::info!(
            device_id = %record.device_id,
            level = %record.level,
            "Notification dispatched\n{body}"
        );
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "console"
    }
}
