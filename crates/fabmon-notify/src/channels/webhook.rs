use crate::error::NotifyError;
use crate::NotificationChannel;
use anyhow::Result;
use async_trait::async_trait;
use fabmon_common::types::AlertRecord;
use tracing;

/// JSON webhook channel with bounded retry and exponential backoff.
pub struct WebhookChannel {
    url: String,
    client: reqwest::Client,
}

impl WebhookChannel {
    pub fn new(url: &str) -> crate::error::Result<Self> {
        if url.is_empty() {
            return Err(NotifyError::InvalidConfig(
                "webhook url is empty".to_string(),
            ));
        }
        Ok(Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
        })
    }

    pub(crate) fn payload(record: &AlertRecord, report: &str) -> String {
        serde_json::json!({
            "device_id": record.device_id,
            "device_name": record.device_name,
            "level": record.level.to_string(),
            "timestamp": record.timestamp.to_rfc3339(),
            "risk_score": record.risk_score,
            "temperature": record.temperature,
            "vibration": record.vibration,
            "trend": record.trend.to_string(),
            "reasons": record.reasons,
            "rul_hours": record.rul_hours,
            "energy_waste": record.energy_waste,
            "report": report,
        })
        .to_string()
    }
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    async fn send(&self, record: &AlertRecord, report: &str) -> Result<()> {
        let body = Self::payload(record, report);

        let mut last_err = None;
        for attempt in 0..3u32 {
            match self
                .client
                .post(&self.url)
                .header("Content-Type", "application/json")
                .body(body.clone())
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => return Ok(()),
                Ok(resp) => {
                    let status = resp.status();
                    tracing::warn!(
                        attempt = attempt + 1,
                        status = %status,
                        "Webhook returned non-success status, retrying"
                    );
                    last_err = Some(anyhow::anyhow!("HTTP {status}"));
                }
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        error = %e,
                        "Webhook send failed, retrying"
                    );
                    last_err = Some(e.into());
                }
            }
            if attempt < 2 {
                tokio::time::sleep(std::time::Duration::from_millis(100 * 2u64.pow(attempt)))
                    .await;
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("webhook send failed")))
    }

    fn channel_name(&self) -> &str {
        "webhook"
    }
}
