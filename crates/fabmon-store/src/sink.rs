use std::sync::{Mutex, RwLock};

use fabmon_common::types::AlertRecord;
use snowflake::SnowflakeIdBucket;

use crate::error::{Result, StoreError};

/// An alert record together with its sink-assigned identifier.
#[derive(Debug, Clone)]
pub struct StoredAlert {
    pub id: String,
    pub record: AlertRecord,
}

/// Append-only destination for authorized alert records.
///
/// The sink assigns each record an opaque identifier on append; records
/// are never updated or deleted through this interface.
pub trait AlertSink: Send + Sync {
    /// Persists the record and returns its new identifier.
    fn append(&self, record: &AlertRecord) -> Result<String>;

    /// The most recent alerts, newest first, optionally for one device.
    fn history(&self, device_id: Option<&str>, limit: usize) -> Result<Vec<StoredAlert>>;

    /// Looks one alert up by its sink-assigned identifier.
    fn get(&self, id: &str) -> Result<StoredAlert>;
}

/// In-memory alert sink.
///
/// IDs are snowflakes so they stay opaque to callers while remaining
/// sortable by emission order.
pub struct MemoryAlertSink {
    id_gen: Mutex<SnowflakeIdBucket>,
    alerts: RwLock<Vec<StoredAlert>>,
}

impl MemoryAlertSink {
    /// `machine_id` and `node_id` salt the snowflake generator (0-31).
    pub fn new(machine_id: i32, node_id: i32) -> Self {
        Self {
            id_gen: Mutex::new(SnowflakeIdBucket::new(machine_id, node_id)),
            alerts: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.alerts.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryAlertSink {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl AlertSink for MemoryAlertSink {
    fn append(&self, record: &AlertRecord) -> Result<String> {
        let id = self.id_gen.lock().unwrap().get_id().to_string();
        self.alerts.write().unwrap().push(StoredAlert {
            id: id.clone(),
            record: record.clone(),
        });
        Ok(id)
    }

    fn history(&self, device_id: Option<&str>, limit: usize) -> Result<Vec<StoredAlert>> {
        let alerts = self.alerts.read().unwrap();
        Ok(alerts
            .iter()
            .rev()
            .filter(|stored| device_id.map_or(true, |id| stored.record.device_id == id))
            .take(limit)
            .cloned()
            .collect())
    }

    fn get(&self, id: &str) -> Result<StoredAlert> {
        self.alerts
            .read()
            .unwrap()
            .iter()
            .find(|stored| stored.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "alert",
                id: id.to_string(),
            })
    }
}
