use std::collections::HashMap;
use std::sync::RwLock;

use fabmon_alert::error::AlertError;
use fabmon_alert::DeviceRegistry;
use fabmon_common::types::DeviceLimits;

/// Process-local device registry backed by a map.
///
/// Registration happens at startup or when a device first appears;
/// lookups clone the limits under a read lock so the engine call stays
/// non-blocking.
#[derive(Debug, Default)]
pub struct InMemoryDeviceRegistry {
    devices: RwLock<HashMap<String, DeviceLimits>>,
}

impl InMemoryDeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a device's limits.
    pub fn register(&self, limits: DeviceLimits) {
        self.devices
            .write()
            .unwrap()
            .insert(limits.device_id.clone(), limits);
    }

    pub fn len(&self) -> usize {
        self.devices.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DeviceRegistry for InMemoryDeviceRegistry {
    fn limits(&self, device_id: &str) -> fabmon_alert::error::Result<DeviceLimits> {
        self.devices
            .read()
            .unwrap()
            .get(device_id)
            .cloned()
            .ok_or_else(|| AlertError::UnknownDevice(device_id.to_string()))
    }
}
