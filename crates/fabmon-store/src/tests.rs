use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use fabmon_alert::DeviceRegistry;
use fabmon_common::types::{AlertRecord, DeviceLimits, Severity, Trend};

use crate::error::StoreError;
use crate::{AlertSink, InMemoryDeviceRegistry, MemoryAlertSink};

fn make_limits(device: &str) -> DeviceLimits {
    DeviceLimits {
        device_id: device.to_string(),
        name: format!("{device} press"),
        temp_limit: 100.0,
        vibration_limit: 10.0,
    }
}

fn make_record(device: &str, level: Severity) -> AlertRecord {
    AlertRecord {
        device_id: device.to_string(),
        device_name: format!("{device} press"),
        level,
        timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        risk_score: 0.7,
        temperature: 88.0,
        vibration: 4.0,
        pressure: 10.0,
        temp_limit: 100.0,
        vib_limit: 10.0,
        temp_proximity: 0.88,
        vib_proximity: 0.4,
        trend: Trend::Stable,
        reasons: vec!["approaching operational limits".to_string()],
        rul_hours: 999.0,
        energy_waste: 0.0,
    }
}

#[test]
fn registry_returns_registered_limits() {
    let registry = InMemoryDeviceRegistry::new();
    registry.register(make_limits("DEV-100"));
    assert_eq!(registry.len(), 1);

    let limits = registry.limits("DEV-100").unwrap();
    assert_eq!(limits.name, "DEV-100 press");
    assert_eq!(limits.temp_limit, 100.0);
}

#[test]
fn registry_fails_on_unknown_device() {
    let registry = InMemoryDeviceRegistry::new();
    assert!(registry.limits("DEV-404").is_err());
}

#[test]
fn registry_replaces_existing_limits() {
    let registry = InMemoryDeviceRegistry::new();
    registry.register(make_limits("DEV-100"));
    let mut updated = make_limits("DEV-100");
    updated.temp_limit = 120.0;
    registry.register(updated);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.limits("DEV-100").unwrap().temp_limit, 120.0);
}

#[test]
fn sink_assigns_unique_ids() {
    let sink = MemoryAlertSink::default();
    let mut ids = HashSet::new();
    for _ in 0..100 {
        let id = sink.append(&make_record("DEV-100", Severity::PreAlert)).unwrap();
        assert!(!id.is_empty());
        assert!(ids.insert(id), "Duplicate ID assigned");
    }
    assert_eq!(sink.len(), 100);
}

#[test]
fn sink_history_is_newest_first_and_filterable() {
    let sink = MemoryAlertSink::default();
    sink.append(&make_record("DEV-100", Severity::PreAlert)).unwrap();
    sink.append(&make_record("DEV-101", Severity::Critical)).unwrap();
    sink.append(&make_record("DEV-100", Severity::Critical)).unwrap();

    let all = sink.history(None, 10).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].record.device_id, "DEV-100");
    assert_eq!(all[0].record.level, Severity::Critical);

    let one_device = sink.history(Some("DEV-100"), 10).unwrap();
    assert_eq!(one_device.len(), 2);
    assert!(one_device
        .iter()
        .all(|stored| stored.record.device_id == "DEV-100"));

    let limited = sink.history(None, 2).unwrap();
    assert_eq!(limited.len(), 2);
}

#[test]
fn sink_get_finds_by_id() {
    let sink = MemoryAlertSink::default();
    let id = sink.append(&make_record("DEV-100", Severity::Critical)).unwrap();

    let stored = sink.get(&id).unwrap();
    assert_eq!(stored.record.level, Severity::Critical);

    assert!(matches!(
        sink.get("no-such-id"),
        Err(StoreError::NotFound { entity: "alert", .. })
    ));
}
