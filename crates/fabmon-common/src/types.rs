use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operational status reported by a device with each reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Running,
    Stopped,
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceStatus::Running => write!(f, "running"),
            DeviceStatus::Stopped => write!(f, "stopped"),
        }
    }
}

/// One telemetry sample from a device. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub vibration: f64,
    pub pressure: f64,
    pub power: f64,
    pub status: DeviceStatus,
    /// Failure risk stamped upstream at ingest time, 0.0 to 1.0.
    pub risk_score: f64,
}

/// Per-device operational limits from the device registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceLimits {
    pub device_id: String,
    /// Human-readable equipment name (e.g., `"CNC Machine 1"`).
    pub name: String,
    pub temp_limit: f64,
    pub vibration_limit: f64,
}

/// Alert severity level, ordered from lowest to highest.
///
/// # Examples
///
/// ```
/// use fabmon_common::types::Severity;
///
/// let sev: Severity = "pre_alert".parse().unwrap();
/// assert_eq!(sev, Severity::PreAlert);
/// assert_eq!(sev.to_string(), "pre_alert");
/// assert!(Severity::Critical > Severity::Normal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    PreAlert,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Normal => write!(f, "normal"),
            Severity::PreAlert => write!(f, "pre_alert"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Severity::Normal),
            "pre_alert" => Ok(Severity::PreAlert),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

/// Short-term trend classification over a device's reading window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Stable,
    IncreasingAbnormal,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Stable => write!(f, "stable"),
            Trend::IncreasingAbnormal => write!(f, "increasing_abnormal"),
        }
    }
}

/// Immutable record of one authorized alert.
///
/// Built exactly once per authorized emission; the sink assigns the
/// opaque storage identifier on append, so the record itself carries none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub device_id: String,
    pub device_name: String,
    pub level: Severity,
    pub timestamp: DateTime<Utc>,
    pub risk_score: f64,
    pub temperature: f64,
    pub vibration: f64,
    pub pressure: f64,
    pub temp_limit: f64,
    pub vib_limit: f64,
    /// Current temperature divided by its operational limit.
    pub temp_proximity: f64,
    /// Current vibration divided by its operational limit.
    pub vib_proximity: f64,
    pub trend: Trend,
    /// Every condition that contributed to the severity decision,
    /// threshold reasons before trend reasons.
    pub reasons: Vec<String>,
    /// Externally estimated remaining useful life.
    pub rul_hours: f64,
    /// Watts drawn beyond the efficient baseline.
    pub energy_waste: f64,
}
