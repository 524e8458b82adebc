use serde::{Deserialize, Serialize};

/// Thresholds and timing for the escalation engine.
///
/// Every field carries a serde default so a partial `[alert]` TOML
/// section deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Risk score at or above which a reading is pre-alert tier.
    #[serde(default = "default_pre_alert_threshold")]
    pub pre_alert_threshold: f64,

    /// Risk score at or above which a reading is critical tier.
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f64,

    /// Proximity ratio at or above which either sensor is critical.
    #[serde(default = "default_critical_proximity_pct")]
    pub critical_proximity_pct: f64,

    /// Temperature proximity ratio that triggers a pre-alert.
    #[serde(default = "default_temp_warn_pct")]
    pub temp_warn_pct: f64,

    /// Vibration proximity ratio that triggers a pre-alert.
    #[serde(default = "default_vib_warn_pct")]
    pub vib_warn_pct: f64,

    /// Minimum minutes between two non-escalating alerts for one device.
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: i64,

    /// Readings retained per device for trend and risk analysis.
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,
}

fn default_pre_alert_threshold() -> f64 {
    0.60
}

fn default_critical_threshold() -> f64 {
    0.80
}

fn default_critical_proximity_pct() -> f64 {
    0.95
}

fn default_temp_warn_pct() -> f64 {
    0.85
}

fn default_vib_warn_pct() -> f64 {
    0.85
}

fn default_cooldown_minutes() -> i64 {
    15
}

fn default_window_capacity() -> usize {
    20
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            pre_alert_threshold: default_pre_alert_threshold(),
            critical_threshold: default_critical_threshold(),
            critical_proximity_pct: default_critical_proximity_pct(),
            temp_warn_pct: default_temp_warn_pct(),
            vib_warn_pct: default_vib_warn_pct(),
            cooldown_minutes: default_cooldown_minutes(),
            window_capacity: default_window_capacity(),
        }
    }
}

impl AlertConfig {
    /// The cooldown period as a chrono duration.
    pub fn cooldown(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.cooldown_minutes)
    }
}
