use fabmon_alert::config::AlertConfig;
use serde::{Deserialize, Serialize};

/// Simulation harness configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of simulated devices.
    #[serde(default = "default_device_count")]
    pub device_count: usize,

    /// Seconds between telemetry ticks.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,

    /// Ticks before the scenario cycle advances
    /// (normal -> positive -> negative).
    #[serde(default = "default_scenario_ticks")]
    pub scenario_ticks: u64,

    /// Temperature limit registered for every simulated device.
    #[serde(default = "default_temp_limit")]
    pub temp_limit: f64,

    /// Vibration limit registered for every simulated device.
    #[serde(default = "default_vibration_limit")]
    pub vibration_limit: f64,

    #[serde(default)]
    pub alert: AlertConfig,

    #[serde(default)]
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Optional webhook endpoint; console logging is always on.
    #[serde(default)]
    pub webhook_url: Option<String>,
}

fn default_device_count() -> usize {
    3
}

fn default_tick_secs() -> u64 {
    1
}

fn default_scenario_ticks() -> u64 {
    30
}

fn default_temp_limit() -> f64 {
    90.0
}

fn default_vibration_limit() -> f64 {
    5.0
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            device_count: default_device_count(),
            tick_secs: default_tick_secs(),
            scenario_ticks: default_scenario_ticks(),
            temp_limit: default_temp_limit(),
            vibration_limit: default_vibration_limit(),
            alert: AlertConfig::default(),
            notify: NotifyConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
