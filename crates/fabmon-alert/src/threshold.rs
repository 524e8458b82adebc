use crate::config::AlertConfig;
use crate::error::{AlertError, Result};
use fabmon_common::types::{DeviceLimits, Reading, Severity};

/// Outcome of evaluating the latest reading against device limits.
#[derive(Debug, Clone)]
pub struct ProximityResult {
    /// Temperature divided by its operational limit.
    pub temp_ratio: f64,
    /// Vibration divided by its operational limit.
    pub vib_ratio: f64,
    pub tier: Severity,
    pub reason: Option<String>,
}

/// Classifies the latest reading into a raw severity tier.
///
/// Critical checks run strictly before pre-alert checks, so a reading can
/// never be downgraded by a later rule. Thresholds come from
/// [`AlertConfig`], never from literals at the call site.
pub fn evaluate(
    latest: &Reading,
    limits: &DeviceLimits,
    risk: f64,
    config: &AlertConfig,
) -> Result<ProximityResult> {
    if limits.temp_limit <= 0.0 {
        return Err(AlertError::InvalidLimits {
            device_id: limits.device_id.clone(),
            detail: format!("temp_limit must be positive, got {}", limits.temp_limit),
        });
    }
    if limits.vibration_limit <= 0.0 {
        return Err(AlertError::InvalidLimits {
            device_id: limits.device_id.clone(),
            detail: format!(
                "vibration_limit must be positive, got {}",
                limits.vibration_limit
            ),
        });
    }

    let temp_ratio = latest.temperature / limits.temp_limit;
    let vib_ratio = latest.vibration / limits.vibration_limit;

    let (tier, reason) = if risk >= config.critical_threshold {
        (
            Severity::Critical,
            Some(format!("critical risk: {:.1}%", risk * 100.0)),
        )
    } else if temp_ratio >= config.critical_proximity_pct
        || vib_ratio >= config.critical_proximity_pct
    {
        (
            Severity::Critical,
            Some("sensor near critical limit".to_string()),
        )
    } else if risk >= config.pre_alert_threshold {
        (
            Severity::PreAlert,
            Some(format!("elevated risk: {:.1}%", risk * 100.0)),
        )
    } else if temp_ratio >= config.temp_warn_pct || vib_ratio >= config.vib_warn_pct {
        (
            Severity::PreAlert,
            Some("approaching operational limits".to_string()),
        )
    } else {
        (Severity::Normal, None)
    };

    Ok(ProximityResult {
        temp_ratio,
        vib_ratio,
        tier,
        reason,
    })
}
