use std::collections::HashMap;
use std::sync::Arc;

use fabmon_common::types::{AlertRecord, Reading, Severity, Trend};
use fabmon_risk::RiskEstimator;
use tracing;

use crate::assembler;
use crate::config::AlertConfig;
use crate::cooldown::CooldownGate;
use crate::error::{AlertError, Result};
use crate::threshold;
use crate::trend;
use crate::window::ReadingWindow;
use crate::DeviceRegistry;

/// Reason attached when the trend detector contributes to the severity.
const TREND_REASON: &str = "abnormal trend detected (sustained increase)";

/// Outcome of one evaluation call.
///
/// A suppressed alert is indistinguishable from "nothing happened": both
/// come back as normal with no record.
#[derive(Debug)]
pub struct Evaluation {
    pub level: Severity,
    pub record: Option<AlertRecord>,
}

impl Evaluation {
    fn normal() -> Self {
        Self {
            level: Severity::Normal,
            record: None,
        }
    }
}

struct DeviceState {
    window: ReadingWindow,
    gate: CooldownGate,
}

/// Per-device escalation engine.
///
/// Owns one reading window and one cooldown gate per device, created
/// lazily on the first reading and kept for the process lifetime. The
/// engine is a synchronous state machine: collaborators are in-process
/// traits and no call suspends, so each evaluation is atomic. Callers
/// must serialize evaluations for the same device; evaluations for
/// different devices share no state beyond this map.
pub struct EscalationEngine {
    config: AlertConfig,
    registry: Arc<dyn DeviceRegistry>,
    estimator: Arc<dyn RiskEstimator>,
    devices: HashMap<String, DeviceState>,
}

impl EscalationEngine {
    pub fn new(
        config: AlertConfig,
        registry: Arc<dyn DeviceRegistry>,
        estimator: Arc<dyn RiskEstimator>,
    ) -> Self {
        Self {
            config,
            registry,
            estimator,
            devices: HashMap::new(),
        }
    }

    /// Evaluates one reading and decides whether an alert surfaces.
    ///
    /// Readings must arrive in timestamp order per device; a reading
    /// older than the newest one already processed is rejected with
    /// [`AlertError::OutOfOrderReading`] before any state changes.
    /// Missing or invalid device limits degrade to a normal, no-alert
    /// outcome and are logged.
    ///
    /// # Errors
    ///
    /// [`AlertError::InvalidReading`] for malformed input and
    /// [`AlertError::OutOfOrderReading`] for sequencing violations;
    /// neither mutates engine state.
    pub fn evaluate(&mut self, reading: &Reading) -> Result<Evaluation> {
        validate(reading)?;

        let capacity = self.config.window_capacity;
        let cooldown = self.config.cooldown();
        let state = self
            .devices
            .entry(reading.device_id.clone())
            .or_insert_with(|| DeviceState {
                window: ReadingWindow::new(capacity),
                gate: CooldownGate::new(cooldown),
            });

        if let Ok(newest) = state.window.latest() {
            if reading.timestamp < newest.timestamp {
                return Err(AlertError::OutOfOrderReading {
                    device_id: reading.device_id.clone(),
                    timestamp: reading.timestamp,
                    newest: newest.timestamp,
                });
            }
        }

        state.window.push(reading.clone());

        let limits = match self.registry.limits(&reading.device_id) {
            Ok(limits) => limits,
            Err(e) => {
                tracing::warn!(
                    device_id = %reading.device_id,
                    error = %e,
                    "Device limits unavailable, skipping evaluation"
                );
                return Ok(Evaluation::normal());
            }
        };

        let estimate = self.estimator.estimate(state.window.as_contiguous_slice());

        let proximity =
            match threshold::evaluate(reading, &limits, estimate.risk_score, &self.config) {
                Ok(proximity) => proximity,
                Err(e) => {
                    tracing::warn!(
                        device_id = %reading.device_id,
                        error = %e,
                        "Invalid device limits, skipping evaluation"
                    );
                    return Ok(Evaluation::normal());
                }
            };

        let trend = trend::detect(&mut state.window);

        let mut level = proximity.tier;
        let mut reasons = Vec::new();
        if let Some(reason) = proximity.reason.clone() {
            reasons.push(reason);
        }
        if trend == Trend::IncreasingAbnormal {
            level = level.max(Severity::PreAlert);
            reasons.push(TREND_REASON.to_string());
        }

        if level == Severity::Normal {
            return Ok(Evaluation::normal());
        }

        if !state.gate.authorize(level, reading.timestamp) {
            tracing::debug!(
                device_id = %reading.device_id,
                level = %level,
                "Alert suppressed (cooldown active)"
            );
            return Ok(Evaluation::normal());
        }

        let record = assembler::assemble(
            reading,
            &limits,
            level,
            &proximity,
            trend,
            reasons,
            &estimate,
        );
        Ok(Evaluation {
            level,
            record: Some(record),
        })
    }

    /// Number of devices with live evaluation state.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

fn validate(reading: &Reading) -> Result<()> {
    if reading.device_id.is_empty() {
        return Err(AlertError::InvalidReading("device_id is empty".to_string()));
    }
    for (field, value) in [
        ("temperature", reading.temperature),
        ("vibration", reading.vibration),
        ("pressure", reading.pressure),
        ("power", reading.power),
    ] {
        if !value.is_finite() {
            return Err(AlertError::InvalidReading(format!("{field} is not finite")));
        }
    }
    if !reading.risk_score.is_finite() || !(0.0..=1.0).contains(&reading.risk_score) {
        return Err(AlertError::InvalidReading(format!(
            "risk_score {} outside 0.0..=1.0",
            reading.risk_score
        )));
    }
    Ok(())
}
