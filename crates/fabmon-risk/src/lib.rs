//! Failure-risk estimation over a device's reading window.
//!
//! The alert engine treats risk scoring as an opaque collaborator: any
//! [`RiskEstimator`] can sit behind the trait, from a learned model to the
//! rule-based fallback shipped here.

use fabmon_common::types::Reading;

/// Vibration level treated as end-of-life when projecting remaining
/// useful life.
const FAILURE_VIBRATION: f64 = 10.0;

/// Watts an efficiently running machine is expected to draw.
const EFFICIENT_POWER_BASELINE: f64 = 600.0;

/// RUL reported when vibration shows no meaningful upward slope.
const STABLE_RUL_HOURS: f64 = 999.0;

/// Hours of wall time one reading interval is worth when projecting RUL.
const HOURS_PER_STEP: f64 = 0.1;

/// Output of one risk estimation over a reading window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskEstimate {
    /// Failure probability, 0.0 to 1.0.
    pub risk_score: f64,
    /// Projected hours until the vibration failure level is reached.
    pub rul_hours: f64,
    /// Watts drawn beyond the efficient baseline.
    pub energy_waste_watts: f64,
}

impl RiskEstimate {
    pub fn zero() -> Self {
        Self {
            risk_score: 0.0,
            rul_hours: 0.0,
            energy_waste_watts: 0.0,
        }
    }
}

/// Produces a risk estimate from a device's recent readings,
/// oldest first.
pub trait RiskEstimator: Send + Sync {
    fn estimate(&self, window: &[Reading]) -> RiskEstimate;
}

/// Rule-based fallback estimator used when no trained model is available.
///
/// Risk reacts to the latest temperature and vibration, remaining useful
/// life projects the vibration slope of the last five readings onto the
/// failure level, and energy waste is the draw beyond the efficient
/// baseline.
#[derive(Debug, Default)]
pub struct HeuristicRiskEstimator;

impl RiskEstimator for HeuristicRiskEstimator {
    fn estimate(&self, window: &[Reading]) -> RiskEstimate {
        let Some(latest) = window.last() else {
            return RiskEstimate::zero();
        };

        let mut risk: f64 = 0.0;
        if latest.temperature > 90.0 {
            risk += 0.5;
        }
        if latest.vibration > 5.0 {
            risk += 0.4;
        }

        RiskEstimate {
            risk_score: risk.min(1.0),
            rul_hours: project_rul(window),
            energy_waste_watts: (latest.power - EFFICIENT_POWER_BASELINE).max(0.0),
        }
    }
}

/// Least-squares vibration slope over the last five readings, projected to
/// the failure level. Too little history or a flat slope reads as stable.
fn project_rul(window: &[Reading]) -> f64 {
    if window.len() < 4 {
        return STABLE_RUL_HOURS;
    }
    let start = window.len().saturating_sub(5);
    let recent = &window[start..];

    let n = recent.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (i, reading) in recent.iter().enumerate() {
        let x = i as f64;
        let y = reading.vibration;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom.abs() < f64::EPSILON {
        return STABLE_RUL_HOURS;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    if slope <= 0.01 {
        return STABLE_RUL_HOURS;
    }

    let current = recent[recent.len() - 1].vibration;
    let remaining_steps = (FAILURE_VIBRATION - current) / slope;
    (remaining_steps * HOURS_PER_STEP).max(0.0)
}
