use fabmon_common::types::{AlertRecord, DeviceLimits, Reading, Severity, Trend};
use fabmon_risk::RiskEstimate;

use crate::threshold::ProximityResult;

/// Builds the immutable alert record for an authorized emission.
///
/// Pure and deterministic; the engine only calls this after the cooldown
/// gate has authorized the emission, so construction and emission stay
/// atomic within one evaluation.
pub fn assemble(
    reading: &Reading,
    limits: &DeviceLimits,
    level: Severity,
    proximity: &ProximityResult,
    trend: Trend,
    reasons: Vec<String>,
    estimate: &RiskEstimate,
) -> AlertRecord {
    AlertRecord {
        device_id: reading.device_id.clone(),
        device_name: limits.name.clone(),
        level,
        timestamp: reading.timestamp,
        risk_score: estimate.risk_score,
        temperature: reading.temperature,
        vibration: reading.vibration,
        pressure: reading.pressure,
        temp_limit: limits.temp_limit,
        vib_limit: limits.vibration_limit,
        temp_proximity: proximity.temp_ratio,
        vib_proximity: proximity.vib_ratio,
        trend,
        reasons,
        rul_hours: estimate.rul_hours,
        energy_waste: estimate.energy_waste_watts,
    }
}

struct PrimarySensor {
    name: &'static str,
    value: f64,
    limit: f64,
    unit: &'static str,
}

/// The sensor the report narrates, picked by proximity ratio.
/// Ties favor temperature.
fn primary_sensor(record: &AlertRecord) -> PrimarySensor {
    if record.temp_proximity >= record.vib_proximity {
        PrimarySensor {
            name: "Temperature",
            value: record.temperature,
            limit: record.temp_limit,
            unit: "C",
        }
    } else {
        PrimarySensor {
            name: "Vibration",
            value: record.vibration,
            limit: record.vib_limit,
            unit: "mm/s",
        }
    }
}

/// Renders the plain-text report body for an alert record.
pub fn render_report(record: &AlertRecord) -> String {
    let critical = record.level == Severity::Critical;
    let (header, status) = if critical {
        (
            "CRITICAL ALERT - SMART FACTORY",
            "CRITICAL (immediate action required)",
        )
    } else {
        (
            "PRE-ALERT - SMART FACTORY",
            "Preventive (ahead of critical mode)",
        )
    };

    let sensor = primary_sensor(record);
    let timestamp = record.timestamp.format("%d/%m/%Y - %H:%M");

    let analysis = if record.trend == Trend::IncreasingAbnormal {
        "Continuous upward trend above the historical pattern."
    } else if let Some(first) = record.reasons.first() {
        first.as_str()
    } else {
        "Variation detected in operational parameters."
    };

    let recommendation = if critical {
        "Immediate stop and corrective maintenance."
    } else {
        "Preventive inspection and reinforced monitoring over the next hours."
    };

    format!(
        "{header}\n\
         \n\
         Status: {status}\n\
         Date/Time: {timestamp}\n\
         Equipment: {equipment}\n\
         Sensor: {sensor_name}\n\
         Current Value: {value:.1} {unit}\n\
         Operational Limit: {limit:.1} {unit}\n\
         Estimated Risk (AI): {risk:.0}%\n\
         \n\
         Analysis:\n\
         {analysis}\n\
         \n\
         Recommendation:\n\
         {recommendation}\n",
        header = header,
        status = status,
        timestamp = timestamp,
        equipment = record.device_name,
        sensor_name = sensor.name,
        value = sensor.value,
        unit = sensor.unit,
        limit = sensor.limit,
        risk = record.risk_score * 100.0,
        analysis = analysis,
        recommendation = recommendation,
    )
}
