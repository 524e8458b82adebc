use fabmon_common::types::{AlertRecord, Severity};

/// Timestamp layout shared by all notification bodies.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y - %H:%M";

/// Channel-agnostic message body for a preventive alert.
pub fn pre_alert_message(record: &AlertRecord) -> String {
    let analysis = record
        .reasons
        .first()
        .map(String::as_str)
        .unwrap_or("Abnormal trend detected");

    format!(
        "PRE-ALERT - SMART FACTORY\n\
         \n\
         Status: Preventive (ahead of critical mode)\n\
         Date/Time: {timestamp}\n\
         Equipment: {equipment}\n\
         Sensor: Temperature / Vibration\n\
         \n\
         Current Values:\n\
         Temperature: {temp:.1} C (limit {temp_limit:.1} C, proximity {temp_pct:.1}%)\n\
         Vibration: {vib:.2} mm/s (limit {vib_limit:.2} mm/s, proximity {vib_pct:.1}%)\n\
         \n\
         Estimated Risk (AI): {risk:.1}%\n\
         \n\
         Analysis:\n\
         {analysis}\n\
         \n\
         Recommendation:\n\
         - Preventive inspection recommended\n\
         - Reinforced monitoring over the next hours\n",
        timestamp = record.timestamp.format(TIMESTAMP_FORMAT),
        equipment = record.device_name,
        temp = record.temperature,
        temp_limit = record.temp_limit,
        temp_pct = record.temp_proximity * 100.0,
        vib = record.vibration,
        vib_limit = record.vib_limit,
        vib_pct = record.vib_proximity * 100.0,
        risk = record.risk_score * 100.0,
        analysis = analysis,
    )
}

/// Channel-agnostic message body for a critical alert.
pub fn critical_message(record: &AlertRecord) -> String {
    format!(
        "CRITICAL ALERT - SMART FACTORY\n\
         \n\
         Status: CRITICAL (immediate action required)\n\
         Date/Time: {timestamp}\n\
         Equipment: {equipment}\n\
         \n\
         Critical Values:\n\
         Temperature: {temp:.1} / {temp_limit:.1} C\n\
         Vibration: {vib:.2} / {vib_limit:.2} mm/s\n\
         \n\
         Estimated Risk (AI): {risk:.1}%\n\
         Remaining Useful Life: {rul:.1} hours\n\
         \n\
         REQUIRED ACTION:\n\
         - Stop the equipment immediately\n\
         - Urgent technical inspection\n\
         - Contact the maintenance team\n",
        timestamp = record.timestamp.format(TIMESTAMP_FORMAT),
        equipment = record.device_name,
        temp = record.temperature,
        temp_limit = record.temp_limit,
        vib = record.vibration,
        vib_limit = record.vib_limit,
        risk = record.risk_score * 100.0,
        rul = record.rul_hours,
    )
}

/// Picks the body matching the record's level.
pub fn body_for(record: &AlertRecord) -> String {
    match record.level {
        Severity::Critical => critical_message(record),
        _ => pre_alert_message(record),
    }
}
