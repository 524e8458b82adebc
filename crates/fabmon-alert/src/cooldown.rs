use chrono::{DateTime, Duration, Utc};
use fabmon_common::types::Severity;

/// Snapshot of the last authorized emission for one device.
#[derive(Debug, Clone, Copy)]
pub struct CooldownState {
    pub last_level: Severity,
    pub last_alert_time: DateTime<Utc>,
}

/// Per-device suppression gate.
///
/// Escalations fire immediately; same-level repeats are suppressed until
/// the cooldown period has elapsed since the last authorized emission.
/// The gate only ever gates future alerts, so a device that quiets down
/// needs no explicit reset.
#[derive(Debug)]
pub struct CooldownGate {
    cooldown: Duration,
    state: Option<CooldownState>,
}

impl CooldownGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            state: None,
        }
    }

    /// Decides whether an alert at `candidate` severity may be emitted at
    /// `now`. Authorization records the emission; refusal leaves the gate
    /// untouched.
    pub fn authorize(&mut self, candidate: Severity, now: DateTime<Utc>) -> bool {
        if candidate == Severity::Normal {
            return false;
        }

        let authorized = match self.state {
            None => true,
            // An escalation is never delayed by the cooldown.
            Some(state) if candidate > state.last_level => true,
            Some(state) => now - state.last_alert_time >= self.cooldown,
        };

        if authorized {
            self.state = Some(CooldownState {
                last_level: candidate,
                last_alert_time: now,
            });
        }
        authorized
    }

    pub fn state(&self) -> Option<CooldownState> {
        self.state
    }
}
