use crate::window::ReadingWindow;
use fabmon_common::types::{Reading, Trend};

/// Number of readings the trend classifier looks at.
pub const TREND_SPAN: usize = 5;

/// A vibration step larger than this counts as rising.
const VIB_RISING_DELTA: f64 = 0.1;

/// A temperature step larger than this counts as rising.
const TEMP_RISING_DELTA: f64 = 1.0;

/// Rising steps (out of [`TREND_SPAN`] - 1) needed to call the trend
/// abnormal.
const MIN_RISING_STEPS: usize = 3;

/// Classifies the short-term trend of a device's window.
///
/// Best-effort: with fewer than [`TREND_SPAN`] readings the trend reads
/// as stable. Vibration is checked before temperature.
pub fn detect(window: &mut ReadingWindow) -> Trend {
    let recent = match window.tail(TREND_SPAN) {
        Ok(recent) => recent,
        // Warm-up: not enough history to call a trend.
        Err(_) => return Trend::Stable,
    };

    if rising_steps(recent, |r| r.vibration, VIB_RISING_DELTA) >= MIN_RISING_STEPS {
        return Trend::IncreasingAbnormal;
    }
    if rising_steps(recent, |r| r.temperature, TEMP_RISING_DELTA) >= MIN_RISING_STEPS {
        return Trend::IncreasingAbnormal;
    }
    Trend::Stable
}

fn rising_steps(readings: &[Reading], value: impl Fn(&Reading) -> f64, delta: f64) -> usize {
    readings
        .windows(2)
        .filter(|pair| value(&pair[1]) - value(&pair[0]) > delta)
        .count()
}
