use chrono::Utc;
use fabmon_common::types::{DeviceStatus, Reading};
use rand::Rng;

/// Operating scenario driven by the simulated weekly cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Normal,
    Positive,
    Negative,
}

impl Scenario {
    pub fn next(self) -> Self {
        match self {
            Scenario::Normal => Scenario::Positive,
            Scenario::Positive => Scenario::Negative,
            Scenario::Negative => Scenario::Normal,
        }
    }
}

/// Generates telemetry packets resembling a real IoT payload.
///
/// Each scenario shifts the base temperature and vibration; spikes and
/// breakdowns are random, with both far more likely in the negative
/// scenario. A broken-down device reports `stopped` for ten ticks with
/// collapsed sensor values.
pub struct SensorSimulator {
    device_id: String,
    status: DeviceStatus,
    scenario: Scenario,
    temp_base: f64,
    vib_base: f64,
    noise_level: f64,
    pressure_base: f64,
    stopped_ticks_left: u32,
}

impl SensorSimulator {
    pub fn new(device_id: &str) -> Self {
        let mut simulator = Self {
            device_id: device_id.to_string(),
            status: DeviceStatus::Running,
            scenario: Scenario::Normal,
            temp_base: 60.0,
            vib_base: 2.0,
            noise_level: 1.0,
            pressure_base: 10.0,
            stopped_ticks_left: 0,
        };
        simulator.set_scenario(Scenario::Normal);
        simulator
    }

    pub fn set_scenario(&mut self, scenario: Scenario) {
        self.scenario = scenario;
        match scenario {
            Scenario::Positive => {
                self.temp_base = 70.0;
                self.vib_base = 1.0;
                self.noise_level = 0.5;
            }
            Scenario::Negative => {
                self.temp_base = 100.0;
                self.vib_base = 6.0;
                self.noise_level = 2.0;
            }
            Scenario::Normal => {
                self.temp_base = 60.0;
                self.vib_base = 2.0;
                self.noise_level = 1.0;
            }
        }
    }

    /// Produces the next telemetry reading, advancing breakdown state.
    pub fn next_reading(&mut self) -> Reading {
        let mut rng = rand::thread_rng();

        let spike_threshold = if self.scenario == Scenario::Negative {
            0.70
        } else {
            0.95
        };
        let (mut temp, mut vib) = if rng.gen::<f64>() > spike_threshold {
            (
                self.temp_base + rng.gen_range(10.0..20.0) * self.noise_level,
                self.vib_base + rng.gen_range(2.0..5.0) * self.noise_level,
            )
        } else {
            (
                self.temp_base + rng.gen_range(-2.0..2.0) * self.noise_level,
                self.vib_base + rng.gen_range(-0.5..0.5) * self.noise_level,
            )
        };
        let mut pressure = self.pressure_base + rng.gen_range(-1.0..1.0);

        let breakdown_threshold = if self.scenario == Scenario::Negative {
            0.95
        } else {
            0.99
        };
        if self.status == DeviceStatus::Running && rng.gen::<f64>() > breakdown_threshold {
            self.status = DeviceStatus::Stopped;
            self.stopped_ticks_left = 10;
        }

        if self.status == DeviceStatus::Stopped {
            self.stopped_ticks_left = self.stopped_ticks_left.saturating_sub(1);
            if self.stopped_ticks_left == 0 {
                self.status = DeviceStatus::Running;
            }
            temp = (temp - 20.0).max(25.0);
            vib = 0.0;
            pressure = 0.0;
        }

        // Draw correlates with vibration and temperature; the positive
        // scenario runs efficient, the negative one wasteful.
        let mut power = 500.0 + vib * 20.0 + temp * 0.5;
        match self.scenario {
            Scenario::Positive => power *= 0.9,
            Scenario::Negative => power *= 1.2,
            Scenario::Normal => {}
        }

        Reading {
            device_id: self.device_id.clone(),
            timestamp: Utc::now(),
            temperature: round2(temp),
            vibration: round2(vib),
            pressure: round2(pressure),
            power: round2(power),
            status: self.status,
            risk_score: 0.0,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
