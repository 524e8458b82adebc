use std::sync::Arc;

use anyhow::Result;
use fabmon_alert::engine::EscalationEngine;
use fabmon_common::types::{DeviceLimits, DeviceStatus, Reading};
use fabmon_notify::channels::console::ConsoleChannel;
use fabmon_notify::channels::webhook::WebhookChannel;
use fabmon_notify::NotificationChannel;
use fabmon_risk::{HeuristicRiskEstimator, RiskEstimator};
use fabmon_store::{AlertSink, InMemoryDeviceRegistry, MemoryAlertSink};
use tokio::signal;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing_subscriber::EnvFilter;

mod config;
mod simulator;

use config::SimConfig;
use simulator::{Scenario, SensorSimulator};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fabmon=info".parse()?))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/sim.toml".to_string());
    let config = match SimConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %config_path, error = %e, "Config not loadable, using defaults");
            SimConfig::default()
        }
    };

    tracing::info!(
        devices = config.device_count,
        pre_alert_threshold = config.alert.pre_alert_threshold,
        critical_threshold = config.alert.critical_threshold,
        cooldown_minutes = config.alert.cooldown_minutes,
        "fabmon simulation starting"
    );

    let registry = Arc::new(InMemoryDeviceRegistry::new());
    let estimator: Arc<dyn RiskEstimator> = Arc::new(HeuristicRiskEstimator);
    let sink: Arc<dyn AlertSink> = Arc::new(MemoryAlertSink::default());

    let mut channels: Vec<Arc<dyn NotificationChannel>> = vec![Arc::new(ConsoleChannel)];
    if let Some(url) = &config.notify.webhook_url {
        match WebhookChannel::new(url) {
            Ok(channel) => channels.push(Arc::new(channel)),
            Err(e) => tracing::warn!(error = %e, "Webhook channel disabled"),
        }
    }
    let channels = Arc::new(channels);

    // One worker per device: strict arrival-order processing for each
    // device, no shared evaluation state across devices.
    let mut simulators = Vec::new();
    let mut senders = Vec::new();
    let mut workers = Vec::new();
    for i in 0..config.device_count {
        let device_id = format!("DEV-{}", 100 + i);
        registry.register(DeviceLimits {
            device_id: device_id.clone(),
            name: format!("CNC Machine {}", i + 1),
            temp_limit: config.temp_limit,
            vibration_limit: config.vibration_limit,
        });
        simulators.push(SensorSimulator::new(&device_id));

        let (tx, rx) = mpsc::channel::<Reading>(64);
        senders.push(tx);
        workers.push(tokio::spawn(device_worker(
            rx,
            EscalationEngine::new(config.alert.clone(), registry.clone(), estimator.clone()),
            estimator.clone(),
            sink.clone(),
            channels.clone(),
        )));
        tracing::info!(device_id = %device_id, "Device registered");
    }

    let generator = tokio::spawn(generate(config, simulators, senders));

    signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    generator.abort();
    for worker in workers {
        worker.abort();
    }
    Ok(())
}

/// Emits one reading per device per tick, cycling scenarios on a fixed
/// cadence the way a compressed week of operation would.
async fn generate(
    config: SimConfig,
    mut simulators: Vec<SensorSimulator>,
    senders: Vec<mpsc::Sender<Reading>>,
) {
    let mut tick = interval(Duration::from_secs(config.tick_secs.max(1)));
    let mut scenario = Scenario::Normal;
    let mut ticks_in_scenario = 0u64;

    loop {
        tick.tick().await;
        ticks_in_scenario += 1;
        if ticks_in_scenario >= config.scenario_ticks.max(1) {
            ticks_in_scenario = 0;
            scenario = scenario.next();
            tracing::info!(scenario = ?scenario, "Scenario change");
            for simulator in &mut simulators {
                simulator.set_scenario(scenario);
            }
        }

        for (simulator, sender) in simulators.iter_mut().zip(&senders) {
            let reading = simulator.next_reading();
            if sender.send(reading).await.is_err() {
                return;
            }
        }
    }
}

/// Owns one device's escalation engine and drains its reading queue in
/// arrival order.
async fn device_worker(
    mut rx: mpsc::Receiver<Reading>,
    mut engine: EscalationEngine,
    estimator: Arc<dyn RiskEstimator>,
    sink: Arc<dyn AlertSink>,
    channels: Arc<Vec<Arc<dyn NotificationChannel>>>,
) {
    while let Some(mut reading) = rx.recv().await {
        // Stamp the externally supplied risk score the way the ingest
        // stage does, from the reading alone.
        reading.risk_score = estimator
            .estimate(std::slice::from_ref(&reading))
            .risk_score;

        if reading.status == DeviceStatus::Stopped {
            tracing::info!(
                device_id = %reading.device_id,
                temperature = reading.temperature,
                "Device stop detected"
            );
        }
        if reading.risk_score > 0.7 {
            tracing::warn!(
                device_id = %reading.device_id,
                risk_pct = reading.risk_score * 100.0,
                "High failure risk"
            );
        }

        let evaluation = match engine.evaluate(&reading) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                tracing::warn!(device_id = %reading.device_id, error = %e, "Reading rejected");
                continue;
            }
        };

        let Some(record) = evaluation.record else {
            continue;
        };

        let report = fabmon_alert::assembler::render_report(&record);
        match sink.append(&record) {
            Ok(id) => {
                tracing::info!(
                    alert_id = %id,
                    device_id = %record.device_id,
                    level = %record.level,
                    "Alert persisted"
                );
            }
            Err(e) => {
                tracing::error!(
                    device_id = %record.device_id,
                    error = %e,
                    "Failed to persist alert"
                );
            }
        }

        for channel in channels.iter() {
            if let Err(e) = channel.send(&record, &report).await {
                tracing::error!(
                    channel = channel.channel_name(),
                    error = %e,
                    "Failed to send notification"
                );
            }
        }
    }
}
