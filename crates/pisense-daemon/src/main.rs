//! Pisense Daemon
//!
//! Hosts the sensor plugins: loads the TOML configuration, configures and
//! initializes every enabled plugin, then drives each one through its
//! read→compute→dispatch cycle on a fixed cadence until shutdown.

mod bus;
mod config;
mod sink;

use anyhow::{Context, Result};
use pisense_plugins::compute::HumidityMetrics;
use pisense_plugins::{plugins, DispatchSink, SensorPlugin};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bus::LinuxI2cBus;
use config::{Config, SinkFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.toml".to_string());

    let config = Config::load(&config_path).context("Failed to load configuration")?;
    info!("Loaded configuration from: {}", config_path);

    let sink: Arc<dyn DispatchSink> = match config.sink.format {
        SinkFormat::Log => Arc::new(sink::LogSink),
        SinkFormat::Json => Arc::new(sink::JsonLineSink),
    };

    let mut plugins = build_plugins(&config);
    if plugins.is_empty() {
        warn!("No plugins enabled, nothing to poll");
    }

    // Configure once, init once. An init failure means no usable device
    // path exists, so startup aborts; poll failures later stay local.
    for (plugin, options) in &mut plugins {
        plugin.configure(options);
        plugin
            .init()
            .with_context(|| format!("{} plugin failed to initialize", plugin.name()))?;
    }

    // One poll loop per plugin, all on the same cadence.
    let interval = Duration::from_secs(config.interval.max(1));
    for (plugin, _) in plugins {
        let sink = sink.clone();
        tokio::spawn(poll_loop(plugin, sink, interval));
    }

    // Setup Unix signal handlers
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
    }

    Ok(())
}

/// Instantiates every enabled plugin with its configured options.
fn build_plugins(config: &Config) -> Vec<(Box<dyn SensorPlugin>, Vec<(String, String)>)> {
    let mut built: Vec<(Box<dyn SensorPlugin>, Vec<(String, String)>)> = Vec::new();

    if config.plugins.cpu_temp.enabled {
        built.push((
            Box::new(plugins::cpu_temp()),
            config.plugins.cpu_temp.option_pairs(),
        ));
    }
    if config.plugins.sht21.enabled {
        let metrics = humidity_metrics(config.plugins.sht21.derived);
        built.push((
            Box::new(plugins::sht21_with(metrics)),
            config.plugins.sht21.option_pairs(),
        ));
    }
    if config.plugins.shtc3.enabled {
        let metrics = humidity_metrics(config.plugins.shtc3.derived);
        built.push((
            Box::new(plugins::shtc3_with(metrics)),
            config.plugins.shtc3.option_pairs(),
        ));
    }
    if config.plugins.mcp3425.enabled {
        let bus = LinuxI2cBus::new(config.plugins.mcp3425.bus);
        built.push((Box::new(plugins::mcp3425(bus)), Vec::new()));
    }

    built
}

fn humidity_metrics(derived: bool) -> HumidityMetrics {
    if derived {
        HumidityMetrics::with_derived()
    } else {
        HumidityMetrics::raw()
    }
}

async fn poll_loop(
    mut plugin: Box<dyn SensorPlugin>,
    sink: Arc<dyn DispatchSink>,
    interval: Duration,
) {
    loop {
        plugin.poll(sink.as_ref());
        tokio::time::sleep(interval).await;
    }
}
