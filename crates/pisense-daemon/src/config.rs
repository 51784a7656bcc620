//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Poll interval in seconds, shared by all plugins
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Sample sink configuration
    #[serde(default)]
    pub sink: SinkConfig,

    /// Per-plugin configuration
    #[serde(default)]
    pub plugins: PluginsConfig,
}

/// Where dispatched samples go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Output format for dispatched samples
    #[serde(default)]
    pub format: SinkFormat,
}

/// Sample output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkFormat {
    /// Human-readable log lines
    #[default]
    Log,
    /// One JSON object per sample on stdout
    Json,
}

/// Enable flags and options for every known plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginsConfig {
    /// CPU thermal zone plugin
    #[serde(default)]
    pub cpu_temp: PluginEntry,

    /// SHT21 humidity/temperature plugin
    #[serde(default)]
    pub sht21: HumidityEntry,

    /// SHTC3 humidity/temperature plugin
    #[serde(default)]
    pub shtc3: HumidityEntry,

    /// MCP3425 supply-voltage plugin
    #[serde(default)]
    pub mcp3425: AdcEntry,
}

/// A plain plugin entry: enable flag plus option overrides handed to
/// the plugin's `configure`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginEntry {
    #[serde(default)]
    pub enabled: bool,

    /// Key/value overrides (e.g. `path`)
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl PluginEntry {
    /// Options as the (key, value) pairs the plugin interface takes.
    pub fn option_pairs(&self) -> Vec<(String, String)> {
        self.options
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Humidity plugin entry with the derived-metrics switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumidityEntry {
    #[serde(default)]
    pub enabled: bool,

    /// Key/value overrides (e.g. `hwmon`)
    #[serde(default)]
    pub options: BTreeMap<String, String>,

    /// Also dispatch absolute humidity and dew point
    #[serde(default = "default_true")]
    pub derived: bool,
}

impl Default for HumidityEntry {
    fn default() -> Self {
        Self {
            enabled: false,
            options: BTreeMap::new(),
            derived: true,
        }
    }
}

impl HumidityEntry {
    /// Options as the (key, value) pairs the plugin interface takes.
    pub fn option_pairs(&self) -> Vec<(String, String)> {
        self.options
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// ADC plugin entry with the I2C adapter number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdcEntry {
    #[serde(default)]
    pub enabled: bool,

    /// I2C adapter number (/dev/i2c-N)
    #[serde(default = "default_bus")]
    pub bus: u8,
}

impl Default for AdcEntry {
    fn default() -> Self {
        Self {
            enabled: false,
            bus: default_bus(),
        }
    }
}

// Default value functions
fn default_interval() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_bus() -> u8 {
    1
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            format: SinkFormat::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            sink: SinkConfig::default(),
            plugins: PluginsConfig::default(),
        }
    }
}
