//! Pisense Sensor Plugin Library
//!
//! Building blocks for small hardware-monitoring plugins: each plugin polls
//! one physical sensor (CPU thermal zone, an I2C ADC, SHT21/SHTC3 humidity
//! sensors) and hands numeric samples to a dispatch sink owned by the host.
//!
//! The host drives every plugin through the [`SensorPlugin`] trait:
//! `configure` once, `init` once, then `poll` on a fixed cadence. Reading
//! strategies live behind [`reader::DeviceReader`], derived-metric math
//! behind [`compute::Compute`], so all plugins share one generic
//! [`plugin::Plugin`] lifecycle instead of four copies of it.

pub mod adc;
pub mod compute;
pub mod config;
pub mod error;
pub mod plugin;
pub mod plugins;
pub mod psychro;
pub mod reader;
pub mod sample;
pub mod sink;

pub use config::PluginConfig;
pub use error::{Error, Result};
pub use plugin::{Plugin, SensorPlugin};
pub use sample::{MetricKind, Sample};
pub use sink::{DispatchSink, MemorySink};

/// Divisor applied to raw sysfs integers (milli-units to base units).
pub const SYSFS_MILLI_DIVISOR: f64 = 1000.0;
