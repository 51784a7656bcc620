//! Error types for the sensor plugin library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading sensors or running a plugin.
#[derive(Error, Debug)]
pub enum Error {
    /// Sensor file missing or unreadable.
    #[error("sensor file {} unreadable: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sensor file content is not a valid integer.
    #[error("sensor file {} contains non-numeric data: {content:?}", path.display())]
    Parse { path: PathBuf, content: String },

    /// I2C transaction failed.
    #[error("I2C bus error: {0}")]
    Bus(String),

    /// Device registration write failed.
    #[error("device registration via {} failed: {source}", path.display())]
    Registration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temperature outside the psychrometric table range.
    #[error("temperature {0} °C out of range (-20 – 350 °C)")]
    OutOfRange(f64),

    /// Input outside the mathematical domain of a calculation.
    #[error("calculation domain error: {0}")]
    Domain(String),
}
