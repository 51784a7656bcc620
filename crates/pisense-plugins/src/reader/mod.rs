//! Device readers: strategies for reading one physical quantity.

mod dual;
mod i2c;
mod scalar;

pub use dual::DualReader;
pub use i2c::{I2cBus, I2cTransactionReader};
pub use scalar::ScalarReader;

use crate::config::PluginConfig;
use crate::error::{Error, Result};
use crate::SYSFS_MILLI_DIVISOR;
use std::path::Path;

/// One read strategy for a sensor device.
pub trait DeviceReader: Send {
    /// What one read produces.
    type Value;

    /// Short human-readable description of the device for logs.
    fn describe(&self) -> String;

    /// Applies recognized configuration overrides. Called at most once,
    /// before [`DeviceReader::probe`] or [`DeviceReader::read`].
    fn apply_config(&mut self, _config: &PluginConfig) {}

    /// Whether the device is already present (e.g. its sysfs paths exist).
    /// Drives the registration-idempotence check at init time.
    fn probe(&self) -> bool {
        true
    }

    /// Reads the current value from the device.
    fn read(&mut self) -> Result<Self::Value>;
}

/// Reads a sysfs scalar file: ASCII integer in milli-units, whitespace
/// trimmed, scaled to base units.
pub(crate) fn read_sysfs_scaled(path: &Path) -> Result<f64> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let trimmed = raw.trim();
    let milli: i64 = trimmed.parse().map_err(|_| Error::Parse {
        path: path.to_path_buf(),
        content: trimmed.to_string(),
    })?;
    Ok(milli as f64 / SYSFS_MILLI_DIVISOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_scaled_read_trims_and_scales() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"23456\n").unwrap();
        assert_eq!(read_sysfs_scaled(file.path()).unwrap(), 23.456);
    }

    #[test]
    fn test_negative_values_parse() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"-5000\n").unwrap();
        assert_eq!(read_sysfs_scaled(file.path()).unwrap(), -5.0);
    }

    #[test]
    fn test_non_numeric_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"garbage\n").unwrap();
        assert!(matches!(
            read_sysfs_scaled(file.path()),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_path_is_io_error() {
        assert!(matches!(
            read_sysfs_scaled(Path::new("/nonexistent/sensor")),
            Err(Error::Io { .. })
        ));
    }
}
