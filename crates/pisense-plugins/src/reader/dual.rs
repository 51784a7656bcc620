//! Dual sysfs reader for hwmon temperature + humidity pairs.

use super::{read_sysfs_scaled, DeviceReader};
use crate::config::PluginConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Reads a temperature/humidity pair from a hwmon instance.
///
/// Both values come from independent sysfs files; if either read fails the
/// whole cycle fails. There is no partial result.
#[derive(Debug)]
pub struct DualReader {
    hwmon: String,
    /// Config key that overrides the hwmon instance, if the plugin
    /// exposes one.
    hwmon_key: Option<&'static str>,
    temp_path: PathBuf,
    humidity_path: PathBuf,
}

impl DualReader {
    /// Creates a reader bound to a fixed hwmon instance.
    pub fn new(hwmon: &str) -> Self {
        let (temp_path, humidity_path) = Self::paths_for(hwmon);
        Self {
            hwmon: hwmon.to_string(),
            hwmon_key: None,
            temp_path,
            humidity_path,
        }
    }

    /// Creates a reader whose hwmon instance can be overridden via `key`.
    pub fn configurable(key: &'static str, default_hwmon: &str) -> Self {
        let mut reader = Self::new(default_hwmon);
        reader.hwmon_key = Some(key);
        reader
    }

    fn paths_for(hwmon: &str) -> (PathBuf, PathBuf) {
        let base = Path::new("/sys/class/hwmon").join(hwmon);
        (base.join("temp1_input"), base.join("humidity1_input"))
    }

    /// hwmon instance name currently in use.
    pub fn hwmon(&self) -> &str {
        &self.hwmon
    }

    /// Path of the temperature input file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the humidity input file.
    pub fn humidity_path(&self) -> &Path {
        &self.humidity_path
    }

    #[cfg(test)]
    pub(crate) fn with_paths(temp_path: PathBuf, humidity_path: PathBuf) -> Self {
        Self {
            hwmon: String::new(),
            hwmon_key: None,
            temp_path,
            humidity_path,
        }
    }
}

impl DeviceReader for DualReader {
    /// (temperature °C, relative humidity %).
    type Value = (f64, f64);

    fn describe(&self) -> String {
        format!("{} + {}", self.temp_path.display(), self.humidity_path.display())
    }

    fn apply_config(&mut self, config: &PluginConfig) {
        if let Some(key) = self.hwmon_key {
            let default = self.hwmon.clone();
            self.hwmon = config.resolve(key, &default);
            let (temp_path, humidity_path) = Self::paths_for(&self.hwmon);
            self.temp_path = temp_path;
            self.humidity_path = humidity_path;
        }
    }

    fn probe(&self) -> bool {
        self.temp_path.is_file() && self.humidity_path.is_file()
    }

    fn read(&mut self) -> Result<(f64, f64)> {
        let temperature = read_sysfs_scaled(&self.temp_path)?;
        let humidity = read_sysfs_scaled(&self.humidity_path)?;
        Ok((temperature, humidity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_hwmon_override_rederives_paths() {
        let mut reader = DualReader::configurable("hwmon", "hwmon0");
        let options = vec![("hwmon".to_string(), "hwmon3".to_string())];
        reader.apply_config(&PluginConfig::from_options("shtc3", &["hwmon"], &options));

        assert_eq!(reader.hwmon(), "hwmon3");
        assert_eq!(
            reader.temp_path(),
            Path::new("/sys/class/hwmon/hwmon3/temp1_input")
        );
        assert_eq!(
            reader.humidity_path(),
            Path::new("/sys/class/hwmon/hwmon3/humidity1_input")
        );
    }

    #[test]
    fn test_reads_both_values() {
        let dir = tempdir().unwrap();
        let temp_path = dir.path().join("temp1_input");
        let humidity_path = dir.path().join("humidity1_input");
        fs::write(&temp_path, "21340\n").unwrap();
        fs::write(&humidity_path, "48250\n").unwrap();

        let mut reader = DualReader::with_paths(temp_path, humidity_path);
        assert!(reader.probe());
        assert_eq!(reader.read().unwrap(), (21.34, 48.25));
    }

    #[test]
    fn test_one_missing_path_fails_whole_read() {
        let dir = tempdir().unwrap();
        let temp_path = dir.path().join("temp1_input");
        fs::write(&temp_path, "21340\n").unwrap();

        let mut reader =
            DualReader::with_paths(temp_path, dir.path().join("humidity1_input"));
        assert!(!reader.probe());
        assert!(matches!(reader.read(), Err(Error::Io { .. })));
    }
}
