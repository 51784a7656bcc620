//! Single sysfs scalar reader.

use super::{read_sysfs_scaled, DeviceReader};
use crate::config::PluginConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Reads one sysfs file containing an integer in milli-units.
#[derive(Debug)]
pub struct ScalarReader {
    path: PathBuf,
    /// Config key that overrides the path, if the plugin exposes one.
    path_key: Option<&'static str>,
}

impl ScalarReader {
    /// Creates a reader with a fixed path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            path_key: None,
        }
    }

    /// Creates a reader whose default path can be overridden via `key`.
    pub fn configurable(key: &'static str, default_path: impl Into<PathBuf>) -> Self {
        Self {
            path: default_path.into(),
            path_key: Some(key),
        }
    }

    /// Current path the reader polls.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeviceReader for ScalarReader {
    type Value = f64;

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn apply_config(&mut self, config: &PluginConfig) {
        if let Some(key) = self.path_key {
            let default = self.path.display().to_string();
            self.path = PathBuf::from(config.resolve(key, &default));
        }
    }

    fn probe(&self) -> bool {
        self.path.is_file()
    }

    fn read(&mut self) -> Result<f64> {
        read_sysfs_scaled(&self.path)
    }
}
