//! Per-plugin configuration overrides.

use std::collections::BTreeMap;
use tracing::info;

/// Recognized option overrides for one plugin, built once at startup from
/// host-supplied key/value pairs and read-only afterwards.
///
/// Keys are matched case-insensitively. Unknown keys are logged and skipped;
/// they never fail configuration.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    plugin: &'static str,
    overrides: BTreeMap<String, String>,
}

impl PluginConfig {
    /// Builds the override map from host-supplied options.
    ///
    /// `recognized` lists the option names the owning plugin understands;
    /// anything else is reported and dropped.
    pub fn from_options(
        plugin: &'static str,
        recognized: &'static [&'static str],
        options: &[(String, String)],
    ) -> Self {
        let mut overrides = BTreeMap::new();
        for (key, value) in options {
            let key = key.to_lowercase();
            if recognized.contains(&key.as_str()) {
                overrides.insert(key, value.clone());
            } else {
                info!("{} plugin: unknown config key {:?}", plugin, key);
            }
        }
        Self { plugin, overrides }
    }

    /// An empty configuration for plugins without recognized options.
    pub fn empty(plugin: &'static str) -> Self {
        Self {
            plugin,
            overrides: BTreeMap::new(),
        }
    }

    /// Returns the override for `key`, if one was supplied.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.overrides.get(key).map(String::as_str)
    }

    /// Resolves an option against its default and logs which one is in use.
    pub fn resolve(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(value) => {
                info!("{} plugin: using overridden {}: {}", self.plugin, key, value);
                value.to_string()
            }
            None => {
                info!("{} plugin: using default {}: {}", self.plugin, key, default);
                default.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_recognized_key_is_kept() {
        let config =
            PluginConfig::from_options("cpu_temp", &["path"], &pairs(&[("path", "/tmp/temp")]));
        assert_eq!(config.get("path"), Some("/tmp/temp"));
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let config =
            PluginConfig::from_options("cpu_temp", &["path"], &pairs(&[("Path", "/tmp/temp")]));
        assert_eq!(config.get("path"), Some("/tmp/temp"));
    }

    #[test]
    fn test_unknown_key_is_dropped_not_fatal() {
        let config =
            PluginConfig::from_options("cpu_temp", &["path"], &pairs(&[("bogus", "1")]));
        assert_eq!(config.get("bogus"), None);
        assert_eq!(config.get("path"), None);
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let config = PluginConfig::empty("shtc3");
        assert_eq!(config.resolve("hwmon", "hwmon0"), "hwmon0");
    }
}
