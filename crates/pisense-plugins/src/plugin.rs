//! Plugin lifecycle: configure once, init once, poll forever.

use crate::compute::Compute;
use crate::config::PluginConfig;
use crate::error::{Error, Result};
use crate::reader::DeviceReader;
use crate::sink::DispatchSink;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Host-facing plugin interface.
///
/// The host owns the instance and drives it on its own scheduling thread:
/// `configure` at most once, `init` once, then `poll` repeatedly at a fixed
/// cadence. Calls are serialized; nothing here spawns concurrent work.
pub trait SensorPlugin: Send {
    /// Plugin name used in logs and dispatched samples.
    fn name(&self) -> &str;

    /// Applies host-supplied option overrides. Never fails; unknown keys
    /// are logged and skipped.
    fn configure(&mut self, options: &[(String, String)]);

    /// One-time device registration/initialization. A failure here is fatal
    /// to the plugin: without a device path there is nothing to poll.
    fn init(&mut self) -> Result<()>;

    /// One read→compute→dispatch cycle. Failures are logged and the cycle
    /// degrades or is skipped; they never propagate.
    fn poll(&mut self, sink: &dyn DispatchSink);
}

/// Lifecycle states of a plugin instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unconfigured,
    Configured,
    Ready,
    Polling,
}

/// One-time sysfs device registration: a single write of
/// `"<driver> <i2c-address>"` to the bus's `new_device` file.
#[derive(Debug, Clone)]
pub struct SysfsRegistration {
    registration_path: PathBuf,
    parameter: String,
}

impl SysfsRegistration {
    pub fn new(registration_path: impl Into<PathBuf>, parameter: impl Into<String>) -> Self {
        Self {
            registration_path: registration_path.into(),
            parameter: parameter.into(),
        }
    }

    fn register(&self) -> Result<()> {
        std::fs::write(&self.registration_path, &self.parameter).map_err(|source| {
            Error::Registration {
                path: self.registration_path.clone(),
                source,
            }
        })
    }
}

/// Generic plugin: a device reader strategy plus a derived-metric
/// computation, sharing one lifecycle implementation.
pub struct Plugin<R, C>
where
    R: DeviceReader,
    C: Compute<R::Value>,
{
    name: &'static str,
    recognized_keys: &'static [&'static str],
    reader: R,
    compute: C,
    registration: Option<SysfsRegistration>,
    state: LifecycleState,
}

impl<R, C> Plugin<R, C>
where
    R: DeviceReader,
    C: Compute<R::Value>,
{
    /// Creates a plugin without a registration step.
    pub fn new(
        name: &'static str,
        recognized_keys: &'static [&'static str],
        reader: R,
        compute: C,
    ) -> Self {
        Self {
            name,
            recognized_keys,
            reader,
            compute,
            registration: None,
            state: LifecycleState::Unconfigured,
        }
    }

    /// Adds a one-time sysfs registration performed at init when the
    /// device is not present yet.
    pub fn with_registration(mut self, registration: SysfsRegistration) -> Self {
        self.registration = Some(registration);
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }
}

impl<R, C> SensorPlugin for Plugin<R, C>
where
    R: DeviceReader,
    C: Compute<R::Value>,
{
    fn name(&self) -> &str {
        self.name
    }

    fn configure(&mut self, options: &[(String, String)]) {
        if self.state != LifecycleState::Unconfigured {
            warn!("{} plugin: configure called twice, ignoring", self.name);
            return;
        }
        let config = PluginConfig::from_options(self.name, self.recognized_keys, options);
        self.reader.apply_config(&config);
        self.state = LifecycleState::Configured;
    }

    fn init(&mut self) -> Result<()> {
        if matches!(self.state, LifecycleState::Ready | LifecycleState::Polling) {
            warn!("{} plugin: init called twice, ignoring", self.name);
            return Ok(());
        }
        match &self.registration {
            Some(registration) => {
                if self.reader.probe() {
                    info!("{} plugin: sensor already registered in sysfs", self.name);
                } else {
                    registration.register()?;
                    info!("{} plugin: sensor successfully registered in sysfs", self.name);
                }
            }
            None => {
                info!("{} plugin: initialized ({})", self.name, self.reader.describe());
            }
        }
        self.state = LifecycleState::Ready;
        Ok(())
    }

    fn poll(&mut self, sink: &dyn DispatchSink) {
        if matches!(
            self.state,
            LifecycleState::Unconfigured | LifecycleState::Configured
        ) {
            warn!("{} plugin: poll before init, skipping cycle", self.name);
            return;
        }
        self.state = LifecycleState::Polling;

        // Reads happen before computation, computation before dispatch.
        let value = match self.reader.read() {
            Ok(value) => value,
            Err(e) => {
                // Best-effort: skip this cycle, keep polling.
                error!("{} plugin: read failed: {}", self.name, e);
                return;
            }
        };
        for sample in self.compute.compute(value) {
            sink.dispatch(self.name, &sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{HumidityMetrics, PassThrough};
    use crate::reader::{DualReader, ScalarReader};
    use crate::sample::MetricKind;
    use crate::sink::MemorySink;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_thermal_end_to_end() {
        let dir = tempdir().unwrap();
        let temp_path = dir.path().join("temp");
        fs::write(&temp_path, "45678").unwrap();

        let mut plugin = Plugin::new(
            "cpu_temp",
            &["path"],
            ScalarReader::new(&temp_path),
            PassThrough::new(MetricKind::Temperature),
        );
        plugin.configure(&[]);
        plugin.init().unwrap();

        let sink = MemorySink::new();
        plugin.poll(&sink);

        let samples = sink.samples();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].0, "cpu_temp");
        assert_eq!(samples[0].1.kind, MetricKind::Temperature);
        assert_eq!(samples[0].1.value, 45.678);
        assert_eq!(plugin.state(), LifecycleState::Polling);
    }

    #[test]
    fn test_unknown_config_keys_never_fail() {
        let mut plugin = Plugin::new(
            "cpu_temp",
            &["path"],
            ScalarReader::new("/nonexistent"),
            PassThrough::new(MetricKind::Temperature),
        );
        plugin.configure(&[("bogus".to_string(), "1".to_string())]);
        assert_eq!(plugin.state(), LifecycleState::Configured);
    }

    #[test]
    fn test_read_failure_skips_cycle_and_recovers() {
        let dir = tempdir().unwrap();
        let temp_path = dir.path().join("temp");

        let mut plugin = Plugin::new(
            "cpu_temp",
            &[],
            ScalarReader::new(&temp_path),
            PassThrough::new(MetricKind::Temperature),
        );
        plugin.init().unwrap();

        let sink = MemorySink::new();
        plugin.poll(&sink);
        assert!(sink.samples().is_empty());

        // The next cycle succeeds once the file appears.
        fs::write(&temp_path, "1000").unwrap();
        plugin.poll(&sink);
        assert_eq!(sink.samples().len(), 1);
    }

    #[test]
    fn test_poll_before_init_is_skipped() {
        let mut plugin = Plugin::new(
            "cpu_temp",
            &[],
            ScalarReader::new("/nonexistent"),
            PassThrough::new(MetricKind::Temperature),
        );
        let sink = MemorySink::new();
        plugin.poll(&sink);
        assert!(sink.samples().is_empty());
        assert_eq!(plugin.state(), LifecycleState::Unconfigured);
    }

    #[test]
    fn test_init_skips_registration_when_device_present() {
        let dir = tempdir().unwrap();
        let temp_path = dir.path().join("temp1_input");
        let humidity_path = dir.path().join("humidity1_input");
        fs::write(&temp_path, "20000").unwrap();
        fs::write(&humidity_path, "50000").unwrap();
        let reg_path = dir.path().join("new_device");

        let mut plugin = Plugin::new(
            "sht21",
            &[],
            DualReader::with_paths(temp_path, humidity_path),
            HumidityMetrics::with_derived(),
        )
        .with_registration(SysfsRegistration::new(&reg_path, "sht21 0x40"));

        plugin.init().unwrap();
        assert!(!reg_path.exists(), "no registration write expected");
    }

    #[test]
    fn test_init_registers_missing_device() {
        let dir = tempdir().unwrap();
        let reg_path = dir.path().join("new_device");

        let mut plugin = Plugin::new(
            "sht21",
            &[],
            DualReader::with_paths(
                dir.path().join("temp1_input"),
                dir.path().join("humidity1_input"),
            ),
            HumidityMetrics::with_derived(),
        )
        .with_registration(SysfsRegistration::new(&reg_path, "sht21 0x40"));

        plugin.init().unwrap();
        assert_eq!(fs::read_to_string(&reg_path).unwrap(), "sht21 0x40");
    }

    #[test]
    fn test_failed_registration_write_is_fatal() {
        let dir = tempdir().unwrap();
        // Writing to a path inside a missing directory must fail.
        let reg_path = dir.path().join("missing").join("new_device");

        let mut plugin = Plugin::new(
            "sht21",
            &[],
            DualReader::with_paths(
                dir.path().join("temp1_input"),
                dir.path().join("humidity1_input"),
            ),
            HumidityMetrics::with_derived(),
        )
        .with_registration(SysfsRegistration::new(&reg_path, "sht21 0x40"));

        assert!(matches!(plugin.init(), Err(Error::Registration { .. })));
    }

    #[test]
    fn test_second_init_is_tolerated() {
        let dir = tempdir().unwrap();
        let temp_path = dir.path().join("temp");
        fs::write(&temp_path, "1000").unwrap();

        let mut plugin = Plugin::new(
            "cpu_temp",
            &[],
            ScalarReader::new(&temp_path),
            PassThrough::new(MetricKind::Temperature),
        );
        plugin.init().unwrap();
        plugin.init().unwrap();
        assert_eq!(plugin.state(), LifecycleState::Ready);
    }

    #[test]
    fn test_dew_point_fallback_still_dispatches_cycle() {
        let dir = tempdir().unwrap();
        let temp_path = dir.path().join("temp1_input");
        let humidity_path = dir.path().join("humidity1_input");
        fs::write(&temp_path, "20000").unwrap();
        fs::write(&humidity_path, "0").unwrap();

        let mut plugin = Plugin::new(
            "shtc3",
            &["hwmon"],
            DualReader::with_paths(temp_path, humidity_path),
            HumidityMetrics::with_derived(),
        );
        plugin.configure(&[]);
        plugin.init().unwrap();

        let sink = MemorySink::new();
        plugin.poll(&sink);

        let samples = sink.samples();
        assert_eq!(samples.len(), 4);
        let dew = samples
            .iter()
            .find(|(_, s)| s.kind == MetricKind::DewPoint)
            .unwrap();
        assert_eq!(dew.1.value, 0.0);
    }
}
