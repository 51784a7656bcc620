//! Concrete dispatch sinks.

use pisense_plugins::{DispatchSink, Sample};
use serde_json::json;
use tracing::info;

/// Logs every sample through tracing.
pub struct LogSink;

impl DispatchSink for LogSink {
    fn dispatch(&self, plugin: &str, sample: &Sample) {
        match sample.instance {
            Some(instance) => info!(
                "{}: {} ({}) = {:.3} {}",
                plugin,
                sample.kind,
                instance,
                sample.value,
                sample.unit()
            ),
            None => info!(
                "{}: {} = {:.3} {}",
                plugin,
                sample.kind,
                sample.value,
                sample.unit()
            ),
        }
    }
}

/// Writes one JSON object per sample to stdout, for piping into a
/// collector.
pub struct JsonLineSink;

impl JsonLineSink {
    fn to_json(plugin: &str, sample: &Sample) -> serde_json::Value {
        json!({
            "plugin": plugin,
            "kind": sample.kind.to_string(),
            "instance": sample.instance,
            "value": sample.value,
            "unit": sample.unit(),
        })
    }
}

impl DispatchSink for JsonLineSink {
    fn dispatch(&self, plugin: &str, sample: &Sample) {
        println!("{}", Self::to_json(plugin, sample));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pisense_plugins::MetricKind;

    #[test]
    fn test_json_shape() {
        let sample = Sample::labeled(MetricKind::Voltage, "supply_voltage", 5018.0);
        let value = JsonLineSink::to_json("mcp3425", &sample);
        assert_eq!(value["plugin"], "mcp3425");
        assert_eq!(value["kind"], "voltage");
        assert_eq!(value["instance"], "supply_voltage");
        assert_eq!(value["value"], 5018.0);
        assert_eq!(value["unit"], "mV");
    }

    #[test]
    fn test_json_without_instance_is_null() {
        let sample = Sample::new(MetricKind::Temperature, 45.678);
        let value = JsonLineSink::to_json("cpu_temp", &sample);
        assert!(value["instance"].is_null());
    }
}
