//! Dispatch sink: where computed samples go.

use crate::sample::Sample;
use std::sync::Mutex;

/// Receiver of computed metric samples.
///
/// Fire-and-forget: plugins never see or care about downstream failures.
/// Transport and storage are the host's business.
pub trait DispatchSink: Send + Sync {
    /// Hands one sample from `plugin` to the sink.
    fn dispatch(&self, plugin: &str, sample: &Sample);
}

/// In-memory sink collecting `(plugin, sample)` pairs.
///
/// Used by tests and by hosts that batch samples themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    samples: Mutex<Vec<(String, Sample)>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything dispatched so far.
    pub fn samples(&self) -> Vec<(String, Sample)> {
        self.samples.lock().expect("sink poisoned").clone()
    }

    /// Removes and returns everything dispatched so far.
    pub fn drain(&self) -> Vec<(String, Sample)> {
        std::mem::take(&mut *self.samples.lock().expect("sink poisoned"))
    }
}

impl DispatchSink for MemorySink {
    fn dispatch(&self, plugin: &str, sample: &Sample) {
        self.samples
            .lock()
            .expect("sink poisoned")
            .push((plugin.to_string(), sample.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::MetricKind;

    #[test]
    fn test_memory_sink_collects_in_order() {
        let sink = MemorySink::new();
        sink.dispatch("a", &Sample::new(MetricKind::Temperature, 1.0));
        sink.dispatch("b", &Sample::new(MetricKind::Voltage, 2.0));

        let samples = sink.samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].0, "a");
        assert_eq!(samples[1].1.value, 2.0);
    }

    #[test]
    fn test_drain_empties_the_sink() {
        let sink = MemorySink::new();
        sink.dispatch("a", &Sample::new(MetricKind::Temperature, 1.0));
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.samples().is_empty());
    }
}
