//! Metric samples produced by plugins.

/// Kind of physical quantity a sample carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Temperature,
    RelativeHumidity,
    AbsoluteHumidity,
    DewPoint,
    Voltage,
}

impl MetricKind {
    /// Unit of measurement for this metric kind.
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Temperature | MetricKind::DewPoint => "°C",
            MetricKind::RelativeHumidity => "%",
            MetricKind::AbsoluteHumidity => "g/m³",
            MetricKind::Voltage => "mV",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::Temperature => write!(f, "temperature"),
            MetricKind::RelativeHumidity => write!(f, "relative_humidity"),
            MetricKind::AbsoluteHumidity => write!(f, "absolute_humidity"),
            MetricKind::DewPoint => write!(f, "dew_point"),
            MetricKind::Voltage => write!(f, "voltage"),
        }
    }
}

/// One physical measurement, produced fresh on every poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Physical quantity this sample measures.
    pub kind: MetricKind,
    /// Optional instance label distinguishing multiple metrics of one kind
    /// (e.g. "supply_voltage").
    pub instance: Option<&'static str>,
    /// Measured value in the kind's unit.
    pub value: f64,
}

impl Sample {
    /// Creates an unlabeled sample.
    pub fn new(kind: MetricKind, value: f64) -> Self {
        Self {
            kind,
            instance: None,
            value,
        }
    }

    /// Creates a sample with an instance label.
    pub fn labeled(kind: MetricKind, instance: &'static str, value: f64) -> Self {
        Self {
            kind,
            instance: Some(instance),
            value,
        }
    }

    /// Unit of measurement, derived from the metric kind.
    pub fn unit(&self) -> &'static str {
        self.kind.unit()
    }
}
