//! Derived-metric computations applied between read and dispatch.

use crate::adc::{self, DividerNetwork};
use crate::psychro;
use crate::sample::{MetricKind, Sample};
use tracing::error;

/// Dew point substituted when the calculation has no defined result.
pub const DEW_POINT_FALLBACK: f64 = 0.0;

/// Turns one device reading into zero or more samples.
///
/// Computation failures degrade to a log line plus a fallback or omitted
/// sample; they never abort the poll cycle.
pub trait Compute<V>: Send {
    fn compute(&self, value: V) -> Vec<Sample>;
}

/// Forwards the reading unchanged as a single sample.
#[derive(Debug, Clone, Copy)]
pub struct PassThrough {
    kind: MetricKind,
}

impl PassThrough {
    pub fn new(kind: MetricKind) -> Self {
        Self { kind }
    }
}

impl Compute<f64> for PassThrough {
    fn compute(&self, value: f64) -> Vec<Sample> {
        vec![Sample::new(self.kind, value)]
    }
}

/// Temperature + relative humidity, optionally extended with absolute
/// humidity and dew point.
///
/// The two humidity plugin variants only differ here: one dispatches the
/// derived metrics, the other forwards the raw pair untouched.
#[derive(Debug, Clone, Copy)]
pub struct HumidityMetrics {
    derived: bool,
}

impl HumidityMetrics {
    /// Raw pair only.
    pub fn raw() -> Self {
        Self { derived: false }
    }

    /// Raw pair plus absolute humidity and dew point.
    pub fn with_derived() -> Self {
        Self { derived: true }
    }
}

impl Compute<(f64, f64)> for HumidityMetrics {
    fn compute(&self, (t, rh): (f64, f64)) -> Vec<Sample> {
        let mut samples = vec![
            Sample::new(MetricKind::Temperature, t),
            Sample::new(MetricKind::RelativeHumidity, rh),
        ];
        if self.derived {
            match psychro::absolute_humidity(t, rh) {
                Ok(ah) => samples.push(Sample::new(MetricKind::AbsoluteHumidity, ah)),
                Err(e) => error!("could not calculate absolute humidity: {}", e),
            }
            let dew = match psychro::dew_point(t, rh) {
                Ok(td) => td,
                Err(e) => {
                    error!("could not calculate dew point: {}", e);
                    DEW_POINT_FALLBACK
                }
            };
            samples.push(Sample::new(MetricKind::DewPoint, dew));
        }
        samples
    }
}

/// Supply-voltage conversion for a raw ADC code behind a divider network.
#[derive(Debug, Clone, Copy)]
pub struct SupplyVoltage {
    divider: DividerNetwork,
    resolution_bits: u32,
    ref_mv: u32,
    instance: &'static str,
}

impl SupplyVoltage {
    pub fn new(
        divider: DividerNetwork,
        resolution_bits: u32,
        ref_mv: u32,
        instance: &'static str,
    ) -> Self {
        Self {
            divider,
            resolution_bits,
            ref_mv,
            instance,
        }
    }
}

impl Compute<u16> for SupplyVoltage {
    fn compute(&self, code: u16) -> Vec<Sample> {
        let millivolts =
            adc::raw_to_millivolts(code, self.resolution_bits, self.ref_mv, self.divider);
        vec![Sample::labeled(MetricKind::Voltage, self.instance, millivolts)]
    }
}
