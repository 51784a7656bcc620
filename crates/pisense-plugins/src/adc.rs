//! ADC code to supply-voltage conversion.
//!
//! Inverts a three-resistor voltage divider, assuming the ADC measures the
//! node between R2 and R3 and the sampled rail is half the real supply.

/// A three-resistor voltage divider, values in ohms.
///
/// Invariant: `r1 + r2 + r3 > 0`. Divider values are build-time constants,
/// so this is not re-checked at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerNetwork {
    pub r1: u32,
    pub r2: u32,
    pub r3: u32,
}

impl DividerNetwork {
    /// Creates a divider network from the three resistor values.
    pub const fn new(r1: u32, r2: u32, r3: u32) -> Self {
        Self { r1, r2, r3 }
    }

    /// Sum of all three resistors.
    pub const fn total(&self) -> u32 {
        self.r1 + self.r2 + self.r3
    }
}

/// Converts a raw ADC code to the supply voltage in millivolts.
///
/// `v2 = code · ref_mv / 2^resolution_bits` is the voltage at the divider
/// tap; scaling by `r2 / total` undoes the divider and the final factor of
/// two undoes the half-rail measurement.
pub fn raw_to_millivolts(code: u16, resolution_bits: u32, ref_mv: u32, divider: DividerNetwork) -> f64 {
    let v2 = code as f64 * ref_mv as f64 / (1u64 << resolution_bits) as f64;
    let ratio = divider.r2 as f64 / divider.total() as f64;
    v2 / ratio * 2.0
}
