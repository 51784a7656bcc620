//! Ready-made plugin constructors with each sensor's stock defaults.

use crate::compute::{HumidityMetrics, PassThrough, SupplyVoltage};
use crate::plugin::{Plugin, SysfsRegistration};
use crate::reader::{DualReader, I2cBus, I2cTransactionReader, ScalarReader};
use crate::sample::MetricKind;
use self::adc_config as mcp;
use std::time::Duration;

/// Default CPU thermal zone path.
pub const CPU_TEMP_DEFAULT_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";

/// sysfs file accepting `"<driver> <address>"` device registrations on
/// I2C bus 1.
pub const I2C1_NEW_DEVICE: &str = "/sys/bus/i2c/devices/i2c-1/new_device";

/// Default hwmon instance the humidity sensors appear under.
pub const DEFAULT_HWMON: &str = "hwmon0";

/// MCP3425 configuration register layout.
pub mod adc_config {
    /// 7-bit I2C device address.
    pub const DEVICE_ADDRESS: u16 = 0x68;

    /// ADC reference voltage in mV.
    pub const ADC_REF_MV: u32 = 2048;

    /// Resolution at 15 samples/s.
    pub const RESOLUTION_BITS: u32 = 16;

    /// Conversion settling time at 15 samples/s.
    pub const SETTLE_MS: u64 = 150;

    // Config register bit positions.
    const BIT_G0: u8 = 0;
    const BIT_G1: u8 = 1;
    const BIT_S0: u8 = 2;
    const BIT_S1: u8 = 3;
    const BIT_OC: u8 = 4;
    const BIT_RDY: u8 = 7;

    /// One-shot conversion mode.
    pub const CONVERSION_MODE_ONESHOT: u8 = 0;
    /// Continuous conversion mode.
    pub const CONVERSION_MODE_CONT: u8 = 1 << BIT_OC;

    /// 240 samples/s (12 bits).
    pub const SAMPLE_RATE_240SPS: u8 = 0;
    /// 60 samples/s (14 bits).
    pub const SAMPLE_RATE_60SPS: u8 = 1 << BIT_S0;
    /// 15 samples/s (16 bits).
    pub const SAMPLE_RATE_15SPS: u8 = 1 << BIT_S1;

    /// PGA gain 1x.
    pub const PGA_GAIN_1: u8 = 0;
    /// PGA gain 2x.
    pub const PGA_GAIN_2: u8 = 1 << BIT_G0;
    /// PGA gain 4x.
    pub const PGA_GAIN_4: u8 = 1 << BIT_G1;
    /// PGA gain 8x.
    pub const PGA_GAIN_8: u8 = (1 << BIT_G1) | (1 << BIT_G0);

    /// Start a conversion in one-shot mode.
    pub const START_CONVERSION: u8 = 1 << BIT_RDY;

    /// Stock one-shot configuration: start, 15 SPS, gain 1.
    pub const ONESHOT_16BIT_GAIN1: u8 =
        START_CONVERSION | CONVERSION_MODE_ONESHOT | SAMPLE_RATE_15SPS | PGA_GAIN_1;
}

/// CPU thermal-zone plugin. Config key: `path`.
pub fn cpu_temp() -> Plugin<ScalarReader, PassThrough> {
    Plugin::new(
        "cpu_temp",
        &["path"],
        ScalarReader::configurable("path", CPU_TEMP_DEFAULT_PATH),
        PassThrough::new(MetricKind::Temperature),
    )
}

/// SHT21 humidity/temperature plugin at a fixed hwmon instance.
/// No config keys.
pub fn sht21() -> Plugin<DualReader, HumidityMetrics> {
    sht21_with(HumidityMetrics::with_derived())
}

/// SHT21 with an explicit metrics selection (raw pair or derived).
pub fn sht21_with(metrics: HumidityMetrics) -> Plugin<DualReader, HumidityMetrics> {
    Plugin::new("sht21", &[], DualReader::new(DEFAULT_HWMON), metrics)
        .with_registration(SysfsRegistration::new(I2C1_NEW_DEVICE, "sht21 0x40"))
}

/// SHTC3 humidity/temperature plugin. Config key: `hwmon`.
pub fn shtc3() -> Plugin<DualReader, HumidityMetrics> {
    shtc3_with(HumidityMetrics::with_derived())
}

/// SHTC3 with an explicit metrics selection (raw pair or derived).
pub fn shtc3_with(metrics: HumidityMetrics) -> Plugin<DualReader, HumidityMetrics> {
    Plugin::new(
        "shtc3",
        &["hwmon"],
        DualReader::configurable("hwmon", DEFAULT_HWMON),
        metrics,
    )
    .with_registration(SysfsRegistration::new(I2C1_NEW_DEVICE, "shtc1 0x70"))
}

/// MCP3425 supply-voltage plugin over the given bus handle. No config keys.
///
/// Stock divider network: 6.8 kΩ / 3.6 kΩ / 470 Ω.
pub fn mcp3425<B: I2cBus>(bus: B) -> Plugin<I2cTransactionReader<B>, SupplyVoltage> {
    Plugin::new(
        "mcp3425",
        &[],
        I2cTransactionReader::new(
            bus,
            mcp::DEVICE_ADDRESS,
            mcp::ONESHOT_16BIT_GAIN1,
            Duration::from_millis(mcp::SETTLE_MS),
        ),
        SupplyVoltage::new(
            crate::adc::DividerNetwork::new(6800, 3600, 470),
            mcp::RESOLUTION_BITS,
            mcp::ADC_REF_MV,
            "supply_voltage",
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::SensorPlugin;

    #[test]
    fn test_oneshot_config_byte() {
        assert_eq!(adc_config::ONESHOT_16BIT_GAIN1, 0x88);
    }

    #[test]
    fn test_plugin_names() {
        assert_eq!(cpu_temp().name(), "cpu_temp");
        assert_eq!(sht21().name(), "sht21");
        assert_eq!(shtc3().name(), "shtc3");
    }
}
