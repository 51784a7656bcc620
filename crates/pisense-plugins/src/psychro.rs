//! Psychrometric calculations.
//!
//! Water-vapor saturation pressure, dew point and absolute humidity using
//! the Vaisala humidity-conversion formulas (application note B210973EN-F).
//! Inputs are temperature in °C and relative humidity in percent; pressures
//! are in hPa. Double precision throughout; every call is independent and
//! cheap, so nothing is cached.

use crate::error::{Error, Result};

/// Saturation-pressure formula constants (A, m, Tn) for one temperature band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub a: f64,
    pub m: f64,
    pub tn: f64,
}

/// Lower bound of the coefficient table in °C.
pub const MIN_TEMPERATURE: f64 = -20.0;

/// Band upper bounds (exclusive) paired with their constants.
///
/// The last band nominally ends at 350 °C but there is no upper check:
/// temperatures above 350 °C silently reuse the last entry. That matches the
/// published table's behavior and is kept as-is rather than widened into an
/// error.
const COEFFICIENT_TABLE: [(f64, Coefficients); 5] = [
    (50.0, Coefficients { a: 6.116441, m: 7.591386, tn: 240.7263 }),
    (100.0, Coefficients { a: 6.004918, m: 7.337936, tn: 229.3975 }),
    (150.0, Coefficients { a: 5.856548, m: 7.27731, tn: 225.1033 }),
    (200.0, Coefficients { a: 6.002859, m: 7.290361, tn: 227.1704 }),
    (f64::INFINITY, Coefficients { a: 9.980622, m: 7.388931, tn: 263.1239 }),
];

/// Conversion factor between vapor pressure (Pa) per kelvin and g/m³.
const ABSOLUTE_HUMIDITY_FACTOR: f64 = 2.16679;

/// Looks up the saturation-pressure constants for a temperature.
///
/// Fails with [`Error::OutOfRange`] below -20 °C.
pub fn coefficients(t: f64) -> Result<Coefficients> {
    if t < MIN_TEMPERATURE {
        return Err(Error::OutOfRange(t));
    }
    for &(upper, c) in &COEFFICIENT_TABLE {
        if t < upper {
            return Ok(c);
        }
    }
    Ok(COEFFICIENT_TABLE[COEFFICIENT_TABLE.len() - 1].1)
}

/// Water-vapor saturation pressure in hPa.
///
/// `Pws = A · 10^(m·t / (t + Tn))`
pub fn saturation_pressure(t: f64) -> Result<f64> {
    let c = coefficients(t)?;
    let power = (c.m * t) / (t + c.tn);
    Ok(c.a * 10f64.powf(power))
}

/// Partial water-vapor pressure in hPa.
///
/// `Pw = Pws · rh / 100`
pub fn partial_pressure(t: f64, rh: f64) -> Result<f64> {
    Ok(saturation_pressure(t)? * rh / 100.0)
}

/// Dew point in °C.
///
/// `Td = Tn / (m / log10(Pw / A) − 1)`
///
/// Fails with [`Error::Domain`] when `Pw / A ≤ 0` (rh ≤ 0), where the
/// logarithm is undefined. Callers substitute a fallback value and keep the
/// poll cycle going rather than abort it.
pub fn dew_point(t: f64, rh: f64) -> Result<f64> {
    let c = coefficients(t)?;
    let pw = partial_pressure(t, rh)?;
    let ratio = pw / c.a;
    if ratio <= 0.0 {
        return Err(Error::Domain(format!(
            "partial pressure ratio {ratio} not positive (t={t} °C, rh={rh} %)"
        )));
    }
    Ok(c.tn / ((c.m / ratio.log10()) - 1.0))
}

/// Absolute humidity in g/m³.
///
/// `AH = C · Pw[Pa] / T[K]`
pub fn absolute_humidity(t: f64, rh: f64) -> Result<f64> {
    let pw = partial_pressure(t, rh)?;
    Ok(ABSOLUTE_HUMIDITY_FACTOR * (pw * 100.0) / celsius_to_kelvin(t))
}

/// Converts °C to K.
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + 273.15
}
