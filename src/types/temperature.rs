// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature scales and wire conversions.
//!
//! The API reports two kinds of temperature:
//!
//! - the indoor reading, encoded as `celsius * 100 + 5000`
//! - the target setpoint, encoded as `celsius * 10`
//!
//! Setpoints are only accepted on a fixed grid. [`SETPOINTS`] pairs every
//! valid Fahrenheit setpoint with the Celsius value the unit uses for it;
//! user input in either scale is snapped to the nearest entry before it is
//! encoded.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ValueError};

/// Offset applied to indoor readings on the wire.
const INDOOR_OFFSET: f64 = 5000.0;

/// Scale of indoor readings on the wire (hundredths of a degree).
const INDOOR_DIVISOR: f64 = 100.0;

/// Scale of setpoints on the wire (tenths of a degree).
const SETPOINT_DIVISOR: f64 = 10.0;

/// A valid setpoint in both scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoint {
    /// Setpoint in degrees Fahrenheit.
    pub fahrenheit: f64,
    /// Setpoint in degrees Celsius.
    pub celsius: f64,
}

const fn setpoint(fahrenheit: f64, celsius: f64) -> Setpoint {
    Setpoint {
        fahrenheit,
        celsius,
    }
}

/// Valid setpoints, ascending.
pub const SETPOINTS: [Setpoint; 29] = [
    setpoint(60.0, 16.0),
    setpoint(61.0, 16.5),
    setpoint(62.0, 17.0),
    setpoint(63.0, 17.5),
    setpoint(64.0, 18.0),
    setpoint(65.0, 18.5),
    setpoint(66.0, 19.0),
    setpoint(67.0, 19.5),
    setpoint(68.0, 20.0),
    setpoint(69.0, 20.5),
    setpoint(70.0, 21.0),
    setpoint(71.0, 21.5),
    setpoint(72.0, 22.0),
    setpoint(73.0, 22.5),
    setpoint(74.0, 23.0),
    setpoint(75.0, 23.5),
    setpoint(76.0, 24.0),
    setpoint(77.0, 24.5),
    setpoint(78.0, 25.0),
    setpoint(79.0, 25.5),
    setpoint(80.0, 26.0),
    setpoint(81.0, 26.5),
    setpoint(82.0, 27.0),
    setpoint(83.0, 27.5),
    setpoint(84.0, 28.0),
    setpoint(85.0, 28.5),
    setpoint(86.0, 29.0),
    setpoint(87.0, 29.5),
    setpoint(88.0, 30.0),
];

/// Temperature scale requested by the caller.
///
/// # Examples
///
/// ```
/// use airstage_lib::types::TemperatureScale;
///
/// let scale: TemperatureScale = "F".parse().unwrap();
/// assert_eq!(scale, TemperatureScale::Fahrenheit);
/// assert_eq!(scale.from_celsius(100.0), 212.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum TemperatureScale {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureScale {
    /// Returns the unit symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Converts a Celsius reading into this scale with the exact formula.
    #[must_use]
    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Converts a Celsius setpoint into this scale through [`SETPOINTS`].
    #[must_use]
    pub fn setpoint_from_celsius(&self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => nearest(celsius, |s| s.celsius).fahrenheit,
        }
    }

    /// Snaps a setpoint given in this scale to the nearest valid Celsius value.
    #[must_use]
    pub fn setpoint_to_celsius(&self, value: f64) -> f64 {
        match self {
            Self::Celsius => nearest(value, |s| s.celsius).celsius,
            Self::Fahrenheit => nearest(value, |s| s.fahrenheit).celsius,
        }
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for TemperatureScale {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "C" | "CELSIUS" | "°C" => Ok(Self::Celsius),
            "F" | "FAHRENHEIT" | "°F" => Ok(Self::Fahrenheit),
            _ => Err(ValueError::InvalidTemperatureScale(s.to_string())),
        }
    }
}

/// Returns the table entry whose `key` is closest to `value`.
///
/// Ties resolve to the first entry in table order.
fn nearest(value: f64, key: impl Fn(&Setpoint) -> f64) -> Setpoint {
    let mut best = SETPOINTS[0];
    let mut best_distance = (key(&best) - value).abs();
    for candidate in &SETPOINTS[1..] {
        let distance = (key(candidate) - value).abs();
        if distance < best_distance {
            best = *candidate;
            best_distance = distance;
        }
    }
    best
}

fn parse_wire_number(field: &str, wire: &str) -> Result<f64, ParseError> {
    wire.trim()
        .parse::<f64>()
        .map_err(|e| ParseError::InvalidValue {
            field: field.to_string(),
            message: format!("{wire:?}: {e}"),
        })
}

/// Decodes an indoor reading into degrees Celsius.
///
/// # Errors
///
/// Returns `ParseError::InvalidValue` if the wire value is not numeric.
pub fn indoor_celsius_from_wire(wire: &str) -> Result<f64, ParseError> {
    Ok((parse_wire_number("indoor temperature", wire)? - INDOOR_OFFSET) / INDOOR_DIVISOR)
}

/// Decodes a target setpoint into degrees Celsius.
///
/// # Errors
///
/// Returns `ParseError::InvalidValue` if the wire value is not numeric.
pub fn target_celsius_from_wire(wire: &str) -> Result<f64, ParseError> {
    Ok(parse_wire_number("target temperature", wire)? / SETPOINT_DIVISOR)
}

/// Encodes a setpoint given in `scale` into its wire value.
///
/// The value is snapped to the nearest valid setpoint first.
///
/// # Errors
///
/// Returns `ValueError::InvalidTemperature` for NaN or infinite input.
///
/// # Examples
///
/// ```
/// use airstage_lib::types::{target_wire_value, TemperatureScale};
///
/// assert_eq!(target_wire_value(22.2, TemperatureScale::Celsius).unwrap(), "220");
/// assert_eq!(target_wire_value(72.0, TemperatureScale::Fahrenheit).unwrap(), "220");
/// ```
pub fn target_wire_value(value: f64, scale: TemperatureScale) -> Result<String, ValueError> {
    if !value.is_finite() {
        return Err(ValueError::InvalidTemperature(value));
    }
    let celsius = scale.setpoint_to_celsius(value);
    Ok(format!("{:.0}", celsius * SETPOINT_DIVISOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indoor_decoding() {
        assert!((indoor_celsius_from_wire("5200").unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((indoor_celsius_from_wire("7200").unwrap() - 22.0).abs() < f64::EPSILON);
        assert!((indoor_celsius_from_wire("4500").unwrap() + 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn target_decoding() {
        assert!((target_celsius_from_wire("220").unwrap() - 22.0).abs() < f64::EPSILON);
        assert!((target_celsius_from_wire("185").unwrap() - 18.5).abs() < f64::EPSILON);
    }

    #[test]
    fn non_numeric_wire_value() {
        assert!(matches!(
            target_celsius_from_wire("hot"),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn fahrenheit_snaps_to_nearest_entry() {
        let scale = TemperatureScale::Fahrenheit;
        assert!((scale.setpoint_to_celsius(72.0) - 22.0).abs() < f64::EPSILON);
        assert!((scale.setpoint_to_celsius(72.4) - 22.0).abs() < f64::EPSILON);
        assert!((scale.setpoint_to_celsius(72.6) - 22.5).abs() < f64::EPSILON);
        assert!((scale.setpoint_to_celsius(40.0) - 16.0).abs() < f64::EPSILON);
        assert!((scale.setpoint_to_celsius(100.0) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ties_resolve_to_first_entry() {
        // 72.5 is equidistant from 72 and 73.
        let celsius = TemperatureScale::Fahrenheit.setpoint_to_celsius(72.5);
        assert!((celsius - 22.0).abs() < f64::EPSILON);

        // 22.25 is equidistant from 22.0 and 22.5.
        let celsius = TemperatureScale::Celsius.setpoint_to_celsius(22.25);
        assert!((celsius - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn celsius_snaps_to_half_degrees() {
        let scale = TemperatureScale::Celsius;
        assert!((scale.setpoint_to_celsius(22.3) - 22.5).abs() < f64::EPSILON);
        assert!((scale.setpoint_to_celsius(10.0) - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn setpoint_from_celsius_uses_table() {
        let scale = TemperatureScale::Fahrenheit;
        assert!((scale.setpoint_from_celsius(22.0) - 72.0).abs() < f64::EPSILON);
        assert!((scale.setpoint_from_celsius(30.0) - 88.0).abs() < f64::EPSILON);
    }

    #[test]
    fn target_wire_encoding() {
        assert_eq!(target_wire_value(22.0, TemperatureScale::Celsius).unwrap(), "220");
        assert_eq!(target_wire_value(18.5, TemperatureScale::Celsius).unwrap(), "185");
        assert_eq!(target_wire_value(61.0, TemperatureScale::Fahrenheit).unwrap(), "165");
        assert!(matches!(
            target_wire_value(f64::NAN, TemperatureScale::Celsius),
            Err(ValueError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn scale_parsing() {
        assert_eq!("c".parse::<TemperatureScale>().unwrap(), TemperatureScale::Celsius);
        assert_eq!(
            "fahrenheit".parse::<TemperatureScale>().unwrap(),
            TemperatureScale::Fahrenheit
        );
        assert!("kelvin".parse::<TemperatureScale>().is_err());
    }
}
