// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operation mode and fan speed values.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode of the indoor unit.
///
/// # Examples
///
/// ```
/// use airstage_lib::types::OperationMode;
///
/// assert_eq!(OperationMode::Heat.wire_value(), "4");
/// assert_eq!(OperationMode::from_wire("1"), Some(OperationMode::Cool));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OperationMode {
    /// Automatic heat/cool selection.
    Auto,
    /// Cooling.
    Cool,
    /// Dehumidifying.
    Dry,
    /// Fan only.
    Fan,
    /// Heating.
    Heat,
}

impl OperationMode {
    /// All modes, in wire order.
    pub const ALL: [Self; 5] = [Self::Auto, Self::Cool, Self::Dry, Self::Fan, Self::Heat];

    /// Returns the user-facing name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Cool => "COOL",
            Self::Dry => "DRY",
            Self::Fan => "FAN",
            Self::Heat => "HEAT",
        }
    }

    /// Returns the value sent to the API.
    #[must_use]
    pub const fn wire_value(&self) -> &'static str {
        match self {
            Self::Auto => "0",
            Self::Cool => "1",
            Self::Dry => "2",
            Self::Fan => "3",
            Self::Heat => "4",
        }
    }

    /// Decodes a wire value, returning `None` outside the domain.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.wire_value() == value)
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == upper)
            .ok_or_else(|| ValueError::InvalidOperationMode(s.to_string()))
    }
}

/// Fan speed of the indoor unit.
///
/// The API uses sparse wire values, so the variants are not contiguous on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FanSpeed {
    /// Speed chosen by the unit.
    Auto,
    /// Quiet.
    Quiet,
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
}

impl FanSpeed {
    /// All speeds, slowest automatic first.
    pub const ALL: [Self; 5] = [Self::Auto, Self::Quiet, Self::Low, Self::Medium, Self::High];

    /// Returns the user-facing name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Quiet => "QUIET",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Returns the value sent to the API.
    #[must_use]
    pub const fn wire_value(&self) -> &'static str {
        match self {
            Self::Auto => "0",
            Self::Quiet => "2",
            Self::Low => "5",
            Self::Medium => "8",
            Self::High => "11",
        }
    }

    /// Decodes a wire value, returning `None` outside the domain.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|speed| speed.wire_value() == value)
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|speed| speed.as_str() == upper)
            .ok_or_else(|| ValueError::InvalidFanSpeed(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_mode_wire_round_trip() {
        for mode in OperationMode::ALL {
            assert_eq!(OperationMode::from_wire(mode.wire_value()), Some(mode));
        }
    }

    #[test]
    fn fan_speed_wire_round_trip() {
        for speed in FanSpeed::ALL {
            assert_eq!(FanSpeed::from_wire(speed.wire_value()), Some(speed));
        }
    }

    #[test]
    fn unknown_wire_values() {
        assert_eq!(OperationMode::from_wire("5"), None);
        assert_eq!(FanSpeed::from_wire("3"), None);
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("cool".parse::<OperationMode>().unwrap(), OperationMode::Cool);
        assert_eq!("Quiet".parse::<FanSpeed>().unwrap(), FanSpeed::Quiet);
        assert!(matches!(
            "turbo".parse::<FanSpeed>(),
            Err(ValueError::InvalidFanSpeed(_))
        ));
    }

    #[test]
    fn display_uses_names() {
        assert_eq!(OperationMode::Dry.to_string(), "DRY");
        assert_eq!(FanSpeed::Medium.to_string(), "MEDIUM");
    }
}
