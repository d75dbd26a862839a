// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off switch values.
//!
//! Power, swing, powerful, economy and energy-saving fan parameters all
//! share this representation.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// An on/off state of a switchable device function.
///
/// # Examples
///
/// ```
/// use airstage_lib::types::Toggle;
///
/// assert_eq!(Toggle::On.wire_value(), "1");
/// assert_eq!(Toggle::from_wire("0"), Some(Toggle::Off));
/// assert_eq!("on".parse::<Toggle>().unwrap(), Toggle::On);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Toggle {
    /// Function is off.
    Off,
    /// Function is on.
    On,
}

impl Toggle {
    /// Returns the user-facing name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns the value sent to the API.
    #[must_use]
    pub const fn wire_value(&self) -> &'static str {
        match self {
            Self::Off => "0",
            Self::On => "1",
        }
    }

    /// Decodes a wire value, returning `None` outside the domain.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "0" => Some(Self::Off),
            "1" => Some(Self::On),
            _ => None,
        }
    }

    /// Returns `true` for [`Toggle::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Toggle {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" | "0" | "FALSE" => Ok(Self::Off),
            "ON" | "1" | "TRUE" => Ok(Self::On),
            _ => Err(ValueError::InvalidToggle(s.to_string())),
        }
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        for toggle in [Toggle::On, Toggle::Off] {
            assert_eq!(Toggle::from_wire(toggle.wire_value()), Some(toggle));
        }
    }

    #[test]
    fn from_wire_outside_domain() {
        assert_eq!(Toggle::from_wire("2"), None);
        assert_eq!(Toggle::from_wire("ON"), None);
    }

    #[test]
    fn from_str_accepts_aliases() {
        assert_eq!("ON".parse::<Toggle>().unwrap(), Toggle::On);
        assert_eq!("off".parse::<Toggle>().unwrap(), Toggle::Off);
        assert_eq!("true".parse::<Toggle>().unwrap(), Toggle::On);
        assert!(matches!(
            "maybe".parse::<Toggle>(),
            Err(ValueError::InvalidToggle(_))
        ));
    }

    #[test]
    fn from_bool() {
        assert_eq!(Toggle::from(true), Toggle::On);
        assert!(!Toggle::from(false).is_on());
    }
}
