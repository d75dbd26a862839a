// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical airflow direction.

use std::fmt;

use crate::error::ParseError;

/// Vertical louver position (1-4).
///
/// Unlike the other codecs, out-of-range values are clamped rather than
/// rejected, both when decoding device reports and when encoding writes.
///
/// # Examples
///
/// ```
/// use airstage_lib::types::VerticalDirection;
///
/// assert_eq!(VerticalDirection::clamped(0).value(), 1);
/// assert_eq!(VerticalDirection::clamped(9).value(), 4);
/// assert_eq!(VerticalDirection::clamped(3).wire_value(), "3");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct VerticalDirection(u8);

impl VerticalDirection {
    /// Smallest position value, louver pointing to the top.
    pub const MIN: u8 = 1;

    /// Largest position value, louver pointing to the bottom.
    pub const MAX: u8 = 4;

    /// Creates a direction, clamping to `[MIN, MAX]`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(clamped).unwrap_or(Self::MIN))
    }

    /// Returns the position.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value sent to the API.
    #[must_use]
    pub fn wire_value(&self) -> String {
        self.0.to_string()
    }

    /// Decodes a device report, clamping out-of-range positions.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if the wire value is not an integer.
    pub fn from_wire(wire: &str) -> Result<Self, ParseError> {
        wire.trim()
            .parse::<i64>()
            .map(Self::clamped)
            .map_err(|e| ParseError::InvalidValue {
                field: "airflow vertical direction".to_string(),
                message: format!("{wire:?}: {e}"),
            })
    }
}

impl fmt::Display for VerticalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for VerticalDirection {
    fn from(value: u8) -> Self {
        Self::clamped(i64::from(value))
    }
}
