// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Names of device parameters and metadata fields.

use std::fmt;

/// A controllable or reported device parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Power switch ([`Toggle`](super::Toggle)).
    Power,
    /// Operating mode ([`OperationMode`](super::OperationMode)).
    OperationMode,
    /// Fan speed ([`FanSpeed`](super::FanSpeed)).
    FanSpeed,
    /// Indoor temperature reading (read-only).
    IndoorTemperature,
    /// Target temperature setpoint.
    TargetTemperature,
    /// Vertical louver position ([`VerticalDirection`](super::VerticalDirection)).
    AirflowVerticalDirection,
    /// Vertical louver swing ([`Toggle`](super::Toggle)).
    AirflowVerticalSwing,
    /// Powerful mode ([`Toggle`](super::Toggle)).
    Powerful,
    /// Economy mode ([`Toggle`](super::Toggle)).
    Economy,
    /// Energy-saving fan control ([`Toggle`](super::Toggle)).
    EnergySavingFan,
}

impl Parameter {
    /// Returns the parameter name used by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "iu_onoff",
            Self::OperationMode => "iu_op_mode",
            Self::FanSpeed => "iu_fan_spd",
            Self::IndoorTemperature => "iu_indoor_tmp",
            Self::TargetTemperature => "iu_set_tmp",
            Self::AirflowVerticalDirection => "iu_af_dir_vrt",
            Self::AirflowVerticalSwing => "iu_af_swg_vrt",
            Self::Powerful => "iu_powerful",
            Self::Economy => "iu_economy",
            Self::EnergySavingFan => "iu_fan_ctrl",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata field holding the user-assigned device name.
pub const DEVICE_NAME_FIELD: &str = "deviceName";

/// Metadata field holding the cloud connection status.
pub const CONNECTION_STATUS_FIELD: &str = "connectionStatus";
