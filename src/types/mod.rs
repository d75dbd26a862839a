// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types and their wire encodings.
//!
//! Each type maps a user-facing value to the string the API transmits and
//! back. The mappings are pure; decoding a wire value outside a type's
//! domain yields `None` (or an error for numeric values).
//!
//! # Types
//!
//! - [`Toggle`] - On/Off switches (power, swing, powerful, economy, fan control)
//! - [`OperationMode`] - Auto/Cool/Dry/Fan/Heat
//! - [`FanSpeed`] - Auto/Quiet/Low/Medium/High
//! - [`TemperatureScale`] - Celsius/Fahrenheit with setpoint snapping
//! - [`VerticalDirection`] - Louver position (1-4), clamped
//! - [`Parameter`] - API names of the device parameters

mod airflow;
mod mode;
mod parameter;
mod temperature;
mod toggle;

pub use airflow::VerticalDirection;
pub use mode::{FanSpeed, OperationMode};
pub use parameter::{CONNECTION_STATUS_FIELD, DEVICE_NAME_FIELD, Parameter};
pub use temperature::{
    SETPOINTS, Setpoint, TemperatureScale, indoor_celsius_from_wire, target_celsius_from_wire,
    target_wire_value,
};
pub use toggle::Toggle;
