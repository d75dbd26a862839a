// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device and user payload parsing.
//!
//! Devices are reported as JSON objects whose scalar fields are metadata
//! (name, connection status, model) and whose `parameters` array holds the
//! controllable values:
//!
//! ```json
//! {
//!   "deviceId": "E8FF0001",
//!   "deviceName": "Living room",
//!   "connectionStatus": "Online",
//!   "parameters": [
//!     {"name": "iu_onoff", "value": "1"},
//!     {"name": "iu_indoor_tmp", "value": null}
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::error::ParseError;

/// Metadata key → value.
pub type Metadata = HashMap<String, String>;

/// Parameter name → wire value (`None` when not available).
pub type Parameters = HashMap<String, Option<String>>;

/// Field holding the device identifier.
pub const DEVICE_ID_FIELD: &str = "deviceId";

/// Field holding the parameter list.
pub const PARAMETERS_FIELD: &str = "parameters";

/// A device as reported by the API, split into metadata and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePayload {
    /// Device identifier.
    pub device_id: String,
    /// Descriptive fields.
    pub metadata: Metadata,
    /// Parameter values, or `None` if the payload carried no parameter list.
    pub parameters: Option<Parameters>,
}

impl DevicePayload {
    /// Parses a device object.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the value is not an object, has no device id,
    /// or has a malformed parameter list.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let object = value.as_object().ok_or_else(|| {
            ParseError::UnexpectedFormat(format!("device payload is not an object: {value}"))
        })?;

        let device_id = object
            .get(DEVICE_ID_FIELD)
            .and_then(scalar_to_string)
            .ok_or_else(|| ParseError::MissingField(DEVICE_ID_FIELD.to_string()))?;

        let metadata = object
            .iter()
            .filter(|(key, _)| key.as_str() != PARAMETERS_FIELD)
            .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key.clone(), v)))
            .collect();

        let parameters = object
            .get(PARAMETERS_FIELD)
            .map(parse_parameters)
            .transpose()?;

        Ok(Self {
            device_id,
            metadata,
            parameters,
        })
    }
}

fn parse_parameters(value: &Value) -> Result<Parameters, ParseError> {
    let entries = value.as_array().ok_or_else(|| ParseError::InvalidValue {
        field: PARAMETERS_FIELD.to_string(),
        message: "expected an array".to_string(),
    })?;

    entries
        .iter()
        .map(|entry| {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| ParseError::MissingField("parameters[].name".to_string()))?;
            let value = entry.get("value").and_then(scalar_to_string);
            Ok((name.to_string(), value))
        })
        .collect()
}

/// Splits a device list body into per-device parse results.
///
/// Accepts either `{"devices": [...]}` or a bare array. Entries are parsed
/// independently so one malformed device does not discard the others.
///
/// # Errors
///
/// Returns `ParseError` if the body holds no device array at all.
pub fn parse_device_list(body: &Value) -> Result<Vec<Result<DevicePayload, ParseError>>, ParseError> {
    let entries = body
        .get("devices")
        .unwrap_or(body)
        .as_array()
        .ok_or_else(|| ParseError::MissingField("devices".to_string()))?;

    Ok(entries.iter().map(DevicePayload::from_value).collect())
}

/// Parses a user object into flat metadata.
///
/// # Errors
///
/// Returns `ParseError::UnexpectedFormat` if the body is not an object.
pub fn parse_user_metadata(body: &Value) -> Result<Metadata, ParseError> {
    let object = body.as_object().ok_or_else(|| {
        ParseError::UnexpectedFormat(format!("user payload is not an object: {body}"))
    })?;

    Ok(object
        .iter()
        .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key.clone(), v)))
        .collect())
}

/// Renders a JSON value as a metadata string. `null` has no rendering.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
