// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed getters and setters for device parameters.
//!
//! Getters read the device cache-first and decode one field. Setters encode
//! the value, write it, and decode the confirmed value from the device the
//! write returned. A value the device reports as unavailable is `None`.

use crate::cache::DeviceEntry;
use crate::error::{Error, ParseError, Result};
use crate::protocol::Transport;
use crate::types::{
    CONNECTION_STATUS_FIELD, DEVICE_NAME_FIELD, FanSpeed, OperationMode, Parameter,
    TemperatureScale, Toggle, VerticalDirection, indoor_celsius_from_wire,
    target_celsius_from_wire, target_wire_value,
};

use super::{CachePolicy, Client};

/// Decodes a parameter of the entry, `None` when it is unavailable.
fn decode<V>(
    entry: &DeviceEntry,
    parameter: Parameter,
    decoder: impl FnOnce(&str) -> std::result::Result<V, ParseError>,
) -> Result<Option<V>> {
    Ok(entry.parameter(parameter.as_str()).map(decoder).transpose()?)
}

/// Adapts an `Option`-returning wire decoder to a `ParseError` one.
fn known<V>(
    parameter: Parameter,
    from_wire: impl FnOnce(&str) -> Option<V>,
) -> impl FnOnce(&str) -> std::result::Result<V, ParseError> {
    move |wire: &str| {
        from_wire(wire).ok_or_else(|| ParseError::InvalidValue {
            field: parameter.as_str().to_string(),
            message: format!("unknown wire value {wire:?}"),
        })
    }
}

fn toggle(entry: &DeviceEntry, parameter: Parameter) -> Result<Option<Toggle>> {
    decode(entry, parameter, known(parameter, Toggle::from_wire))
}

fn indoor(entry: &DeviceEntry, scale: TemperatureScale) -> Result<Option<f64>> {
    let celsius = decode(entry, Parameter::IndoorTemperature, indoor_celsius_from_wire)?;
    Ok(celsius.map(|c| scale.from_celsius(c)))
}

fn target(entry: &DeviceEntry, scale: TemperatureScale) -> Result<Option<f64>> {
    let celsius = decode(entry, Parameter::TargetTemperature, target_celsius_from_wire)?;
    Ok(celsius.map(|c| scale.setpoint_from_celsius(c)))
}

impl<T: Transport> Client<T> {
    async fn cached(&self, device_id: &str) -> Result<DeviceEntry> {
        self.get_device(device_id, CachePolicy::UseCache).await
    }

    async fn toggle_state(&self, device_id: &str, parameter: Parameter) -> Result<Option<Toggle>> {
        toggle(&self.cached(device_id).await?, parameter)
    }

    async fn set_toggle(
        &self,
        device_id: &str,
        parameter: Parameter,
        state: Toggle,
    ) -> Result<Option<Toggle>> {
        let entry = self
            .set_parameter(device_id, parameter, state.wire_value())
            .await?;
        toggle(&entry, parameter)
    }

    // ========== Power ==========

    /// Returns whether the unit is switched on.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read or reports an unknown value.
    pub async fn get_power_state(&self, device_id: &str) -> Result<Option<Toggle>> {
        self.toggle_state(device_id, Parameter::Power).await
    }

    /// Switches the unit on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails or is not confirmed in time.
    pub async fn set_power_state(&self, device_id: &str, state: Toggle) -> Result<Option<Toggle>> {
        self.set_toggle(device_id, Parameter::Power, state).await
    }

    /// Switches the unit on.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails or is not confirmed in time.
    pub async fn power_on(&self, device_id: &str) -> Result<Option<Toggle>> {
        self.set_power_state(device_id, Toggle::On).await
    }

    /// Switches the unit off.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails or is not confirmed in time.
    pub async fn power_off(&self, device_id: &str) -> Result<Option<Toggle>> {
        self.set_power_state(device_id, Toggle::Off).await
    }

    // ========== Mode and fan ==========

    /// Returns the operating mode.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read or reports an unknown mode.
    pub async fn get_operation_mode(&self, device_id: &str) -> Result<Option<OperationMode>> {
        let entry = self.cached(device_id).await?;
        decode(
            &entry,
            Parameter::OperationMode,
            known(Parameter::OperationMode, OperationMode::from_wire),
        )
    }

    /// Sets the operating mode.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails or is not confirmed in time.
    pub async fn set_operation_mode(
        &self,
        device_id: &str,
        mode: OperationMode,
    ) -> Result<Option<OperationMode>> {
        let entry = self
            .set_parameter(device_id, Parameter::OperationMode, mode.wire_value())
            .await?;
        decode(
            &entry,
            Parameter::OperationMode,
            known(Parameter::OperationMode, OperationMode::from_wire),
        )
    }

    /// Returns the fan speed.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read or reports an unknown speed.
    pub async fn get_fan_speed(&self, device_id: &str) -> Result<Option<FanSpeed>> {
        let entry = self.cached(device_id).await?;
        decode(
            &entry,
            Parameter::FanSpeed,
            known(Parameter::FanSpeed, FanSpeed::from_wire),
        )
    }

    /// Sets the fan speed.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails or is not confirmed in time.
    pub async fn set_fan_speed(&self, device_id: &str, speed: FanSpeed) -> Result<Option<FanSpeed>> {
        let entry = self
            .set_parameter(device_id, Parameter::FanSpeed, speed.wire_value())
            .await?;
        decode(
            &entry,
            Parameter::FanSpeed,
            known(Parameter::FanSpeed, FanSpeed::from_wire),
        )
    }

    // ========== Temperature ==========

    /// Returns the indoor temperature in `scale`.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read or the reading is not numeric.
    pub async fn get_indoor_temperature(
        &self,
        device_id: &str,
        scale: TemperatureScale,
    ) -> Result<Option<f64>> {
        indoor(&self.cached(device_id).await?, scale)
    }

    /// Returns the target temperature in `scale`.
    ///
    /// Fahrenheit values come from the setpoint table, so they are whole
    /// degrees.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read or the setpoint is not numeric.
    pub async fn get_target_temperature(
        &self,
        device_id: &str,
        scale: TemperatureScale,
    ) -> Result<Option<f64>> {
        target(&self.cached(device_id).await?, scale)
    }

    /// Sets the target temperature, snapped to the nearest valid setpoint.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for a non-finite temperature, or error if the
    /// write fails or is not confirmed in time.
    pub async fn set_target_temperature(
        &self,
        device_id: &str,
        value: f64,
        scale: TemperatureScale,
    ) -> Result<Option<f64>> {
        let wire = target_wire_value(value, scale)?;
        let entry = self
            .set_parameter(device_id, Parameter::TargetTemperature, wire)
            .await?;
        target(&entry, scale)
    }

    /// Returns indoor minus target temperature in `scale`.
    ///
    /// Both readings are converted with the exact formula, so equal Celsius
    /// readings give a zero delta in either scale. The setpoint table used by
    /// [`get_target_temperature`](Self::get_target_temperature) does not
    /// apply here.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingValue` if either temperature is unavailable.
    pub async fn get_temperature_delta(
        &self,
        device_id: &str,
        scale: TemperatureScale,
    ) -> Result<f64> {
        let entry = self.cached(device_id).await?;
        let celsius = TemperatureScale::Celsius;
        let indoor = indoor(&entry, celsius)?.ok_or(Error::MissingValue("indoor temperature"))?;
        let target = decode(&entry, Parameter::TargetTemperature, target_celsius_from_wire)?
            .ok_or(Error::MissingValue("target temperature"))?;
        Ok(scale.from_celsius(indoor) - scale.from_celsius(target))
    }

    // ========== Airflow ==========

    /// Returns the vertical louver position.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read or the position is not numeric.
    pub async fn get_airflow_vertical_direction(
        &self,
        device_id: &str,
    ) -> Result<Option<VerticalDirection>> {
        let entry = self.cached(device_id).await?;
        decode(
            &entry,
            Parameter::AirflowVerticalDirection,
            VerticalDirection::from_wire,
        )
    }

    /// Sets the vertical louver position, clamped to `1..=4`.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails or is not confirmed in time.
    pub async fn set_airflow_vertical_direction(
        &self,
        device_id: &str,
        position: i64,
    ) -> Result<Option<VerticalDirection>> {
        let direction = VerticalDirection::clamped(position);
        let entry = self
            .set_parameter(
                device_id,
                Parameter::AirflowVerticalDirection,
                direction.wire_value(),
            )
            .await?;
        decode(
            &entry,
            Parameter::AirflowVerticalDirection,
            VerticalDirection::from_wire,
        )
    }

    /// Returns whether the vertical louver swings.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read or reports an unknown value.
    pub async fn get_airflow_vertical_swing_state(&self, device_id: &str) -> Result<Option<Toggle>> {
        self.toggle_state(device_id, Parameter::AirflowVerticalSwing)
            .await
    }

    /// Turns vertical swing on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails or is not confirmed in time.
    pub async fn set_airflow_vertical_swing_state(
        &self,
        device_id: &str,
        state: Toggle,
    ) -> Result<Option<Toggle>> {
        self.set_toggle(device_id, Parameter::AirflowVerticalSwing, state)
            .await
    }

    // ========== Special modes ==========

    /// Returns whether powerful mode is on.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read or reports an unknown value.
    pub async fn get_powerful_state(&self, device_id: &str) -> Result<Option<Toggle>> {
        self.toggle_state(device_id, Parameter::Powerful).await
    }

    /// Turns powerful mode on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails or is not confirmed in time.
    pub async fn set_powerful_state(&self, device_id: &str, state: Toggle) -> Result<Option<Toggle>> {
        self.set_toggle(device_id, Parameter::Powerful, state).await
    }

    /// Returns whether economy mode is on.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read or reports an unknown value.
    pub async fn get_economy_state(&self, device_id: &str) -> Result<Option<Toggle>> {
        self.toggle_state(device_id, Parameter::Economy).await
    }

    /// Turns economy mode on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails or is not confirmed in time.
    pub async fn set_economy_state(&self, device_id: &str, state: Toggle) -> Result<Option<Toggle>> {
        self.set_toggle(device_id, Parameter::Economy, state).await
    }

    /// Returns whether energy-saving fan control is on.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read or reports an unknown value.
    pub async fn get_energy_saving_fan_state(&self, device_id: &str) -> Result<Option<Toggle>> {
        self.toggle_state(device_id, Parameter::EnergySavingFan)
            .await
    }

    /// Turns energy-saving fan control on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails or is not confirmed in time.
    pub async fn set_energy_saving_fan_state(
        &self,
        device_id: &str,
        state: Toggle,
    ) -> Result<Option<Toggle>> {
        self.set_toggle(device_id, Parameter::EnergySavingFan, state)
            .await
    }

    // ========== Metadata ==========

    /// Returns the user-assigned device name.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read.
    pub async fn get_name(&self, device_id: &str) -> Result<Option<String>> {
        let entry = self.cached(device_id).await?;
        Ok(entry.metadata_value(DEVICE_NAME_FIELD).map(str::to_owned))
    }

    /// Returns the cloud connection status, e.g. `Online`.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be read.
    pub async fn get_connection_status(&self, device_id: &str) -> Result<Option<String>> {
        let entry = self.cached(device_id).await?;
        Ok(entry
            .metadata_value(CONNECTION_STATUS_FIELD)
            .map(str::to_owned))
    }
}
