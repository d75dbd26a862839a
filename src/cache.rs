// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory cache of user and device responses.
//!
//! The cache holds three maps: user metadata, per-device metadata and
//! per-device parameters. Entries are opportunistic; a miss is never an
//! error, only a reason to fetch. Entries are always replaced whole.

use std::collections::BTreeMap;

use crate::response::{DevicePayload, Metadata, Parameters};

/// Snapshot of one cached device.
///
/// # Examples
///
/// ```
/// use airstage_lib::cache::ResponseCache;
/// use airstage_lib::response::DevicePayload;
///
/// let mut cache = ResponseCache::new();
/// let payload = DevicePayload::from_value(&serde_json::json!({
///     "deviceId": "a",
///     "deviceName": "Hall",
///     "parameters": [{"name": "iu_onoff", "value": "1"}]
/// }))
/// .unwrap();
/// cache.store_device(payload);
///
/// let entry = cache.device("a").unwrap();
/// assert_eq!(entry.metadata_value("deviceName"), Some("Hall"));
/// assert_eq!(entry.parameter("iu_onoff"), Some("1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceEntry {
    id: String,
    metadata: Metadata,
    parameters: Parameters,
}

impl DeviceEntry {
    /// Returns the device identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns all metadata fields.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns all parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns one metadata field.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Returns one parameter's wire value.
    ///
    /// `None` covers both an absent parameter and one the device reports as
    /// unavailable.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).and_then(Option::as_deref)
    }
}

/// Cache of responses for one signed-in user.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    user: Metadata,
    device_metadata: BTreeMap<String, Metadata>,
    device_parameters: BTreeMap<String, Parameters>,
}

impl ResponseCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== User ==========

    /// Returns the user metadata, or `None` if nothing is cached.
    #[must_use]
    pub fn user(&self) -> Option<Metadata> {
        (!self.user.is_empty()).then(|| self.user.clone())
    }

    /// Replaces the user metadata.
    pub fn replace_user(&mut self, metadata: Metadata) {
        self.user = metadata;
    }

    /// Merges written fields into the user metadata.
    pub fn merge_user(&mut self, changes: Metadata) {
        self.user.extend(changes);
    }

    /// Clears the user metadata.
    pub fn clear_user(&mut self) {
        self.user.clear();
    }

    // ========== Devices ==========

    /// Returns the device if both its metadata and parameters are cached.
    #[must_use]
    pub fn device(&self, id: &str) -> Option<DeviceEntry> {
        let metadata = self.device_metadata.get(id)?;
        let parameters = self.device_parameters.get(id)?;
        Some(DeviceEntry {
            id: id.to_string(),
            metadata: metadata.clone(),
            parameters: parameters.clone(),
        })
    }

    /// Returns whatever is cached for the device, possibly nothing.
    #[must_use]
    pub fn device_or_empty(&self, id: &str) -> DeviceEntry {
        DeviceEntry {
            id: id.to_string(),
            metadata: self.device_metadata.get(id).cloned().unwrap_or_default(),
            parameters: self.device_parameters.get(id).cloned().unwrap_or_default(),
        }
    }

    /// Returns all devices if both metadata and parameter caches are populated.
    #[must_use]
    pub fn devices(&self) -> Option<Vec<DeviceEntry>> {
        if self.device_metadata.is_empty() || self.device_parameters.is_empty() {
            return None;
        }
        Some(self.all_devices())
    }

    /// Returns every device with cached metadata, ordered by id.
    #[must_use]
    pub fn all_devices(&self) -> Vec<DeviceEntry> {
        self.device_metadata
            .keys()
            .map(|id| self.device_or_empty(id))
            .collect()
    }

    /// Writes a device payload through to the cache.
    ///
    /// Metadata is always replaced. Parameters are replaced only if the
    /// payload carried a parameter list.
    pub fn store_device(&mut self, payload: DevicePayload) {
        let DevicePayload {
            device_id,
            metadata,
            parameters,
        } = payload;

        if let Some(parameters) = parameters {
            self.device_parameters.insert(device_id.clone(), parameters);
        }
        self.device_metadata.insert(device_id, metadata);
    }

    /// Clears one device, or every device when `id` is `None`.
    pub fn clear_device(&mut self, id: Option<&str>) {
        match id {
            Some(id) => {
                self.device_metadata.remove(id);
                self.device_parameters.remove(id);
            }
            None => {
                self.device_metadata.clear();
                self.device_parameters.clear();
            }
        }
    }
}
