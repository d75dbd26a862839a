// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached reads of devices and user metadata.

use serde_json::Value;

use crate::cache::DeviceEntry;
use crate::error::Result;
use crate::protocol::Transport;
use crate::response::{DevicePayload, Metadata, parse_device_list, parse_user_metadata};

use super::auth::{CallChain, Request};
use super::{CachePolicy, Client};

impl<T: Transport> Client<T> {
    /// Returns one device with its metadata and parameters.
    ///
    /// Served from the cache when both the device's metadata and parameters
    /// are cached, unless `policy` is [`CachePolicy::Bypass`].
    ///
    /// # Errors
    ///
    /// Returns error if the live fetch fails or its payload is malformed.
    pub async fn get_device(&self, device_id: &str, policy: CachePolicy) -> Result<DeviceEntry> {
        if policy.uses_cache() {
            let cached = self.cache.read().device(device_id);
            if let Some(entry) = cached {
                tracing::trace!(device = %device_id, "Device served from cache");
                return Ok(entry);
            }
        }

        let response = self
            .execute(&mut CallChain::new(), Request::Device(device_id))
            .await?;
        let payload = DevicePayload::from_value(response.body())?;

        let mut cache = self.cache.write();
        cache.store_device(payload);
        Ok(cache.device_or_empty(device_id))
    }

    /// Returns all devices, fetching up to `limit` on a cache miss.
    ///
    /// The list is a cache hit only when both metadata and parameter caches
    /// hold entries. Devices are returned ordered by id.
    ///
    /// # Errors
    ///
    /// Returns error if the live fetch fails or the body holds no device list.
    pub async fn get_devices(&self, limit: u32, policy: CachePolicy) -> Result<Vec<DeviceEntry>> {
        if policy.uses_cache() {
            let cached = self.cache.read().devices();
            if let Some(devices) = cached {
                tracing::trace!(count = devices.len(), "Devices served from cache");
                return Ok(devices);
            }
        }

        let response = self
            .execute(&mut CallChain::new(), Request::Devices { limit })
            .await?;
        let entries = parse_device_list(response.body())?;

        let mut cache = self.cache.write();
        for entry in entries {
            match entry {
                Ok(payload) => cache.store_device(payload),
                Err(e) => tracing::warn!(error = %e, "Skipping malformed device entry"),
            }
        }
        Ok(cache.all_devices())
    }

    /// Returns the signed-in user's metadata.
    ///
    /// # Errors
    ///
    /// Returns error if the live fetch fails or the body is not an object.
    pub async fn get_user_metadata(&self, policy: CachePolicy) -> Result<Metadata> {
        if policy.uses_cache() {
            let cached = self.cache.read().user();
            if let Some(user) = cached {
                tracing::trace!("User metadata served from cache");
                return Ok(user);
            }
        }

        let response = self
            .execute(&mut CallChain::new(), Request::User)
            .await?;
        let metadata = parse_user_metadata(response.body())?;

        let mut cache = self.cache.write();
        cache.replace_user(metadata);
        Ok(cache.user().unwrap_or_default())
    }

    /// Writes user metadata fields and merges them into the cache.
    ///
    /// # Errors
    ///
    /// Returns error if the update request fails.
    pub async fn update_user_metadata(&self, changes: Metadata) -> Result<Metadata> {
        let body: Value = changes
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect::<serde_json::Map<_, _>>()
            .into();

        self.execute(&mut CallChain::new(), Request::UpdateUser(&body))
            .await?;

        let mut cache = self.cache.write();
        cache.merge_user(changes);
        Ok(cache.user().unwrap_or_default())
    }

    /// Returns the device groups of the account, uncached.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn get_groups(&self) -> Result<Value> {
        let response = self
            .execute(&mut CallChain::new(), Request::Groups)
            .await?;
        Ok(response.into_body())
    }
}
