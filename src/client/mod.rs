// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stateful client for the Airstage cloud API.
//!
//! [`Client`] is the single entry point. Every public operation runs as one
//! call chain:
//!
//! 1. Reads consult the [`ResponseCache`] first.
//! 2. If the access token has expired, the session is refreshed once.
//! 3. The request goes out through the [`Transport`].
//! 4. If the API rejects the token, the client signs in once and retries.
//! 5. Successful payloads are written through to the cache.
//! 6. Parameter writes poll the request status until the unit confirms.
//!
//! A chain performs at most one refresh and one sign-in, so a broken
//! credential set fails after two extra round trips instead of looping.
//!
//! # Examples
//!
//! ```no_run
//! use airstage_lib::{Client, Region};
//! use airstage_lib::types::{OperationMode, TemperatureScale};
//!
//! # async fn example() -> airstage_lib::Result<()> {
//! let client = Client::builder(Region::Europe)
//!     .with_credentials("user@example.com", "password")
//!     .build()?;
//!
//! let devices = client.get_devices(10, Default::default()).await?;
//! for device in &devices {
//!     println!("{}: {:?}", device.id(), client.get_name(device.id()).await?);
//! }
//!
//! if let Some(device) = devices.first() {
//!     client.set_operation_mode(device.id(), OperationMode::Cool).await?;
//!     client
//!         .set_target_temperature(device.id(), 72.0, TemperatureScale::Fahrenheit)
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

mod accessors;
mod auth;
#[cfg(feature = "http")]
mod builder;
mod read;
mod write;

#[cfg(test)]
mod mock;

#[cfg(feature = "http")]
pub use builder::ClientBuilder;

use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::cache::ResponseCache;
use crate::protocol::Transport;
use crate::session::{Credentials, SessionState};

/// Whether a read may be served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Serve from the cache when the entry is complete.
    #[default]
    UseCache,
    /// Always fetch from the API (the result is still written through).
    Bypass,
}

impl CachePolicy {
    const fn uses_cache(self) -> bool {
        matches!(self, Self::UseCache)
    }
}

/// Pacing of request-status polls after a parameter write.
///
/// The client sleeps `interval` between polls and gives up with
/// [`Error::PollTimeout`](crate::Error::PollTimeout) after `max_attempts`
/// polls that still report `waiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    max_attempts: u32,
}

impl PollPolicy {
    /// Default delay between polls.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
    /// Default number of polls.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

    /// Creates a policy. At least one poll is always made.
    #[must_use]
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the delay between polls.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the maximum number of polls.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Self::DEFAULT_MAX_ATTEMPTS)
    }
}

/// Client for one Airstage account.
///
/// The type parameter `T` is the transport; [`Client::builder`] creates a
/// client over [`HttpClient`](crate::protocol::HttpClient), and
/// [`Client::with_transport`] accepts any other [`Transport`].
///
/// Operations take `&self`. Session and cache are guarded internally but
/// operations on the same device are not serialized against each other;
/// await one before issuing a dependent one.
#[derive(Debug)]
pub struct Client<T: Transport> {
    transport: T,
    credentials: Option<Credentials>,
    session: RwLock<SessionState>,
    cache: RwLock<ResponseCache>,
    poll: PollPolicy,
}

impl<T: Transport> Client<T> {
    /// Creates a client over a custom transport.
    #[must_use]
    pub fn with_transport(transport: T, credentials: Option<Credentials>) -> Self {
        Self {
            transport,
            credentials,
            session: RwLock::new(SessionState::new()),
            cache: RwLock::new(ResponseCache::new()),
            poll: PollPolicy::default(),
        }
    }

    /// Sets the polling policy for parameter writes.
    #[must_use]
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the polling policy.
    #[must_use]
    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    // ========== Session ==========

    /// Returns the current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.session.read().access_token().map(str::to_owned)
    }

    /// Returns the expiry of the current access token.
    #[must_use]
    pub fn access_token_expiry(&self) -> Option<DateTime<Utc>> {
        self.session.read().access_token_expiry()
    }

    /// Returns the current refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.session.read().refresh_token().map(str::to_owned)
    }

    /// Returns a copy of the session state.
    #[must_use]
    pub fn session(&self) -> SessionState {
        self.session.read().clone()
    }

    /// Resumes a previously persisted session.
    pub fn restore_session(
        &self,
        access_token: impl Into<String>,
        expiry: DateTime<Utc>,
        refresh_token: impl Into<String>,
    ) {
        self.session
            .write()
            .update(access_token, expiry, refresh_token);
    }

    // ========== Cache ==========

    /// Clears the cached user metadata.
    pub fn reset_user_cache(&self) {
        tracing::debug!("Resetting user cache");
        self.cache.write().clear_user();
    }

    /// Clears one device's cached entries, or all devices for `None`.
    pub fn reset_device_cache(&self, device_id: Option<&str>) {
        tracing::debug!(device = ?device_id, "Resetting device cache");
        self.cache.write().clear_device(device_id);
    }

    /// Returns a copy of the response cache.
    #[must_use]
    pub fn cache(&self) -> ResponseCache {
        self.cache.read().clone()
    }
}
