// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client builder.

use std::time::Duration;

use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig, Region};
use crate::session::Credentials;

use super::{Client, PollPolicy};

impl Client<HttpClient> {
    /// Starts building a client for the given region.
    #[must_use]
    pub fn builder(region: Region) -> ClientBuilder {
        ClientBuilder::new(HttpConfig::new(region))
    }
}

/// Builder for clients talking to the Airstage cloud over HTTPS.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use airstage_lib::{Client, PollPolicy, Region};
///
/// # fn example() -> airstage_lib::Result<()> {
/// // Sign in on first use
/// let client = Client::builder(Region::Europe)
///     .with_credentials("user@example.com", "password")
///     .build()?;
///
/// // Regional settings and slower polling
/// let client = Client::builder(Region::NorthAmerica)
///     .with_credentials("user@example.com", "password")
///     .with_country("US")
///     .with_poll_policy(PollPolicy::new(Duration::from_secs(2), 15))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    config: HttpConfig,
    credentials: Option<Credentials>,
    poll: PollPolicy,
}

impl ClientBuilder {
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self {
            config,
            credentials: None,
            poll: PollPolicy::default(),
        }
    }

    /// Sets the account used to sign in.
    ///
    /// Without credentials the client can only use a session restored with
    /// [`Client::restore_session`].
    #[must_use]
    pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(email, password));
        self
    }

    /// Overrides the regional API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Sets the country code sent when signing in.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.config = self.config.with_country(country);
        self
    }

    /// Sets the language code sent when signing in.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.config = self.config.with_language(language);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Replaces the whole HTTP configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets how parameter writes are polled for completion.
    #[must_use]
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Returns the HTTP configuration.
    #[must_use]
    pub fn http_config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the client. No request is made until the first operation.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// created.
    pub fn build(self) -> Result<Client<HttpClient>, Error> {
        let transport = self.config.into_client().map_err(Error::Protocol)?;
        Ok(Client::with_transport(transport, self.credentials).with_poll_policy(self.poll))
    }
}
