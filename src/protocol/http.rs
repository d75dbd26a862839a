// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the Airstage cloud API.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use secrecy::ExposeSecret;
use serde_json::{Value, json};

use crate::error::ProtocolError;
use crate::protocol::{ApiResponse, ParameterWrite, Transport};
use crate::session::Credentials;

// ============================================================================
// Region
// ============================================================================

/// Service region hosting the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// European service.
    #[default]
    Europe,
    /// North American service.
    NorthAmerica,
    /// Chinese service.
    China,
}

impl Region {
    /// Returns the API base URL for this region.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Europe => "https://bke.euro.airstagelight.com/apiv1",
            Self::NorthAmerica => "https://bke.us.airstagelight.com/apiv1",
            Self::China => "https://bke.cn.airstagelight.com/apiv1",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Europe => "eu",
            Self::NorthAmerica => "us",
            Self::China => "cn",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for the HTTP transport.
///
/// # Examples
///
/// ```
/// use airstage_lib::protocol::{HttpConfig, Region};
/// use std::time::Duration;
///
/// let config = HttpConfig::new(Region::NorthAmerica)
///     .with_country("US")
///     .with_language("en")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "https://bke.us.airstagelight.com/apiv1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    region: Region,
    base_url: Option<String>,
    country: String,
    language: String,
    timeout: Duration,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default country code sent at sign-in.
    pub const DEFAULT_COUNTRY: &'static str = "GB";
    /// Default language code sent at sign-in.
    pub const DEFAULT_LANGUAGE: &'static str = "en";

    /// Creates a configuration for the given region.
    #[must_use]
    pub fn new(region: Region) -> Self {
        Self {
            region,
            base_url: None,
            country: Self::DEFAULT_COUNTRY.to_string(),
            language: Self::DEFAULT_LANGUAGE.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the region's base URL (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the country code sent at sign-in.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Sets the language code sent at sign-in.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the region.
    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Returns the country code.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the effective base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.region.base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not HTTP(S) or the client cannot be
    /// created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let base_url = self.base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url,
            client,
            country: self.country,
            language: self.language,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new(Region::default())
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// reqwest-backed [`Transport`].
///
/// Answers are returned whatever their status; only failures to complete
/// the exchange become `ProtocolError`s.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    country: String,
    language: String,
}

impl HttpClient {
    /// Returns the base URL of the API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<ApiResponse, ProtocolError> {
        let response = builder.send().await.map_err(ProtocolError::Http)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(ProtocolError::Http)?;

        tracing::trace!(status, body = %text, "Received HTTP response");

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(ApiResponse::new(status, body))
    }
}

impl Transport for HttpClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<ApiResponse, ProtocolError> {
        let url = self.url("/users/sign_in");
        tracing::debug!(url = %url, email = %credentials.email(), "Signing in");

        let body = json!({
            "email": credentials.email(),
            "password": credentials.password().expose_secret(),
            "country": self.country,
            "language": self.language,
        });
        self.send(self.client.post(url).json(&body)).await
    }

    async fn refresh_token(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<ApiResponse, ProtocolError> {
        let url = self.url("/users/me/refresh_token");
        tracing::debug!(url = %url, "Refreshing access token");

        let body = json!({ "refreshToken": refresh_token });
        let builder = self.client.post(url).bearer_auth(access_token);
        self.send(builder.json(&body)).await
    }

    async fn get_user(&self, access_token: &str) -> Result<ApiResponse, ProtocolError> {
        let url = self.url("/users/me");
        tracing::debug!(url = %url, "Fetching user metadata");
        self.send(self.client.get(url).bearer_auth(access_token))
            .await
    }

    async fn put_user(
        &self,
        access_token: &str,
        changes: &Value,
    ) -> Result<ApiResponse, ProtocolError> {
        let url = self.url("/users/me");
        tracing::debug!(url = %url, "Updating user metadata");
        let builder = self.client.put(url).bearer_auth(access_token);
        self.send(builder.json(changes)).await
    }

    async fn list_devices(
        &self,
        access_token: &str,
        limit: u32,
    ) -> Result<ApiResponse, ProtocolError> {
        let url = self.url(&format!("/devices?limit={limit}"));
        tracing::debug!(url = %url, "Listing devices");
        self.send(self.client.get(url).bearer_auth(access_token))
            .await
    }

    async fn get_device(
        &self,
        access_token: &str,
        device_id: &str,
    ) -> Result<ApiResponse, ProtocolError> {
        let url = self.url(&format!("/devices/{}", urlencoding::encode(device_id)));
        tracing::debug!(url = %url, "Fetching device");
        self.send(self.client.get(url).bearer_auth(access_token))
            .await
    }

    async fn set_parameters(
        &self,
        access_token: &str,
        device_id: &str,
        device_sub_id: u8,
        parameters: &[ParameterWrite],
    ) -> Result<ApiResponse, ProtocolError> {
        let url = self.url(&format!(
            "/devices/{}/set_parameters_request",
            urlencoding::encode(device_id)
        ));
        tracing::debug!(url = %url, count = parameters.len(), "Submitting parameter write");

        let body = json!({
            "deviceSubId": device_sub_id,
            "parameters": parameters,
        });
        let builder = self.client.post(url).bearer_auth(access_token);
        self.send(builder.json(&body)).await
    }

    async fn get_request_status(
        &self,
        access_token: &str,
        request_id: &str,
    ) -> Result<ApiResponse, ProtocolError> {
        let url = self.url(&format!(
            "/devices/requests/{}",
            urlencoding::encode(request_id)
        ));
        tracing::trace!(url = %url, "Polling request status");
        self.send(self.client.get(url).bearer_auth(access_token))
            .await
    }

    async fn list_groups(&self, access_token: &str) -> Result<ApiResponse, ProtocolError> {
        let url = self.url("/groups");
        tracing::debug!(url = %url, "Listing groups");
        self.send(self.client.get(url).bearer_auth(access_token))
            .await
    }
}
