// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for the Airstage cloud API.
//!
//! The [`Transport`] trait exposes one method per remote endpoint and
//! returns every answer in the same shape, an [`ApiResponse`] carrying the
//! HTTP status and the decoded JSON body. Transports never retry, refresh
//! tokens or cache anything; that policy lives in [`Client`](crate::Client).
//!
//! [`HttpClient`] is the reqwest implementation.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig, Region};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ParseError, ProtocolError};
use crate::session::Credentials;

/// HTTP status the API uses to reject an access token.
pub const FORBIDDEN_STATUS: u16 = 403;

/// Message code the API uses to flag an invalid or revoked token.
pub const INVALID_TOKEN_MESSAGE_CODE: &str = "INVALID_TOKEN";

/// Uniform result of a transport call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: u16,
    body: Value,
}

impl ApiResponse {
    /// Creates a response from a status code and decoded body.
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the decoded body.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consumes the response, returning the body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the API message code, if the body carries one.
    #[must_use]
    pub fn message_code(&self) -> Option<&str> {
        self.body.get("messageCode").and_then(Value::as_str)
    }

    /// Returns `true` if the API rejected the access token.
    #[must_use]
    pub fn is_invalid_token(&self) -> bool {
        self.status == FORBIDDEN_STATUS
            || self.message_code() == Some(INVALID_TOKEN_MESSAGE_CODE)
    }

    /// Parses the body as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the body cannot be decoded into the target type.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        T::deserialize(&self.body).map_err(Into::into)
    }

    /// Short description of a failed response for error messages.
    #[must_use]
    pub fn failure_message(&self) -> String {
        if let Some(code) = self.message_code() {
            return code.to_string();
        }
        match &self.body {
            Value::Null => String::from("empty response"),
            Value::String(text) => text.chars().take(200).collect(),
            other => other.to_string().chars().take(200).collect(),
        }
    }
}

/// A single parameter assignment in a write request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterWrite {
    /// Parameter name, e.g. `iu_onoff`.
    pub name: String,
    /// Wire-encoded value.
    pub value: String,
}

impl ParameterWrite {
    /// Creates a parameter assignment.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Trait for transports that can reach the remote API.
///
/// Every method maps to one endpoint. Authorized endpoints take the current
/// access token; the caller decides when to refresh it.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Exchanges email and password for a new session.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn sign_in(&self, credentials: &Credentials) -> Result<ApiResponse, ProtocolError>;

    /// Exchanges a refresh token for a new session.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn refresh_token(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<ApiResponse, ProtocolError>;

    /// Fetches the signed-in user's metadata.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn get_user(&self, access_token: &str) -> Result<ApiResponse, ProtocolError>;

    /// Updates the signed-in user's metadata.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn put_user(&self, access_token: &str, changes: &Value)
    -> Result<ApiResponse, ProtocolError>;

    /// Lists up to `limit` devices.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn list_devices(&self, access_token: &str, limit: u32)
    -> Result<ApiResponse, ProtocolError>;

    /// Fetches a single device with its parameters.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn get_device(
        &self,
        access_token: &str,
        device_id: &str,
    ) -> Result<ApiResponse, ProtocolError>;

    /// Submits a parameter write; the answer carries a request id.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn set_parameters(
        &self,
        access_token: &str,
        device_id: &str,
        device_sub_id: u8,
        parameters: &[ParameterWrite],
    ) -> Result<ApiResponse, ProtocolError>;

    /// Fetches the status of a submitted write.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn get_request_status(
        &self,
        access_token: &str,
        request_id: &str,
    ) -> Result<ApiResponse, ProtocolError>;

    /// Lists device groups.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn list_groups(&self, access_token: &str) -> Result<ApiResponse, ProtocolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_range() {
        assert!(ApiResponse::new(200, Value::Null).is_success());
        assert!(ApiResponse::new(204, Value::Null).is_success());
        assert!(!ApiResponse::new(404, Value::Null).is_success());
    }

    #[test]
    fn invalid_token_by_status() {
        let response = ApiResponse::new(403, json!({}));
        assert!(response.is_invalid_token());
    }

    #[test]
    fn invalid_token_by_message_code() {
        let response = ApiResponse::new(401, json!({"messageCode": "INVALID_TOKEN"}));
        assert!(response.is_invalid_token());

        let response = ApiResponse::new(400, json!({"messageCode": "BAD_REQUEST"}));
        assert!(!response.is_invalid_token());
    }

    #[test]
    fn failure_message_prefers_message_code() {
        let response = ApiResponse::new(400, json!({"messageCode": "BAD_REQUEST"}));
        assert_eq!(response.failure_message(), "BAD_REQUEST");

        let response = ApiResponse::new(502, Value::String("Bad Gateway".to_string()));
        assert_eq!(response.failure_message(), "Bad Gateway");

        let response = ApiResponse::new(500, Value::Null);
        assert_eq!(response.failure_message(), "empty response");
    }

    #[test]
    fn parameter_write_serializes() {
        let write = ParameterWrite::new("iu_onoff", "1");
        assert_eq!(
            serde_json::to_value(&write).unwrap(),
            json!({"name": "iu_onoff", "value": "1"})
        );
    }
}
