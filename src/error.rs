// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Airstage library.
//!
//! This module provides the error hierarchy for the library: value
//! validation, transport failures, payload parsing, and the session-level
//! conditions raised by the client (rejected tokens, missing credentials,
//! unconfirmed commands).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the remote API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The remote API answered with an unexpected status.
    #[error("API request failed with HTTP {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Message code or body excerpt returned by the API.
        message: String,
    },

    /// The access token was rejected and re-authentication did not help.
    #[error("access token rejected (HTTP {status})")]
    InvalidToken {
        /// HTTP status code of the rejected response.
        status: u16,
    },

    /// Neither a refresh token nor stored credentials are available.
    #[error("cannot refresh or authenticate: no refresh token and no credentials")]
    CredentialsUnavailable,

    /// A value required to compute the result is not reported by the device.
    #[error("{0} is not available")]
    MissingValue(&'static str),

    /// A parameter write was not resolved within the polling budget.
    #[error("request {request_id} still pending after {attempts} status polls")]
    PollTimeout {
        /// Identifier of the pending request.
        request_id: String,
        /// Number of status polls performed.
        attempts: u32,
    },
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// An unknown toggle name was provided.
    #[error("invalid toggle state: {0}")]
    InvalidToggle(String),

    /// An unknown operation mode name was provided.
    #[error("invalid operation mode: {0}")]
    InvalidOperationMode(String),

    /// An unknown fan speed name was provided.
    #[error("invalid fan speed: {0}")]
    InvalidFanSpeed(String),

    /// An unknown temperature scale was provided.
    #[error("invalid temperature scale: {0}")]
    InvalidTemperatureScale(String),

    /// A temperature is not a finite number.
    #[error("temperature {0} is not a finite number")]
    InvalidTemperature(f64),
}

/// Errors related to transport communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the service failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing API payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// Failed to decode a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
