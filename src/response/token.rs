// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sign-in and refresh payloads.

use serde::Deserialize;

/// Tokens returned by sign-in and refresh.
///
/// # Examples
///
/// ```
/// use airstage_lib::response::TokenResponse;
///
/// let json = r#"{"accessToken": "a", "expiresIn": 3600, "refreshToken": "r"}"#;
/// let tokens: TokenResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(tokens.expires_in, 3600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Bearer token for authorized requests.
    pub access_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    /// Token used to obtain the next access token.
    pub refresh_token: String,
}
