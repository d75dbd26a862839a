// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session state: bearer token and refresh token of the signed-in user.

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;

use crate::error::ParseError;
use crate::response::TokenResponse;

/// Account credentials used to sign in.
#[derive(Debug)]
pub struct Credentials {
    email: String,
    password: SecretString,
}

impl Credentials {
    /// Creates credentials from an email and password.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

/// Tokens of the signed-in user.
///
/// The access token and its expiry are stored together, so one is never
/// set without the other.
///
/// # Examples
///
/// ```
/// use airstage_lib::session::SessionState;
/// use chrono::{Duration, Utc};
///
/// let mut session = SessionState::new();
/// assert!(session.is_expired());
///
/// session.update("access", Utc::now() + Duration::hours(1), "refresh");
/// assert!(!session.is_expired());
/// assert_eq!(session.access_token(), Some("access"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionState {
    access: Option<(String, DateTime<Utc>)>,
    refresh_token: Option<String>,
}

impl SessionState {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when no token is set or its expiry has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns `true` when no token is set or `now` is at or past the expiry.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match &self.access {
            Some((_, expiry)) => now >= *expiry,
            None => true,
        }
    }

    /// Replaces the tokens.
    pub fn update(
        &mut self,
        access_token: impl Into<String>,
        expiry: DateTime<Utc>,
        refresh_token: impl Into<String>,
    ) {
        self.access = Some((access_token.into(), expiry));
        self.refresh_token = Some(refresh_token.into());
    }

    /// Applies a sign-in or refresh payload received at `now`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if `expiresIn` does not yield a
    /// representable expiry. The session is left unchanged.
    pub fn apply(
        &mut self,
        tokens: &TokenResponse,
        now: DateTime<Utc>,
    ) -> Result<(), ParseError> {
        let expiry = Duration::try_seconds(tokens.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| ParseError::InvalidValue {
                field: "expiresIn".to_string(),
                message: format!("{} seconds is out of range", tokens.expires_in),
            })?;
        self.update(&*tokens.access_token, expiry, &*tokens.refresh_token);
        Ok(())
    }

    /// Drops the tokens.
    pub fn clear(&mut self) {
        self.access = None;
        self.refresh_token = None;
    }

    /// Returns the current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access.as_ref().map(|(token, _)| token.as_str())
    }

    /// Returns the access token expiry.
    #[must_use]
    pub fn access_token_expiry(&self) -> Option<DateTime<Utc>> {
        self.access.as_ref().map(|(_, expiry)| *expiry)
    }

    /// Returns the refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns `true` if both an access token and a refresh token are held.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.access.is_some() && self.refresh_token.is_some()
    }
}
