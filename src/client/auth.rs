// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authentication and the authorized request loop.

use chrono::Utc;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::protocol::{ApiResponse, ParameterWrite, Transport};
use crate::response::TokenResponse;

use super::Client;

/// Sub-device index targeted by parameter writes.
pub(super) const DEVICE_SUB_ID: u8 = 0;

/// Whether a recovery step was already used in a call chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum Attempt {
    #[default]
    NotAttempted,
    Attempted,
}

impl Attempt {
    /// Marks the step as used, returning whether it was still available.
    fn take(&mut self) -> bool {
        std::mem::replace(self, Self::Attempted) == Self::NotAttempted
    }
}

/// Retry budget of one public operation.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct CallChain {
    refresh: Attempt,
    authenticate: Attempt,
}

impl CallChain {
    pub(super) fn new() -> Self {
        Self::default()
    }
}

/// An authorized API request.
#[derive(Debug, Clone, Copy)]
pub(super) enum Request<'a> {
    User,
    UpdateUser(&'a Value),
    Devices { limit: u32 },
    Device(&'a str),
    SetParameters {
        device_id: &'a str,
        parameters: &'a [ParameterWrite],
    },
    RequestStatus(&'a str),
    Groups,
}

impl Request<'_> {
    fn name(&self) -> &'static str {
        match self {
            Self::User => "get-user",
            Self::UpdateUser(_) => "put-user",
            Self::Devices { .. } => "list-devices",
            Self::Device(_) => "get-device",
            Self::SetParameters { .. } => "set-parameters",
            Self::RequestStatus(_) => "get-request-status",
            Self::Groups => "list-groups",
        }
    }
}

impl<T: Transport> Client<T> {
    /// Signs in with the stored credentials.
    ///
    /// On success the session is replaced and the token payload returned.
    /// Failures are surfaced as-is without retrying.
    ///
    /// # Errors
    ///
    /// Returns `Error::CredentialsUnavailable` if the client has no
    /// credentials, or the transport/API error of the sign-in request.
    pub async fn authenticate(&self) -> Result<TokenResponse> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(Error::CredentialsUnavailable)?;

        tracing::debug!(email = %credentials.email(), "Authenticating");
        let response = self.transport.sign_in(credentials).await?;
        self.accept_tokens(&response)
    }

    /// Exchanges the refresh token for a new session.
    ///
    /// If the API rejects the refresh token (or none is held), falls back to
    /// [`authenticate`](Self::authenticate).
    ///
    /// # Errors
    ///
    /// Returns the error of the refresh request, or of the fallback sign-in.
    pub async fn refresh(&self) -> Result<TokenResponse> {
        self.refresh_in(&mut CallChain::new()).await
    }

    /// Refreshes the session if tokens are held, otherwise signs in.
    ///
    /// # Errors
    ///
    /// Returns `Error::CredentialsUnavailable` without any network call when
    /// there is neither a refresh token nor stored credentials.
    pub async fn refresh_or_authenticate(&self) -> Result<TokenResponse> {
        self.refresh_or_authenticate_in(&mut CallChain::new()).await
    }

    async fn refresh_or_authenticate_in(&self, chain: &mut CallChain) -> Result<TokenResponse> {
        let can_refresh = self.session.read().can_refresh();
        if can_refresh {
            self.refresh_in(chain).await
        } else if self.credentials.is_some() {
            chain.authenticate.take();
            self.authenticate().await
        } else {
            Err(Error::CredentialsUnavailable)
        }
    }

    async fn refresh_in(&self, chain: &mut CallChain) -> Result<TokenResponse> {
        let tokens = {
            let session = self.session.read();
            session
                .access_token()
                .zip(session.refresh_token())
                .map(|(access, refresh)| (access.to_owned(), refresh.to_owned()))
        };

        let rejected_status = match tokens {
            Some((access, refresh)) => {
                tracing::debug!("Refreshing access token");
                let response = self.transport.refresh_token(&access, &refresh).await?;
                if !response.is_invalid_token() {
                    return self.accept_tokens(&response);
                }
                response.status()
            }
            None => 0,
        };

        if !chain.authenticate.take() {
            return Err(Error::InvalidToken {
                status: rejected_status,
            });
        }
        tracing::debug!(status = rejected_status, "Refresh rejected, authenticating");
        self.authenticate().await
    }

    fn accept_tokens(&self, response: &ApiResponse) -> Result<TokenResponse> {
        if !response.is_success() {
            return Err(Error::Api {
                status: response.status(),
                message: response.failure_message(),
            });
        }

        let tokens: TokenResponse = response.parse()?;
        self.session.write().apply(&tokens, Utc::now())?;
        tracing::debug!(expires_in = tokens.expires_in, "Session updated");
        Ok(tokens)
    }

    /// Sends an authorized request under the chain's retry budget.
    ///
    /// An expired token is refreshed before sending and a rejected token
    /// triggers a sign-in and a resend, each at most once per chain.
    pub(super) async fn execute(
        &self,
        chain: &mut CallChain,
        request: Request<'_>,
    ) -> Result<ApiResponse> {
        loop {
            let expired = self.session.read().is_expired();
            if expired && chain.refresh.take() {
                tracing::debug!(request = request.name(), "Access token expired");
                self.refresh_or_authenticate_in(chain).await?;
                continue;
            }

            let token = self
                .session
                .read()
                .access_token()
                .map(str::to_owned)
                .unwrap_or_default();
            let response = self.dispatch(request, &token).await?;

            if response.is_invalid_token() {
                if chain.authenticate.take() {
                    tracing::debug!(request = request.name(), "Access token rejected");
                    self.authenticate().await?;
                    continue;
                }
                return Err(Error::InvalidToken {
                    status: response.status(),
                });
            }

            if !response.is_success() {
                return Err(Error::Api {
                    status: response.status(),
                    message: response.failure_message(),
                });
            }

            return Ok(response);
        }
    }

    async fn dispatch(&self, request: Request<'_>, token: &str) -> Result<ApiResponse> {
        let transport = &self.transport;
        let response = match request {
            Request::User => transport.get_user(token).await,
            Request::UpdateUser(changes) => transport.put_user(token, changes).await,
            Request::Devices { limit } => transport.list_devices(token, limit).await,
            Request::Device(device_id) => transport.get_device(token, device_id).await,
            Request::SetParameters {
                device_id,
                parameters,
            } => {
                transport
                    .set_parameters(token, device_id, DEVICE_SUB_ID, parameters)
                    .await
            }
            Request::RequestStatus(request_id) => {
                transport.get_request_status(token, request_id).await
            }
            Request::Groups => transport.list_groups(token).await,
        };
        Ok(response?)
    }
}
