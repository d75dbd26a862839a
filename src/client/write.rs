// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter writes and completion polling.

use crate::cache::DeviceEntry;
use crate::error::{Error, Result};
use crate::protocol::{ParameterWrite, Transport};
use crate::response::{DevicePayload, RequestStatus, WriteAccepted};
use crate::types::Parameter;

use super::Client;
use super::auth::{CallChain, Request};

impl<T: Transport> Client<T> {
    /// Writes one parameter and waits for the unit to confirm it.
    ///
    /// # Errors
    ///
    /// See [`Client::set_parameters`].
    pub async fn set_parameter(
        &self,
        device_id: &str,
        parameter: Parameter,
        value: impl Into<String>,
    ) -> Result<DeviceEntry> {
        self.set_parameters(device_id, &[ParameterWrite::new(parameter.as_str(), value)])
            .await
    }

    /// Writes several parameters in one request and waits for confirmation.
    ///
    /// The request status is polled according to the client's
    /// [`PollPolicy`](super::PollPolicy). When the unit confirms, the device
    /// it reports is written through to the cache and returned. When the
    /// request resolves without success, the previously cached entry is
    /// returned unchanged so callers see the value that is still in effect.
    ///
    /// The submit and all polls share one retry budget.
    ///
    /// # Errors
    ///
    /// Returns `Error::PollTimeout` if the request is still waiting after the
    /// last poll, or the error of the first failing request.
    pub async fn set_parameters(
        &self,
        device_id: &str,
        parameters: &[ParameterWrite],
    ) -> Result<DeviceEntry> {
        let mut chain = CallChain::new();

        let response = self
            .execute(
                &mut chain,
                Request::SetParameters {
                    device_id,
                    parameters,
                },
            )
            .await?;
        let accepted: WriteAccepted = response.parse()?;
        tracing::debug!(
            device = %device_id,
            request = %accepted.request_id,
            count = parameters.len(),
            "Parameter write accepted"
        );

        let max_attempts = self.poll.max_attempts();
        for attempt in 1..=max_attempts {
            let response = self
                .execute(&mut chain, Request::RequestStatus(&accepted.request_id))
                .await?;
            let status: RequestStatus = response.parse()?;

            if status.is_waiting() {
                tracing::trace!(request = %accepted.request_id, attempt, "Write still pending");
                if attempt < max_attempts {
                    tokio::time::sleep(self.poll.interval()).await;
                }
                continue;
            }

            if !status.is_success() {
                tracing::warn!(
                    device = %device_id,
                    request = %accepted.request_id,
                    result = ?status.result,
                    "Parameter write was not applied"
                );
                return Ok(self.cache.read().device_or_empty(device_id));
            }

            let mut cache = self.cache.write();
            if let Some(device) = &status.device {
                cache.store_device(DevicePayload::from_value(device)?);
            }
            return Ok(cache.device_or_empty(device_id));
        }

        Err(Error::PollTimeout {
            request_id: accepted.request_id,
            attempts: max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use serde_json::json;

    use super::super::PollPolicy;
    use super::super::mock::{
        Endpoint, ScriptedTransport, accepted, confirmed, device_json, forbidden, ok, tokens,
        waiting,
    };
    use super::*;
    use crate::session::Credentials;

    fn client(transport: ScriptedTransport) -> Client<ScriptedTransport> {
        let credentials = Credentials::new("user@example.com", "secret");
        let client = Client::with_transport(transport, Some(credentials))
            .with_poll_policy(PollPolicy::new(Duration::from_secs(1), 3));
        client.restore_session("token", Utc::now() + chrono::Duration::hours(1), "refresh");
        client
    }

    #[tokio::test(start_paused = true)]
    async fn write_polls_until_confirmed() {
        let transport = ScriptedTransport::new()
            .then(accepted("req-1"))
            .then(waiting())
            .then(waiting())
            .then(confirmed(device_json("dev", &[("iu_onoff", Some("1"))])));
        let client = client(transport);

        let started = tokio::time::Instant::now();
        let entry = client
            .set_parameter("dev", Parameter::Power, "1")
            .await
            .unwrap();

        assert_eq!(entry.parameter("iu_onoff"), Some("1"));
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(
            client.transport().endpoints(),
            [
                Endpoint::SetParameters,
                Endpoint::RequestStatus,
                Endpoint::RequestStatus,
                Endpoint::RequestStatus
            ]
        );
        assert_eq!(
            client.transport().calls()[1].target.as_deref(),
            Some("req-1")
        );
        assert_eq!(
            client.transport().writes(),
            [vec![ParameterWrite::new("iu_onoff", "1")]]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_device_is_written_through() {
        let transport = ScriptedTransport::new()
            .then(ok(device_json("dev", &[("iu_onoff", Some("0"))])))
            .then(accepted("req-1"))
            .then(confirmed(device_json("dev", &[("iu_onoff", Some("1"))])));
        let client = client(transport);

        client
            .get_device("dev", super::super::CachePolicy::UseCache)
            .await
            .unwrap();
        client
            .set_parameter("dev", Parameter::Power, "1")
            .await
            .unwrap();

        let cached = client.cache().device("dev").unwrap();
        assert_eq!(cached.parameter("iu_onoff"), Some("1"));
    }

    #[tokio::test(start_paused = true)]
    async fn unconfirmed_write_times_out() {
        let transport = ScriptedTransport::new()
            .then(accepted("req-9"))
            .then(waiting())
            .then(waiting())
            .then(waiting());
        let client = client(transport);

        let err = client
            .set_parameter("dev", Parameter::FanSpeed, "8")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::PollTimeout { ref request_id, attempts: 3 } if request_id == "req-9"
        ));
        assert_eq!(client.transport().remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_write_returns_prior_entry() {
        let transport = ScriptedTransport::new()
            .then(ok(device_json("dev", &[("iu_op_mode", Some("1"))])))
            .then(accepted("req-2"))
            .then(ok(json!({"status": "complete", "result": "failure"})));
        let client = client(transport);

        client
            .get_device("dev", super::super::CachePolicy::UseCache)
            .await
            .unwrap();
        let entry = client
            .set_parameter("dev", Parameter::OperationMode, "4")
            .await
            .unwrap();

        assert_eq!(entry.parameter("iu_op_mode"), Some("1"));
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_token_while_polling_signs_in_once() {
        let transport = ScriptedTransport::new()
            .then(accepted("req-3"))
            .then(forbidden())
            .then(tokens("fresh", "refresh-2"))
            .then(confirmed(device_json("dev", &[("iu_economy", Some("1"))])));
        let client = client(transport);

        let entry = client
            .set_parameter("dev", Parameter::Economy, "1")
            .await
            .unwrap();

        assert_eq!(entry.parameter("iu_economy"), Some("1"));
        let calls = client.transport().calls();
        assert_eq!(calls[1].token, "token");
        assert_eq!(calls[2].endpoint, Endpoint::SignIn);
        assert_eq!(calls[3].token, "fresh");
    }

    #[tokio::test(start_paused = true)]
    async fn second_rejection_in_one_write_is_fatal() {
        let transport = ScriptedTransport::new()
            .then(forbidden())
            .then(tokens("fresh", "refresh-2"))
            .then(accepted("req-4"))
            .then(forbidden());
        let client = client(transport);

        let err = client
            .set_parameter("dev", Parameter::Powerful, "1")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidToken { status: 403 }));
        assert_eq!(client.transport().remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_submit_is_an_api_error() {
        let transport = ScriptedTransport::new().then(crate::protocol::ApiResponse::new(
            400,
            json!({"messageCode": "INVALID_PARAMETER"}),
        ));
        let client = client(transport);

        let err = client
            .set_parameter("dev", Parameter::AirflowVerticalDirection, "9")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api { status: 400, .. }));
        assert_eq!(client.transport().endpoints(), [Endpoint::SetParameters]);
    }

    #[tokio::test(start_paused = true)]
    async fn batched_write_sends_one_request() {
        let transport = ScriptedTransport::new()
            .then(accepted("req-5"))
            .then(confirmed(device_json(
                "dev",
                &[("iu_onoff", Some("1")), ("iu_op_mode", Some("1"))],
            )));
        let client = client(transport);

        let writes = [
            ParameterWrite::new("iu_onoff", "1"),
            ParameterWrite::new("iu_op_mode", "1"),
        ];
        client.set_parameters("dev", &writes).await.unwrap();

        assert_eq!(client.transport().writes(), [writes.to_vec()]);
    }
}
