// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scripted transport for client unit tests.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::error::ProtocolError;
use crate::protocol::{ApiResponse, ParameterWrite, Transport};
use crate::session::Credentials;

/// Endpoint hit by a transport call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    SignIn,
    Refresh,
    GetUser,
    PutUser,
    ListDevices,
    GetDevice,
    SetParameters,
    RequestStatus,
    ListGroups,
}

/// A recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub endpoint: Endpoint,
    pub token: String,
    pub target: Option<String>,
}

type Scripted = Result<ApiResponse, ProtocolError>;

/// Transport answering calls from a queue, in order, regardless of endpoint.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<Call>>,
    writes: Mutex<Vec<Vec<ParameterWrite>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next answer.
    pub fn then(self, response: ApiResponse) -> Self {
        self.responses.lock().push_back(Ok(response));
        self
    }

    /// Queues a transport failure.
    pub fn then_fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .push_back(Err(ProtocolError::ConnectionFailed(message.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.calls.lock().iter().map(|call| call.endpoint).collect()
    }

    pub fn writes(&self) -> Vec<Vec<ParameterWrite>> {
        self.writes.lock().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().len()
    }

    fn answer(&self, endpoint: Endpoint, token: &str, target: Option<&str>) -> Scripted {
        self.calls.lock().push(Call {
            endpoint,
            token: token.to_string(),
            target: target.map(str::to_string),
        });
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {endpoint:?}"))
    }
}

impl Transport for ScriptedTransport {
    async fn sign_in(&self, _credentials: &Credentials) -> Scripted {
        self.answer(Endpoint::SignIn, "", None)
    }

    async fn refresh_token(&self, access_token: &str, refresh_token: &str) -> Scripted {
        self.answer(Endpoint::Refresh, access_token, Some(refresh_token))
    }

    async fn get_user(&self, access_token: &str) -> Scripted {
        self.answer(Endpoint::GetUser, access_token, None)
    }

    async fn put_user(&self, access_token: &str, _changes: &Value) -> Scripted {
        self.answer(Endpoint::PutUser, access_token, None)
    }

    async fn list_devices(&self, access_token: &str, _limit: u32) -> Scripted {
        self.answer(Endpoint::ListDevices, access_token, None)
    }

    async fn get_device(&self, access_token: &str, device_id: &str) -> Scripted {
        self.answer(Endpoint::GetDevice, access_token, Some(device_id))
    }

    async fn set_parameters(
        &self,
        access_token: &str,
        device_id: &str,
        _device_sub_id: u8,
        parameters: &[ParameterWrite],
    ) -> Scripted {
        self.writes.lock().push(parameters.to_vec());
        self.answer(Endpoint::SetParameters, access_token, Some(device_id))
    }

    async fn get_request_status(&self, access_token: &str, request_id: &str) -> Scripted {
        self.answer(Endpoint::RequestStatus, access_token, Some(request_id))
    }

    async fn list_groups(&self, access_token: &str) -> Scripted {
        self.answer(Endpoint::ListGroups, access_token, None)
    }
}

pub(crate) fn ok(body: Value) -> ApiResponse {
    ApiResponse::new(200, body)
}

pub(crate) fn forbidden() -> ApiResponse {
    ApiResponse::new(403, json!({"messageCode": "INVALID_TOKEN"}))
}

pub(crate) fn tokens(access: &str, refresh: &str) -> ApiResponse {
    ok(json!({
        "accessToken": access,
        "expiresIn": 3600,
        "refreshToken": refresh,
    }))
}

pub(crate) fn device_json(id: &str, parameters: &[(&str, Option<&str>)]) -> Value {
    let parameters: Vec<Value> = parameters
        .iter()
        .map(|(name, value)| json!({"name": name, "value": value}))
        .collect();
    json!({
        "deviceId": id,
        "deviceName": format!("Unit {id}"),
        "connectionStatus": "Online",
        "parameters": parameters,
    })
}

pub(crate) fn accepted(request_id: &str) -> ApiResponse {
    ok(json!({"reqId": request_id}))
}

pub(crate) fn waiting() -> ApiResponse {
    ok(json!({"status": "waiting"}))
}

pub(crate) fn confirmed(device: Value) -> ApiResponse {
    ok(json!({"status": "complete", "result": "success", "device": device}))
}
