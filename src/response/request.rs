// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter write acknowledgement and request status payloads.

use serde::Deserialize;
use serde_json::Value;

/// Acknowledgement of a submitted parameter write.
///
/// # Examples
///
/// ```
/// use airstage_lib::response::WriteAccepted;
///
/// let accepted: WriteAccepted = serde_json::from_str(r#"{"reqId": "42"}"#).unwrap();
/// assert_eq!(accepted.request_id, "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WriteAccepted {
    /// Identifier to poll for completion.
    #[serde(rename = "reqId")]
    pub request_id: String,
}

/// Status of a submitted parameter write.
///
/// While the unit has not applied the change the status is `waiting`.
/// Once resolved, `result` tells whether it succeeded and `device` carries
/// the device as it is after the write.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestStatus {
    /// Processing status, e.g. `waiting` or `complete`.
    pub status: String,
    /// Outcome once resolved, e.g. `success`.
    #[serde(default)]
    pub result: Option<String>,
    /// Device payload after the write.
    #[serde(default)]
    pub device: Option<Value>,
}

impl RequestStatus {
    /// Returns `true` while the write has not been resolved.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.status.eq_ignore_ascii_case("waiting")
    }

    /// Returns `true` if the write was confirmed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result
            .as_deref()
            .is_some_and(|result| result.eq_ignore_ascii_case("success"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waiting_status() {
        let status: RequestStatus = serde_json::from_str(r#"{"status": "waiting"}"#).unwrap();
        assert!(status.is_waiting());
        assert!(!status.is_success());
        assert!(status.device.is_none());
    }

    #[test]
    fn resolved_success() {
        let status: RequestStatus = serde_json::from_str(
            r#"{"status": "complete", "result": "success", "device": {"deviceId": "a"}}"#,
        )
        .unwrap();
        assert!(!status.is_waiting());
        assert!(status.is_success());
        assert!(status.device.is_some());
    }

    #[test]
    fn resolved_failure() {
        let status: RequestStatus =
            serde_json::from_str(r#"{"status": "complete", "result": "error"}"#).unwrap();
        assert!(!status.is_waiting());
        assert!(!status.is_success());
    }
}
