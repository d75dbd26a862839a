// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response payload parsing for the Airstage cloud API.

mod device;
mod request;
mod token;

pub use device::{
    DEVICE_ID_FIELD, DevicePayload, Metadata, PARAMETERS_FIELD, Parameters, parse_device_list,
    parse_user_metadata,
};
pub use request::{RequestStatus, WriteAccepted};
pub use token::TokenResponse;
