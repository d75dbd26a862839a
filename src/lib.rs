// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Airstage Lib - A Rust library to control Airstage air conditioners.
//!
//! This library provides an async client for the Airstage cloud API. It
//! keeps the account session alive, caches device and user responses, and
//! waits for parameter writes to be confirmed by the unit.
//!
//! # Supported Features
//!
//! - **Session handling**: Sign-in, token refresh, transparent retry on a
//!   rejected token (bounded to one refresh and one sign-in per operation)
//! - **Device reads**: Device list, single device, user metadata, groups
//! - **Climate control**: Power, operating mode, fan speed, target
//!   temperature in Celsius or Fahrenheit, vertical airflow, swing
//! - **Special modes**: Powerful, economy, energy-saving fan
//! - **Confirmed writes**: Every setter returns the value the unit reports
//!   after applying the change
//!
//! # Quick Start
//!
//! ```no_run
//! use airstage_lib::{CachePolicy, Client, Region};
//! use airstage_lib::types::{FanSpeed, TemperatureScale, Toggle};
//!
//! #[tokio::main]
//! async fn main() -> airstage_lib::Result<()> {
//!     let client = Client::builder(Region::Europe)
//!         .with_credentials("user@example.com", "password")
//!         .build()?;
//!
//!     let devices = client.get_devices(10, CachePolicy::UseCache).await?;
//!     let Some(device) = devices.first() else {
//!         return Ok(());
//!     };
//!
//!     client.set_power_state(device.id(), Toggle::On).await?;
//!     client.set_fan_speed(device.id(), FanSpeed::Low).await?;
//!
//!     let indoor = client
//!         .get_indoor_temperature(device.id(), TemperatureScale::Celsius)
//!         .await?;
//!     println!("indoor: {indoor:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Resuming a Session
//!
//! Tokens can be persisted and handed back to a new client so it does not
//! need to sign in again:
//!
//! ```no_run
//! use airstage_lib::{Client, Region};
//!
//! # async fn example() -> airstage_lib::Result<()> {
//! let client = Client::builder(Region::Europe).build()?;
//! client.restore_session("access-token", chrono::Utc::now(), "refresh-token");
//!
//! // The expired token is refreshed before the first request.
//! let name = client.get_name("E8FF0001").await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod client;
pub mod error;
pub mod protocol;
pub mod response;
pub mod session;
pub mod types;

pub use cache::DeviceEntry;
#[cfg(feature = "http")]
pub use client::ClientBuilder;
pub use client::{CachePolicy, Client, PollPolicy};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::{ApiResponse, ParameterWrite, Transport};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig, Region};
pub use response::Metadata;
pub use session::{Credentials, SessionState};
pub use types::{
    FanSpeed, OperationMode, Parameter, TemperatureScale, Toggle, VerticalDirection,
};
