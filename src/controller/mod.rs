// Wi-Fi Roaming - Network Controller
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Access to the wireless supplicant.
//!
//! The roaming engine only sees the [`NetworkController`] trait; how the
//! commands reach the supplicant is up to the implementation.

pub mod wpa_cli;

#[cfg(test)]
pub mod mock;

pub use wpa_cli::WpaCli;

use crate::models::{NetworkRecord, Result};

/// Operations the roaming engine needs from the supplicant.
///
/// Every call is blocking and may fail with
/// [`Error::ControllerCommand`](crate::models::Error::ControllerCommand).
pub trait NetworkController {
    /// Request a new scan. Results show up in [`available`](Self::available)
    /// some time later.
    fn scan(&self) -> Result<()>;

    /// The network the station is associated with, if any.
    fn current(&self) -> Result<Option<NetworkRecord>>;

    /// SSIDs seen in the latest scan results, deduplicated and sorted.
    fn available(&self) -> Result<Vec<NetworkRecord>>;

    /// Networks known to the supplicant, with number and priority.
    fn configured(&self) -> Result<Vec<NetworkRecord>>;

    /// Force association with `network`.
    fn select(&self, network: &NetworkRecord) -> Result<()>;

    /// Allow the supplicant to associate with `network`.
    fn enable(&self, network: &NetworkRecord) -> Result<()>;

    /// Prevent the supplicant from associating with `network`.
    fn disable(&self, network: &NetworkRecord) -> Result<()>;
}
