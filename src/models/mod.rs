// Wi-Fi Roaming - Shared Models
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Shared Models
//!
//! Plain data types used across the daemon:
//!
//! - **Network**: configured/observed network records and candidate ordering
//! - **Config**: daemon settings loaded from TOML
//! - **Error**: shared error types

pub mod config;
pub mod error;
pub mod network;

// Re-export main types for convenience
pub use config::{AppConfig, NetworkSource};
pub use error::{Error, Result};
pub use network::{interested_networks, sort_by_priority, NetworkRecord, PropertyValue};

/// Application name, used for log lines and default paths.
pub const APP_NAME: &str = "wifi-roaming";

/// Configuration directory name (under /etc and XDG_CONFIG_HOME).
pub const CONFIG_DIR_NAME: &str = "wifi-roaming";
