// Wi-Fi Roaming - Daemon Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Daemon configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::{Error, Result};
use super::CONFIG_DIR_NAME;

/// Where the list of configured networks comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkSource {
    /// Ask the running supplicant (`wpa_cli list_networks`).
    #[default]
    Supplicant,
    /// Parse the supplicant configuration file.
    File,
}

impl NetworkSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supplicant => "supplicant",
            Self::File => "file",
        }
    }
}

/// Daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Wireless interface managed by the supplicant.
    #[serde(default = "default_interface")]
    pub interface: String,

    /// Path or name of the supplicant control tool.
    #[serde(default = "default_wpa_cli_path")]
    pub wpa_cli_path: String,

    /// Seconds to wait after requesting a scan.
    #[serde(default = "default_scan_wait")]
    pub scan_wait_secs: u64,

    /// Seconds a network that was just left is excluded from switching.
    #[serde(default = "default_ignore_wait")]
    pub ignore_wait_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// PID file written while the daemon runs.
    #[serde(default = "default_pid_file")]
    pub pid_file: PathBuf,

    /// Source of configured networks.
    #[serde(default)]
    pub network_source: NetworkSource,

    /// Supplicant configuration file, read when `network_source` is `file`.
    #[serde(default = "default_supplicant_config")]
    pub supplicant_config: PathBuf,
}

fn default_interface() -> String {
    "wlan0".to_string()
}

fn default_wpa_cli_path() -> String {
    "wpa_cli".to_string()
}

fn default_scan_wait() -> u64 {
    10
}

fn default_ignore_wait() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_pid_file() -> PathBuf {
    PathBuf::from("/tmp/wifi-roaming.pid")
}

fn default_supplicant_config() -> PathBuf {
    PathBuf::from("/etc/wpa_supplicant/wpa_supplicant.conf")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            wpa_cli_path: default_wpa_cli_path(),
            scan_wait_secs: default_scan_wait(),
            ignore_wait_secs: default_ignore_wait(),
            log_level: default_log_level(),
            pid_file: default_pid_file(),
            network_source: NetworkSource::default(),
            supplicant_config: default_supplicant_config(),
        }
    }
}

/// Maximum interface name length on Linux (IFNAMSIZ - 1).
const MAX_INTERFACE_LEN: usize = 15;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Load configuration from TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigReadFailed(format!("{}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the configuration the daemon should run with.
    ///
    /// An explicit path must exist. Otherwise the system-wide file is tried,
    /// then the per-user one, then built-in defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_from_file(path)?, Some(path.to_path_buf())));
        }

        for candidate in Self::search_paths() {
            if candidate.exists() {
                let config = Self::load_from_file(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Configuration file locations, in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc").join(CONFIG_DIR_NAME).join("config.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join(CONFIG_DIR_NAME).join("config.toml"));
        }
        paths
    }

    /// Check values that would make the daemon misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.interface.is_empty()
            || self.interface.len() > MAX_INTERFACE_LEN
            || self.interface.contains('/')
            || self.interface.chars().any(char::is_whitespace)
        {
            return Err(Error::InvalidConfig(format!(
                "invalid interface name: '{}'",
                self.interface
            )));
        }

        if self.scan_wait_secs == 0 {
            return Err(Error::InvalidConfig(
                "scan_wait_secs must be greater than zero".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::InvalidConfig(format!(
                "unknown log level: '{}'",
                self.log_level
            )));
        }

        if self.wpa_cli_path.trim().is_empty() {
            return Err(Error::InvalidConfig("wpa_cli_path is empty".to_string()));
        }

        Ok(())
    }

    /// Pause between requesting a scan and reading its results.
    pub fn scan_wait(&self) -> Duration {
        Duration::from_secs(self.scan_wait_secs)
    }

    /// Length of the anti-flap window.
    pub fn ignore_wait(&self) -> Duration {
        Duration::from_secs(self.ignore_wait_secs)
    }
}
