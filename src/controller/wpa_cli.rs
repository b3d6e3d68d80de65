// Wi-Fi Roaming - wpa_cli Controller
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! [`NetworkController`] backed by the `wpa_cli` command-line tool.
//!
//! Commands are run directly (no shell) as `wpa_cli -i <interface> ...`.
//! Action commands must answer `OK`; anything else is a failure.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use super::NetworkController;
use crate::models::{AppConfig, Error, NetworkRecord, NetworkSource, Result};
use crate::parser;

/// One row of `wpa_cli list_networks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedNetwork {
    pub id: u32,
    pub ssid: String,
    pub current: bool,
}

/// Controller that shells out to `wpa_cli`.
#[derive(Debug, Clone)]
pub struct WpaCli {
    program: String,
    interface: String,
    /// When set, configured networks are read from this file.
    config_file: Option<PathBuf>,
}

impl WpaCli {
    /// Create a controller for `interface` using the given `wpa_cli` binary.
    pub fn new(program: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            interface: interface.into(),
            config_file: None,
        }
    }

    /// Read configured networks from a supplicant configuration file
    /// instead of asking the supplicant.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Build a controller from the daemon configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let cli = Self::new(config.wpa_cli_path.clone(), config.interface.clone());
        match config.network_source {
            NetworkSource::Supplicant => cli,
            NetworkSource::File => cli.with_config_file(config.supplicant_config.clone()),
        }
    }

    /// The configuration file used for configured networks, if any.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Run a command and return its standard output.
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        debug!("Running {} -i {} {}", self.program, self.interface, command);

        let output = Command::new(&self.program)
            .arg("-i")
            .arg(&self.interface)
            .args(args)
            .output()
            .map_err(|e| Error::controller(&command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::controller(
                command,
                format!("{} {}", output.status, stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a command that must answer `OK`.
    fn run_action(&self, args: &[&str]) -> Result<()> {
        let out = self.run(args)?;
        match last_line(&out) {
            Some("OK") => Ok(()),
            Some(other) => Err(Error::controller(args.join(" "), other)),
            None => Err(Error::controller(args.join(" "), "empty output")),
        }
    }

    /// Run a per-network action against `network.number`.
    fn network_action(&self, action: &str, network: &NetworkRecord) -> Result<()> {
        let id = network
            .number
            .ok_or_else(|| Error::controller(action, format!("network '{}' has no id", network.ssid)))?
            .to_string();
        self.run_action(&[action, &id])
    }

    fn list_networks(&self) -> Result<Vec<ListedNetwork>> {
        let out = self.run(&["list_networks"])?;
        Ok(parse_list_networks(&out))
    }

    /// Configured priority of network `id`; 0 when it cannot be read.
    fn priority_of(&self, id: u32) -> i64 {
        let id = id.to_string();
        match self.run(&["get_network", &id, "priority"]) {
            Ok(out) => parse_priority(&out).unwrap_or_else(|| {
                debug!("Network {} has no readable priority, using 0", id);
                0
            }),
            Err(e) => {
                debug!("Failed to read priority of network {}: {}", id, e);
                0
            }
        }
    }
}

impl NetworkController for WpaCli {
    fn scan(&self) -> Result<()> {
        self.run_action(&["scan"])
    }

    fn current(&self) -> Result<Option<NetworkRecord>> {
        let Some(active) = self.list_networks()?.into_iter().find(|n| n.current) else {
            return Ok(None);
        };

        let record = match &self.config_file {
            None => NetworkRecord::configured(active.id, active.ssid, self.priority_of(active.id)),
            Some(path) => {
                let known = parser::parse_file(path).unwrap_or_else(|e| {
                    warn!("Failed to read {}: {}", path.display(), e);
                    Vec::new()
                });
                known
                    .into_iter()
                    .find(|c| c.ssid == active.ssid)
                    .unwrap_or_else(|| NetworkRecord::configured(active.id, active.ssid, 0))
            }
        };

        Ok(Some(record))
    }

    fn available(&self) -> Result<Vec<NetworkRecord>> {
        let out = self.run(&["scan_results"])?;
        Ok(parse_scan_results(&out)
            .into_iter()
            .map(NetworkRecord::available)
            .collect())
    }

    fn configured(&self) -> Result<Vec<NetworkRecord>> {
        if let Some(path) = &self.config_file {
            return parser::parse_file(path);
        }

        Ok(self
            .list_networks()?
            .into_iter()
            .map(|n| {
                let priority = self.priority_of(n.id);
                NetworkRecord::configured(n.id, n.ssid, priority)
            })
            .collect())
    }

    fn select(&self, network: &NetworkRecord) -> Result<()> {
        self.network_action("select_network", network)
    }

    fn enable(&self, network: &NetworkRecord) -> Result<()> {
        self.network_action("enable_network", network)
    }

    fn disable(&self, network: &NetworkRecord) -> Result<()> {
        self.network_action("disable_network", network)
    }
}

fn last_line(out: &str) -> Option<&str> {
    out.lines().map(str::trim).filter(|l| !l.is_empty()).last()
}

/// Parse `list_networks` output (`id<TAB>ssid<TAB>bssid<TAB>flags`).
///
/// Header and "Selected interface" lines are skipped.
pub fn parse_list_networks(out: &str) -> Vec<ListedNetwork> {
    out.lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let id = fields.next()?.trim().parse::<u32>().ok()?;
            let ssid = fields.next()?.to_string();
            let _bssid = fields.next();
            let flags = fields.next().unwrap_or_default();
            Some(ListedNetwork {
                id,
                ssid,
                current: flags.contains("[CURRENT]"),
            })
        })
        .collect()
}

/// Parse `scan_results` output into sorted, unique, non-empty SSIDs.
pub fn parse_scan_results(out: &str) -> Vec<String> {
    out.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.splitn(5, '\t').collect();
            if fields.len() < 5 {
                return None;
            }
            let ssid = fields[4].trim_end_matches(['\r', '\n']);
            (!ssid.is_empty()).then(|| ssid.to_string())
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Parse `get_network <id> priority` output.
pub fn parse_priority(out: &str) -> Option<i64> {
    last_line(out)?.parse().ok()
}
