// Wi-Fi Roaming - In-Memory Controller
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Scriptable [`NetworkController`] used by the engine and loop tests.

use std::sync::{Mutex, MutexGuard};

use super::NetworkController;
use crate::models::{Error, NetworkRecord, Result};

#[derive(Debug, Default)]
struct MockState {
    current: Option<NetworkRecord>,
    available: Vec<NetworkRecord>,
    configured: Vec<NetworkRecord>,
    fail_scan: bool,
    fail_current: bool,
    fail_available: bool,
    fail_select: bool,
    fail_enable: bool,
    calls: Vec<String>,
}

/// Controller whose answers are set by the test and whose calls are recorded.
///
/// A successful `select` makes the selected network current, like a
/// supplicant that associates immediately.
#[derive(Debug, Default)]
pub struct MockController {
    state: Mutex<MockState>,
}

impl MockController {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_current(&self, network: Option<NetworkRecord>) {
        self.lock().current = network;
    }

    pub fn set_available(&self, ssids: &[&str]) {
        self.lock().available = ssids.iter().map(|s| NetworkRecord::available(*s)).collect();
    }

    pub fn set_configured(&self, networks: Vec<NetworkRecord>) {
        self.lock().configured = networks;
    }

    pub fn fail_scan(&self, fail: bool) {
        self.lock().fail_scan = fail;
    }

    pub fn fail_current(&self, fail: bool) {
        self.lock().fail_current = fail;
    }

    pub fn fail_available(&self, fail: bool) {
        self.lock().fail_available = fail;
    }

    pub fn fail_select(&self, fail: bool) {
        self.lock().fail_select = fail;
    }

    pub fn fail_enable(&self, fail: bool) {
        self.lock().fail_enable = fail;
    }

    /// Every call made so far, e.g. `"select Home"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Calls starting with `prefix`.
    pub fn calls_to(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn record(&self, call: String) -> MutexGuard<'_, MockState> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

impl NetworkController for MockController {
    fn scan(&self) -> Result<()> {
        if self.record("scan".to_string()).fail_scan {
            return Err(Error::controller("scan", "FAIL-BUSY"));
        }
        Ok(())
    }

    fn current(&self) -> Result<Option<NetworkRecord>> {
        let state = self.record("current".to_string());
        if state.fail_current {
            return Err(Error::controller("list_networks", "exit status: 255"));
        }
        Ok(state.current.clone())
    }

    fn available(&self) -> Result<Vec<NetworkRecord>> {
        let state = self.record("available".to_string());
        if state.fail_available {
            return Err(Error::controller("scan_results", "exit status: 255"));
        }
        Ok(state.available.clone())
    }

    fn configured(&self) -> Result<Vec<NetworkRecord>> {
        Ok(self.record("configured".to_string()).configured.clone())
    }

    fn select(&self, network: &NetworkRecord) -> Result<()> {
        let mut state = self.record(format!("select {}", network.ssid));
        if state.fail_select {
            return Err(Error::controller("select_network", "FAIL"));
        }
        state.current = Some(network.clone());
        Ok(())
    }

    fn enable(&self, network: &NetworkRecord) -> Result<()> {
        if self.record(format!("enable {}", network.ssid)).fail_enable {
            return Err(Error::controller("enable_network", "FAIL"));
        }
        Ok(())
    }

    fn disable(&self, network: &NetworkRecord) -> Result<()> {
        drop(self.record(format!("disable {}", network.ssid)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disable_records_call_and_releases_lock() {
        let controller = MockController::new();
        let network = NetworkRecord::configured(2, "Cafe", 1);

        controller.disable(&network).expect("disable succeeds");
        controller.enable(&network).expect("lock is free again");

        assert_eq!(controller.calls(), vec!["disable Cafe", "enable Cafe"]);
    }
}
