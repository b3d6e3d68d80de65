// Wi-Fi Roaming - Roaming Engine
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Roaming decision engine.
//!
//! Each call to [`RoamingEngine::evaluate`] reconciles three views of the
//! world (the associated network, the networks in range and the configured
//! networks with their priorities) into at most one switch action.
//!
//! Two mechanisms keep the station from flapping:
//! - the network that was just left is ignored for `ignore_wait`;
//! - when the current network disappears from the candidate set, the next
//!   eligible candidate is joined regardless of priority.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::controller::NetworkController;
use crate::logging::Logger;
use crate::models::{interested_networks, sort_by_priority, NetworkRecord};

/// A network temporarily excluded from switch consideration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredNetwork {
    pub network: NetworkRecord,
    pub since: Instant,
}

/// State carried across iterations for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    /// Network believed to be associated.
    pub current_network: Option<NetworkRecord>,
    /// Network excluded from switching until the ignore window elapses.
    pub ignored: Option<IgnoredNetwork>,
    /// Join the first eligible candidate regardless of priority.
    pub reassociate_pending: bool,
}

impl EngineState {
    fn current_ssid(&self) -> Option<&str> {
        self.current_network.as_ref().map(|n| n.ssid.as_str())
    }

    fn current_priority(&self) -> i64 {
        self.current_network.as_ref().map_or(0, |n| n.priority)
    }

    fn current_label(&self) -> &str {
        self.current_ssid().unwrap_or("<none>")
    }

    fn is_ignored(&self, network: &NetworkRecord) -> bool {
        self.ignored
            .as_ref()
            .is_some_and(|i| i.network.ssid == network.ssid)
    }
}

/// What a single evaluation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A controller read failed; nothing was decided.
    Skipped,
    /// The supplicant moved to another network on its own.
    AssociationChanged { to: String },
    /// A higher-priority (or fallback) network was selected.
    Switched { to: String },
    /// Selecting a network failed.
    SwitchFailed { to: String },
    /// The current network is out of range; the next iteration will join
    /// the first eligible candidate.
    AwaitingReassociation,
    /// Nothing to do.
    Stay,
}

/// Roaming decision engine.
pub struct RoamingEngine<C> {
    controller: C,
    logger: Arc<dyn Logger>,
    ignore_wait: Duration,
    state: EngineState,
}

impl<C: NetworkController> RoamingEngine<C> {
    /// Create the engine, seeding the current network from the controller.
    pub fn new(controller: C, logger: Arc<dyn Logger>, ignore_wait: Duration) -> Self {
        let current_network = match controller.current() {
            Ok(current) => current,
            Err(e) => {
                logger.warn(format_args!("Unable to read current network: {}", e));
                None
            }
        };

        if let Some(network) = &current_network {
            logger.info(format_args!("Current network is {}", network));
        }

        Self {
            controller,
            logger,
            ignore_wait,
            state: EngineState {
                current_network,
                ..EngineState::default()
            },
        }
    }

    /// Current engine state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Ask the controller for a new scan. Failures are logged and ignored;
    /// the next evaluation works with whatever results are available.
    pub fn scan(&self) -> bool {
        match self.controller.scan() {
            Ok(()) => true,
            Err(e) => {
                self.logger.warn(format_args!("Scan request failed: {}", e));
                false
            }
        }
    }

    /// Run one decision pass.
    pub fn evaluate(&mut self, now: Instant) -> Outcome {
        let active = match self.controller.current() {
            Ok(active) => active,
            Err(e) => {
                self.logger.warn(format_args!("Unable to read current network: {}", e));
                return Outcome::Skipped;
            }
        };

        let changed = active.as_ref().map(|n| n.ssid.as_str()) != self.state.current_ssid();
        if changed {
            self.ignore_current(now);

            match active {
                None => {
                    // The supplicant is expected to reassociate on its own.
                    self.logger.info(format_args!(
                        "Current network '{}' has gone away",
                        self.state.current_label()
                    ));
                }
                Some(network) => {
                    self.logger.info(format_args!(
                        "Current network has changed from '{}' to '{}'",
                        self.state.current_label(),
                        network.ssid
                    ));
                    let to = network.ssid.clone();
                    self.state.current_network = Some(network);
                    return Outcome::AssociationChanged { to };
                }
            }
        } else {
            self.expire_ignore(now);
        }

        let Some(interested) = self.candidates() else {
            return Outcome::Skipped;
        };

        for network in &interested {
            self.logger.trace(format_args!("Enabling network {}", network));
            if let Err(e) = self.controller.enable(network) {
                self.logger
                    .warn(format_args!("Unable to enable network '{}': {}", network.ssid, e));
            }
        }

        let outcome = self.decide(&interested, now);

        let current_in_range = interested
            .iter()
            .any(|n| Some(n.ssid.as_str()) == self.state.current_ssid());
        if !current_in_range {
            self.logger.info(format_args!(
                "Network '{}' no longer available",
                self.state.current_label()
            ));
            self.state.reassociate_pending = true;
            return Outcome::AwaitingReassociation;
        }

        outcome
    }

    /// Configured networks in range, highest priority first.
    fn candidates(&self) -> Option<Vec<NetworkRecord>> {
        let available = match self.controller.available() {
            Ok(available) => available,
            Err(e) => {
                self.logger.warn(format_args!("Unable to read scan results: {}", e));
                return None;
            }
        };

        let mut configured = match self.controller.configured() {
            Ok(configured) => configured,
            Err(e) if e.is_malformed_config() => {
                self.logger.error(format_args!("Unable to read configured networks: {}", e));
                return None;
            }
            Err(e) => {
                self.logger.warn(format_args!("Unable to read configured networks: {}", e));
                return None;
            }
        };
        sort_by_priority(&mut configured);

        let interested = interested_networks(&configured, &available);
        self.logger.debug(format_args!(
            "{} of {} configured network(s) in range ({} visible)",
            interested.len(),
            configured.len(),
            available.len()
        ));
        Some(interested)
    }

    /// Evaluate the first candidate that is not ignored.
    ///
    /// A successful select makes the candidate current and ignores the
    /// previous network. If the supplicant still reports the previous
    /// network at the next poll, that is handled as an association change:
    /// the candidate is ignored for `ignore_wait` and the reported network
    /// becomes current again.
    fn decide(&mut self, interested: &[NetworkRecord], now: Instant) -> Outcome {
        let Some(candidate) = interested.iter().find(|n| !self.state.is_ignored(n)) else {
            return Outcome::Stay;
        };

        let mut outcome = Outcome::Stay;
        let wanted = self.state.reassociate_pending
            || candidate.priority > self.state.current_priority();

        if wanted && Some(candidate.ssid.as_str()) != self.state.current_ssid() {
            self.logger.info(format_args!(
                "Switching to network {} from network '{}' with priority {}",
                candidate,
                self.state.current_label(),
                self.state.current_priority()
            ));

            outcome = match self.controller.select(candidate) {
                Ok(()) => {
                    self.ignore_current(now);
                    self.state.current_network = Some(candidate.clone());
                    Outcome::Switched {
                        to: candidate.ssid.clone(),
                    }
                }
                Err(e) => {
                    self.logger.error(format_args!(
                        "Error: unable to select network '{}': {}",
                        candidate.ssid, e
                    ));
                    Outcome::SwitchFailed {
                        to: candidate.ssid.clone(),
                    }
                }
            };
        }

        self.state.reassociate_pending = false;
        outcome
    }

    /// Start ignoring the network that is current right now.
    fn ignore_current(&mut self, now: Instant) {
        self.state.ignored = self
            .state
            .current_network
            .clone()
            .map(|network| IgnoredNetwork { network, since: now });
    }

    fn expire_ignore(&mut self, now: Instant) {
        let expired = self
            .state
            .ignored
            .as_ref()
            .is_some_and(|i| now.saturating_duration_since(i.since) > self.ignore_wait);

        if expired {
            if let Some(ignored) = self.state.ignored.take() {
                self.logger.debug(format_args!(
                    "No longer ignoring network '{}'",
                    ignored.network.ssid
                ));
            }
        }
    }
}
