// Wi-Fi Roaming - Roaming Service
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Poll loop that drives the roaming engine.
//!
//! Each iteration requests a scan, waits `scan_wait` for results, then runs
//! one engine evaluation. A shutdown signal interrupts the wait and stops the
//! loop between iterations.

use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task;
use tracing::{debug, info};

use super::engine::{Outcome, RoamingEngine};
use crate::controller::NetworkController;

/// Service running the roaming engine until shutdown.
pub struct RoamingService<C> {
    engine: RoamingEngine<C>,
    scan_wait: Duration,
}

impl<C: NetworkController> RoamingService<C> {
    /// Create a new roaming service.
    pub fn new(engine: RoamingEngine<C>, scan_wait: Duration) -> Self {
        Self { engine, scan_wait }
    }

    /// Run until `shutdown` turns `true` or its sender is dropped.
    ///
    /// Controller calls block, so they run under `block_in_place`; this
    /// needs the multi-threaded runtime. Returns the number of completed
    /// iterations.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        info!(
            "Starting roaming service (scan wait: {}s)",
            self.scan_wait.as_secs_f32()
        );
        let mut iterations = 0u64;

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            let engine = &self.engine;
            task::block_in_place(|| engine.scan());

            tokio::select! {
                _ = tokio::time::sleep(self.scan_wait) => {}
                _ = shutdown.changed() => {
                    debug!("Shutdown requested during scan wait");
                    break;
                }
            }

            let engine = &mut self.engine;
            let outcome = task::block_in_place(|| engine.evaluate(Instant::now()));
            iterations += 1;
            match &outcome {
                Outcome::Stay => debug!("Iteration {}: staying", iterations),
                other => debug!(
                    "Iteration {}: {:?} (reassociate pending: {})",
                    iterations,
                    other,
                    self.engine.state().reassociate_pending
                ),
            }
        }

        info!("Roaming service stopped after {} iteration(s)", iterations);
        iterations
    }
}
