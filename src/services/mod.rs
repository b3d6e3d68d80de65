// Wi-Fi Roaming - Background Services
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Background services.
//!
//! - Engine: decides whether to stay, switch or wait for reassociation
//! - Roaming: the poll loop that drives the engine until shutdown

pub mod engine;
pub mod roaming;

pub use engine::RoamingEngine;
pub use roaming::RoamingService;
