// Wi-Fi Roaming - Logging
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Logging sink and subscriber setup.
//!
//! The roaming engine never calls `tracing` directly; it receives an
//! `Arc<dyn Logger>` and reports its decisions through it. The daemon wires
//! in [`TracingLogger`], tests wire in a recorder.

use std::fmt::Arguments;

/// Log level for sink messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Leveled line sink used by the roaming engine.
pub trait Logger: Send + Sync {
    /// Emit a formatted line at `level`.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    fn trace(&self, args: Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

/// Logger that forwards every line to the `tracing` macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!("{}", args),
            LogLevel::Debug => tracing::debug!("{}", args),
            LogLevel::Info => tracing::info!("{}", args),
            LogLevel::Warn => tracing::warn!("{}", args),
            LogLevel::Error => tracing::error!("{}", args),
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` directives are honoured; `level` is added as the default
/// directive. Returns `false` if a subscriber was already installed.
pub fn init(level: tracing::Level) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Map a configured level name onto a `tracing` level.
pub fn parse_level(name: &str) -> Option<tracing::Level> {
    match name.to_lowercase().as_str() {
        "trace" => Some(tracing::Level::TRACE),
        "debug" => Some(tracing::Level::DEBUG),
        "info" => Some(tracing::Level::INFO),
        "warn" => Some(tracing::Level::WARN),
        "error" => Some(tracing::Level::ERROR),
        _ => None,
    }
}
