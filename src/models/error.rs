// Wi-Fi Roaming - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for the roaming daemon.

use thiserror::Error;

/// Result type alias for roaming daemon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for roaming daemon operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Supplicant Configuration Errors
    // ========================================
    #[error("Malformed supplicant configuration at line {line}: {reason}")]
    MalformedConfig { line: usize, reason: String },

    // ========================================
    // Controller Errors
    // ========================================
    #[error("Controller command failed: {command} - {reason}")]
    ControllerCommand { command: String, reason: String },

    // ========================================
    // Daemon Settings Errors
    // ========================================
    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================
    // System Errors
    // ========================================
    #[error("PID file error: {0}")]
    PidFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new malformed configuration error.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedConfig {
            line,
            reason: reason.into(),
        }
    }

    /// Create a new controller command error.
    pub fn controller(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ControllerCommand {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error came from the supplicant configuration parser.
    pub fn is_malformed_config(&self) -> bool {
        matches!(self, Self::MalformedConfig { .. })
    }

    /// Check if this error came from a controller command.
    #[allow(dead_code)]
    pub fn is_controller_error(&self) -> bool {
        matches!(self, Self::ControllerCommand { .. })
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}
