// NetIdent - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for NetIdent operations.

use thiserror::Error;

/// Result type alias for NetIdent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for NetIdent operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Address / Input Errors
    // ========================================
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid hostname: {0}")]
    InvalidHostname(String),

    // ========================================
    // Network Manager Errors
    // ========================================
    #[error("Command failed: {command} - {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("Connection attempt failed: {0}")]
    ConnectionFailed(String),

    // ========================================
    // Storage Errors
    // ========================================
    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to write configuration: {0}")]
    ConfigWriteFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    // ========================================
    // System Errors
    // ========================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new command failed error.
    pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from toml serialize errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigWriteFailed(err.to_string())
    }
}
