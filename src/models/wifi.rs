// NetIdent - WiFi Data Models
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! WiFi client-side data models: visible networks, stored connection
//! profiles, and credentials.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ap_config::validate_passphrase;
use super::outcome::ValidationOutcome;

/// A network visible in a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiNetwork {
    /// Network name.
    pub ssid: String,
    /// Signal strength in percent, 0-100.
    pub signal: u8,
    /// Security descriptor as reported by the manager (e.g. "WPA2").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<String>,
}

impl WifiNetwork {
    pub fn new(ssid: impl Into<String>, signal: u8) -> Self {
        Self {
            ssid: ssid.into(),
            signal,
            security: None,
        }
    }
}

/// A stored connection profile, as known to the network manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiProfile {
    /// Connection name (the manager's key for the profile).
    pub name: String,
    /// SSID the profile associates with.
    pub ssid: String,
}

impl WifiProfile {
    pub fn new(name: impl Into<String>, ssid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ssid: ssid.into(),
        }
    }
}

/// A WPA passphrase whose memory is wiped on drop.
///
/// Credentials pass through the reconciler on their way to the network
/// manager and are never persisted by this crate.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(passphrase.into())
    }

    /// The passphrase text.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check the 8-63 printable-character passphrase policy.
    pub fn validate(&self) -> ValidationOutcome {
        validate_passphrase(&self.0)
    }
}

// Keep credentials out of Debug output.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(****)")
    }
}
