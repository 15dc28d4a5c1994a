// NetIdent - Adapter Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Detected network adapter types.

use serde::{Deserialize, Serialize};

/// Type of network adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterType {
    /// Wired Ethernet adapter.
    Ethernet,
    /// Wireless (WiFi) adapter.
    Wifi,
    /// Virtual adapter (bridges, VLANs, etc.).
    Virtual,
    /// Loopback interface.
    Loopback,
    /// Unknown or other type.
    Other,
}

impl AdapterType {
    /// Get human-readable name for this adapter type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ethernet => "Ethernet",
            Self::Wifi => "Wi-Fi",
            Self::Virtual => "Virtual",
            Self::Loopback => "Loopback",
            Self::Other => "Network",
        }
    }
}

/// Information about a detected network adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterInfo {
    /// Interface name (e.g., "eth0", "wlan0", "enp3s0").
    pub name: String,
    /// Type of adapter.
    pub adapter_type: AdapterType,
    /// Hardware MAC address (if available).
    pub mac_address: Option<String>,
    /// Human-readable description or driver name.
    pub description: Option<String>,
    /// Whether the adapter is currently connected/up.
    pub is_connected: bool,
}

impl AdapterInfo {
    /// Create a new AdapterInfo.
    pub fn new(name: impl Into<String>, adapter_type: AdapterType) -> Self {
        Self {
            name: name.into(),
            adapter_type,
            mac_address: None,
            description: None,
            is_connected: false,
        }
    }

    /// Get a display label for the adapter.
    pub fn display_label(&self) -> String {
        if let Some(desc) = &self.description {
            format!("{} ({})", self.name, desc)
        } else {
            format!("{} - {}", self.name, self.adapter_type.display_name())
        }
    }
}
