// NetIdent - Application Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Application configuration model.

use serde::{Deserialize, Serialize};

/// Subnet conflict detection policy.
///
/// `ExactMatch` reproduces the historical behavior: a candidate subnet is
/// rejected only when it is textually identical to an active one.
/// `Overlap` rejects any range intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Reject only textually identical subnets.
    #[default]
    Exact,
    /// Reject any address-range intersection.
    Overlap,
}

impl ConflictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Overlap => "overlap",
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Subnet conflict detection policy.
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,

    /// Gateway probe timeout in seconds.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u32,

    /// Wireless interface override (autodetected when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_interface: Option<String>,

    /// Path of the persisted AP configuration file.
    #[serde(default = "default_ap_config_path")]
    pub ap_config_path: String,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_probe_timeout() -> u32 {
    1
}

fn default_ap_config_path() -> String {
    "/etc/netident/ap.conf".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::Exact,
            probe_timeout_secs: default_probe_timeout(),
            wifi_interface: None,
            ap_config_path: default_ap_config_path(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, super::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file with restrictive permissions (0600).
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), super::Error> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }
}
