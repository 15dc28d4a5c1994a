// NetIdent - Local Storage
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Persistence for the AP configuration snapshot and application settings.
//!
//! The AP configuration is exchanged with the rest of the system as plain
//! `KEY="value"` text lines; application settings live in a TOML file
//! under the XDG config directory. Workflows read one snapshot at start
//! and persist one at end; nothing here caches between calls.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::models::addr::ip_to_u32;
use crate::models::{
    ApConfiguration, AppConfig, CidrBlock, Error, Result, CONFIG_DIR_NAME, SETTINGS_FILE_NAME,
};

/// Keys of the persisted AP configuration.
const KEY_SSID: &str = "AP_SSID";
const KEY_PASSPHRASE: &str = "AP_PASSPHRASE";
const KEY_SUBNET: &str = "AP_SUBNET";
const KEY_GATEWAY: &str = "AP_GATEWAY";

/// Store for the persisted AP configuration.
#[derive(Debug, Clone)]
pub struct ApConfigStore {
    path: PathBuf,
}

impl ApConfigStore {
    /// Create a store over the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the AP configuration snapshot.
    pub fn load(&self) -> Result<ApConfiguration> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::ConfigReadFailed(format!("{}: {}", self.path.display(), e)))?;
        parse_ap_config(&content)
    }

    /// Persist an AP configuration snapshot with restrictive permissions.
    pub fn save(&self, config: &ApConfiguration) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::ConfigWriteFailed(format!("{}: {}", parent.display(), e)))?;
        }

        let content = format_ap_config(config);
        fs::write(&self.path, content)
            .map_err(|e| Error::ConfigWriteFailed(format!("{}: {}", self.path.display(), e)))?;

        // The passphrase is stored in the clear; keep the file private.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
        }

        info!("Saved AP configuration to {}", self.path.display());
        Ok(())
    }
}

/// Serialize an AP configuration to `KEY="value"` lines.
fn format_ap_config(config: &ApConfiguration) -> String {
    format!(
        "{}=\"{}\"\n{}=\"{}\"\n{}=\"{}\"\n{}=\"{}\"\n",
        KEY_SSID,
        config.ssid,
        KEY_PASSPHRASE,
        config.passphrase,
        KEY_SUBNET,
        config.subnet,
        KEY_GATEWAY,
        config.gateway_str(),
    )
}

/// Parse `KEY="value"` lines into an AP configuration.
///
/// Blank lines and `#` comments are skipped; unknown keys are ignored so
/// the file can carry extra entries for other tools.
fn parse_ap_config(content: &str) -> Result<ApConfiguration> {
    let mut ssid = None;
    let mut passphrase = None;
    let mut subnet = None;
    let mut gateway = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, raw_value) = match line.split_once('=') {
            Some(pair) => pair,
            None => {
                warn!("Skipping malformed config line: {}", line);
                continue;
            }
        };

        let value = raw_value.trim().trim_matches('"').to_string();
        match key.trim() {
            KEY_SSID => ssid = Some(value),
            KEY_PASSPHRASE => passphrase = Some(value),
            KEY_SUBNET => subnet = Some(value),
            KEY_GATEWAY => gateway = Some(value),
            _ => {}
        }
    }

    let ssid = ssid.ok_or_else(|| missing_key(KEY_SSID))?;
    let passphrase = passphrase.ok_or_else(|| missing_key(KEY_PASSPHRASE))?;
    let subnet: CidrBlock = subnet
        .ok_or_else(|| missing_key(KEY_SUBNET))?
        .parse()
        .map_err(|e: Error| Error::ConfigParseFailed(e.to_string()))?;
    let gateway = ip_to_u32(&gateway.ok_or_else(|| missing_key(KEY_GATEWAY))?)
        .map_err(|e| Error::ConfigParseFailed(e.to_string()))?;

    Ok(ApConfiguration::new(ssid, passphrase, subnet, gateway))
}

fn missing_key(key: &str) -> Error {
    Error::ConfigParseFailed(format!("missing key {}", key))
}

/// Path of the settings file under the XDG config directory.
pub fn settings_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(SETTINGS_FILE_NAME)
}

/// Load application settings, falling back to defaults.
pub fn load_settings() -> AppConfig {
    load_settings_from(&settings_file_path())
}

/// Load settings from a specific path, falling back to defaults.
pub fn load_settings_from(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }

    match AppConfig::load_from_file(path) {
        Ok(config) => {
            info!("Loaded settings from {}", path.display());
            config
        }
        Err(e) => {
            error!("Failed to load settings: {}", e);
            AppConfig::default()
        }
    }
}

/// Save application settings, creating the config directory if needed.
pub fn save_settings(config: &AppConfig) -> Result<()> {
    let path = settings_file_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::ConfigWriteFailed(format!("{}: {}", parent.display(), e)))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }
    config.save_to_file(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_config() -> ApConfiguration {
        ApConfiguration::new(
            "SetupAP",
            "changeme123",
            "192.168.50.0/24".parse().unwrap(),
            ip_to_u32("192.168.50.1").unwrap(),
        )
    }

    #[test]
    fn test_ap_config_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ApConfigStore::new(dir.path().join("ap.conf"));

        store.save(&sample_config()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, sample_config());
    }

    #[test]
    fn test_parse_ignores_comments_and_unknown_keys() {
        let content = "\
# managed by netident
AP_SSID=\"SetupAP\"
AP_PASSPHRASE=\"changeme123\"
AP_SUBNET=\"192.168.50.0/24\"
AP_GATEWAY=\"192.168.50.1\"
AP_CHANNEL=\"6\"
";
        let config = parse_ap_config(content).unwrap();
        assert_eq!(config.ssid, "SetupAP");
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        let content = "AP_SSID=\"SetupAP\"\n";
        assert!(parse_ap_config(content).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_subnet() {
        let content = "\
AP_SSID=\"SetupAP\"
AP_PASSPHRASE=\"changeme123\"
AP_SUBNET=\"not-a-subnet\"
AP_GATEWAY=\"192.168.50.1\"
";
        assert!(parse_ap_config(content).is_err());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let store = ApConfigStore::new(dir.path().join("absent.conf"));
        assert!(matches!(store.load(), Err(Error::ConfigReadFailed(_))));
    }

    #[test]
    fn test_load_settings_from_missing_path_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = load_settings_from(&dir.path().join("absent.toml"));
        assert_eq!(config.probe_timeout_secs, 1);
    }
}
