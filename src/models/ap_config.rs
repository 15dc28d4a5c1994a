// NetIdent - Access Point Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Access Point configuration model.
//!
//! An `ApConfiguration` is the complete description of the hosted network:
//! SSID, WPA passphrase, subnet, and gateway. It is a value type owned by
//! the calling workflow; the configuration store reads one snapshot at
//! workflow start and persists one at workflow end.

use super::addr::{u32_to_ip, CidrBlock};
use super::outcome::ValidationOutcome;

/// SSID length limits per 802.11.
pub const SSID_MIN_LEN: usize = 1;
pub const SSID_MAX_LEN: usize = 32;

/// WPA passphrase length limits.
pub const PASSPHRASE_MIN_LEN: usize = 8;
pub const PASSPHRASE_MAX_LEN: usize = 63;

/// A complete Access Point configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApConfiguration {
    /// Network name broadcast by the AP.
    pub ssid: String,
    /// WPA passphrase.
    pub passphrase: String,
    /// Subnet served by the AP.
    pub subnet: CidrBlock,
    /// Gateway address inside the subnet.
    pub gateway: u32,
}

impl ApConfiguration {
    /// Create a new configuration.
    pub fn new(
        ssid: impl Into<String>,
        passphrase: impl Into<String>,
        subnet: CidrBlock,
        gateway: u32,
    ) -> Self {
        Self {
            ssid: ssid.into(),
            passphrase: passphrase.into(),
            subnet,
            gateway,
        }
    }

    /// Gateway in dotted-decimal form.
    pub fn gateway_str(&self) -> String {
        u32_to_ip(self.gateway)
    }

    /// Check every syntactic rule of the configuration.
    ///
    /// Conflict detection and gateway probing are live checks and belong
    /// to the AP validator service; this covers only what can be decided
    /// from the values themselves.
    pub fn validate_syntax(&self) -> ValidationOutcome {
        let ssid = validate_ssid(&self.ssid);
        if !ssid.is_valid() {
            return ssid;
        }

        let passphrase = validate_passphrase(&self.passphrase);
        if !passphrase.is_valid() {
            return passphrase;
        }

        if !self.subnet.contains(self.gateway) {
            return ValidationOutcome::InvalidFormat(format!(
                "gateway {} is outside subnet {}",
                self.gateway_str(),
                self.subnet
            ));
        }

        ValidationOutcome::Valid
    }
}

/// Validate an SSID: 1-32 printable characters, no spaces.
pub fn validate_ssid(ssid: &str) -> ValidationOutcome {
    if ssid.len() < SSID_MIN_LEN || ssid.len() > SSID_MAX_LEN {
        return ValidationOutcome::InvalidFormat(format!(
            "SSID must be {}-{} characters",
            SSID_MIN_LEN, SSID_MAX_LEN
        ));
    }

    if !ssid.chars().all(|c| c.is_ascii_graphic()) {
        return ValidationOutcome::InvalidFormat(
            "SSID must contain only printable characters without spaces".to_string(),
        );
    }

    ValidationOutcome::Valid
}

/// Validate a WPA passphrase: 8-63 printable characters, no leading or
/// trailing spaces.
pub fn validate_passphrase(passphrase: &str) -> ValidationOutcome {
    if passphrase.len() < PASSPHRASE_MIN_LEN || passphrase.len() > PASSPHRASE_MAX_LEN {
        return ValidationOutcome::InvalidFormat(format!(
            "passphrase must be {}-{} characters",
            PASSPHRASE_MIN_LEN, PASSPHRASE_MAX_LEN
        ));
    }

    if passphrase.starts_with(' ') || passphrase.ends_with(' ') {
        return ValidationOutcome::InvalidFormat(
            "passphrase cannot start or end with a space".to_string(),
        );
    }

    if !passphrase
        .chars()
        .all(|c| c.is_ascii_graphic() || c == ' ')
    {
        return ValidationOutcome::InvalidFormat(
            "passphrase must contain only printable characters".to_string(),
        );
    }

    ValidationOutcome::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::addr::ip_to_u32;

    fn config(gateway: &str) -> ApConfiguration {
        ApConfiguration::new(
            "SetupAP",
            "changeme123",
            "192.168.50.0/24".parse().unwrap(),
            ip_to_u32(gateway).unwrap(),
        )
    }

    #[test]
    fn test_validate_syntax_accepts_good_config() {
        assert!(config("192.168.50.1").validate_syntax().is_valid());
    }

    #[test]
    fn test_validate_syntax_rejects_external_gateway() {
        assert!(!config("192.168.51.1").validate_syntax().is_valid());
    }

    #[test]
    fn test_validate_ssid() {
        assert!(validate_ssid("SetupAP").is_valid());
        assert!(!validate_ssid("").is_valid());
        assert!(!validate_ssid("has space").is_valid());
        assert!(!validate_ssid(&"x".repeat(33)).is_valid());
        assert!(validate_ssid(&"x".repeat(32)).is_valid());
    }

    #[test]
    fn test_validate_passphrase() {
        assert!(validate_passphrase("changeme123").is_valid());
        assert!(validate_passphrase("pass with spaces").is_valid());
        assert!(!validate_passphrase("short").is_valid());
        assert!(!validate_passphrase(" leading").is_valid());
        assert!(!validate_passphrase("trailing ").is_valid());
        assert!(!validate_passphrase(&"x".repeat(64)).is_valid());
        assert!(validate_passphrase(&"x".repeat(63)).is_valid());
    }
}
