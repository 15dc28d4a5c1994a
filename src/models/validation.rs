// NetIdent - Validation Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Input validation for candidate subnets, gateways, and hostnames.
//!
//! These checks are pure and deterministic; they never touch the network.
//! Live checks (conflict detection, gateway probing) are orchestrated in
//! the service layer on top of the validators here.

use once_cell::sync::Lazy;
use regex::Regex;

use super::addr::{ip_to_u32, u32_to_ip, CidrBlock};
use super::outcome::ValidationOutcome;

/// Dotted-decimal shape gate. Octet ranges are checked numerically after.
static DOTTED_QUAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("valid regex"));

/// CIDR shape gate: dotted quad, slash, 1-2 digit prefix.
static CIDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}/\d{1,2}$").expect("valid regex"));

/// Validate a candidate subnet and gateway pair.
///
/// Checks syntax of both inputs, then verifies the gateway falls within
/// the subnet's address range (network and broadcast inclusive).
pub fn validate_subnet(cidr: &str, gateway: &str) -> ValidationOutcome {
    if !CIDR_RE.is_match(cidr) {
        return ValidationOutcome::InvalidFormat(format!(
            "subnet must be in CIDR form a.b.c.d/prefix: {}",
            cidr
        ));
    }

    let block: CidrBlock = match cidr.parse() {
        Ok(block) => block,
        Err(_) => {
            return ValidationOutcome::InvalidFormat(format!(
                "subnet octets must be 0-255 and prefix 0-32: {}",
                cidr
            ));
        }
    };

    if !DOTTED_QUAD_RE.is_match(gateway) {
        return ValidationOutcome::InvalidFormat(format!(
            "gateway must be a dotted-decimal address: {}",
            gateway
        ));
    }

    let gateway_int = match ip_to_u32(gateway) {
        Ok(value) => value,
        Err(_) => {
            return ValidationOutcome::InvalidFormat(format!(
                "gateway octets must be 0-255: {}",
                gateway
            ));
        }
    };

    if !block.contains(gateway_int) {
        return ValidationOutcome::InvalidFormat(format!(
            "gateway {} is outside subnet {} ({} - {})",
            gateway,
            cidr,
            u32_to_ip(block.network()),
            u32_to_ip(block.broadcast())
        ));
    }

    ValidationOutcome::Valid
}

/// Validate a proposed hostname.
///
/// Accepts 1-63 characters from `[a-zA-Z0-9-]` with no leading or
/// trailing `-` or `.`.
pub fn validate_hostname(hostname: &str) -> ValidationOutcome {
    if hostname.is_empty() {
        return ValidationOutcome::InvalidFormat("hostname cannot be empty".to_string());
    }

    if hostname.len() > 63 {
        return ValidationOutcome::InvalidFormat(format!(
            "hostname must be 1-63 characters: {} is {}",
            hostname,
            hostname.len()
        ));
    }

    if hostname.starts_with('-')
        || hostname.ends_with('-')
        || hostname.starts_with('.')
        || hostname.ends_with('.')
    {
        return ValidationOutcome::InvalidFormat(format!(
            "hostname cannot start or end with '-' or '.': {}",
            hostname
        ));
    }

    if let Some(bad) = hostname
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
    {
        return ValidationOutcome::InvalidFormat(format!(
            "hostname contains invalid character '{}': {}",
            bad, hostname
        ));
    }

    ValidationOutcome::Valid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_subnet_accepts_in_range_gateway() {
        assert!(validate_subnet("192.168.1.0/24", "192.168.1.1").is_valid());
        assert!(validate_subnet("10.3.141.0/24", "10.3.141.254").is_valid());
    }

    #[test]
    fn test_validate_subnet_boundaries_are_inclusive() {
        assert!(validate_subnet("192.168.1.0/24", "192.168.1.0").is_valid());
        assert!(validate_subnet("192.168.1.0/24", "192.168.1.255").is_valid());
    }

    #[test]
    fn test_validate_subnet_rejects_out_of_range_gateway() {
        let outcome = validate_subnet("192.168.1.0/24", "192.168.2.1");
        match outcome {
            ValidationOutcome::InvalidFormat(reason) => {
                assert!(reason.contains("outside subnet"));
            }
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_subnet_rejects_bad_syntax() {
        assert!(!validate_subnet("192.168.1.0", "192.168.1.1").is_valid());
        assert!(!validate_subnet("192.168.1.0/33", "192.168.1.1").is_valid());
        assert!(!validate_subnet("192.168.1.0/24", "192.168.1").is_valid());
        assert!(!validate_subnet("256.168.1.0/24", "192.168.1.1").is_valid());
        assert!(!validate_subnet("192.168.1.0/24", "192.168.1.999").is_valid());
    }

    #[test]
    fn test_validate_hostname_accepts_good_names() {
        assert!(validate_hostname("good-host1").is_valid());
        assert!(validate_hostname("a").is_valid());
        assert!(validate_hostname("HOST42").is_valid());
    }

    #[test]
    fn test_validate_hostname_rejects_bad_names() {
        assert!(!validate_hostname("").is_valid());
        assert!(!validate_hostname("-bad-").is_valid());
        assert!(!validate_hostname(".bad").is_valid());
        assert!(!validate_hostname("bad.").is_valid());
        assert!(!validate_hostname("under_score").is_valid());
        assert!(!validate_hostname("spaced name").is_valid());
        assert!(!validate_hostname(&"x".repeat(64)).is_valid());
    }

    #[test]
    fn test_validate_hostname_length_boundary() {
        assert!(validate_hostname(&"x".repeat(63)).is_valid());
    }
}
