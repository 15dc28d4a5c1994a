// NetIdent - AP Configuration Validator
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Accept/reject decisions for candidate Access Point configurations.
//!
//! Three checks run in a fixed order, short-circuiting on the first
//! rejection: subnet conflict against active interfaces, format and
//! membership validation, then a reachability probe of the candidate
//! gateway. Conflict runs before format, so a malformed candidate that
//! happens to equal an active subnet string reports the conflict.
//!
//! The probe performs a real network operation and may block up to its
//! timeout.

use tracing::{debug, info};

use crate::models::validation::validate_subnet;
use crate::models::{ApConfiguration, ConflictPolicy, Result, ValidationOutcome};
use crate::network_utils::ActiveSubnets;
use crate::services::conflict::ConflictDetector;
use crate::services::probe::ReachabilityProbe;

/// Validator for candidate AP configurations.
pub struct ApValidator<S, P> {
    subnets: S,
    probe: P,
    detector: ConflictDetector,
}

impl<S: ActiveSubnets, P: ReachabilityProbe> ApValidator<S, P> {
    /// Create a validator over the given collaborators.
    pub fn new(subnets: S, probe: P, policy: ConflictPolicy) -> Self {
        Self {
            subnets,
            probe,
            detector: ConflictDetector::new(policy),
        }
    }

    /// Validate a candidate subnet and gateway pair.
    pub fn validate_candidate(&self, cidr: &str, gateway: &str) -> Result<ValidationOutcome> {
        let active = self.subnets.active_subnets()?;
        debug!("Active subnets: {:?}", active);

        let conflict = self.detector.check(cidr, &active);
        if !conflict.is_valid() {
            info!("Rejecting {}: {}", cidr, conflict.describe());
            return Ok(conflict);
        }

        let format = validate_subnet(cidr, gateway);
        if !format.is_valid() {
            info!("Rejecting {} / {}: {}", cidr, gateway, format.describe());
            return Ok(format);
        }

        if self.probe.is_reachable(gateway) {
            info!("Rejecting gateway {}: address answered a probe", gateway);
            return Ok(ValidationOutcome::GatewayInUse);
        }

        debug!("Candidate {} / {} accepted", cidr, gateway);
        Ok(ValidationOutcome::Valid)
    }

    /// Validate a complete AP configuration.
    ///
    /// Same ordering as [`validate_candidate`](Self::validate_candidate),
    /// with SSID and passphrase syntax folded into the format stage.
    pub fn validate_config(&self, config: &ApConfiguration) -> Result<ValidationOutcome> {
        let cidr = config.subnet.to_string();
        let gateway = config.gateway_str();

        let active = self.subnets.active_subnets()?;
        let conflict = self.detector.check(&cidr, &active);
        if !conflict.is_valid() {
            info!("Rejecting {}: {}", cidr, conflict.describe());
            return Ok(conflict);
        }

        let syntax = config.validate_syntax();
        if !syntax.is_valid() {
            info!("Rejecting AP config: {}", syntax.describe());
            return Ok(syntax);
        }

        let format = validate_subnet(&cidr, &gateway);
        if !format.is_valid() {
            info!("Rejecting {} / {}: {}", cidr, gateway, format.describe());
            return Ok(format);
        }

        if self.probe.is_reachable(&gateway) {
            info!("Rejecting gateway {}: address answered a probe", gateway);
            return Ok(ValidationOutcome::GatewayInUse);
        }

        info!("AP configuration for {} accepted", config.ssid);
        Ok(ValidationOutcome::Valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::addr::ip_to_u32;
    use std::cell::Cell;

    struct StaticSubnets(Vec<String>);

    impl ActiveSubnets for StaticSubnets {
        fn active_subnets(&self) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct StaticProbe {
        reachable: bool,
        probed: Cell<bool>,
    }

    impl StaticProbe {
        fn new(reachable: bool) -> Self {
            Self {
                reachable,
                probed: Cell::new(false),
            }
        }
    }

    impl ReachabilityProbe for StaticProbe {
        fn is_reachable(&self, _address: &str) -> bool {
            self.probed.set(true);
            self.reachable
        }
    }

    fn validator(
        active: &[&str],
        reachable: bool,
    ) -> ApValidator<StaticSubnets, StaticProbe> {
        ApValidator::new(
            StaticSubnets(active.iter().map(|s| s.to_string()).collect()),
            StaticProbe::new(reachable),
            ConflictPolicy::Exact,
        )
    }

    #[test]
    fn test_clean_candidate_is_valid() {
        let v = validator(&["192.168.1.0/24"], false);
        let outcome = v
            .validate_candidate("192.168.50.0/24", "192.168.50.254")
            .unwrap();
        assert_eq!(outcome, ValidationOutcome::Valid);
    }

    #[test]
    fn test_conflict_checked_before_format() {
        // The gateway is malformed, but the conflict is reported first.
        let v = validator(&["192.168.50.0/24"], false);
        let outcome = v
            .validate_candidate("192.168.50.0/24", "not-an-address")
            .unwrap();
        assert_eq!(
            outcome,
            ValidationOutcome::SubnetConflict("192.168.50.0/24".to_string())
        );
        assert!(!v.probe.probed.get());
    }

    #[test]
    fn test_format_checked_before_probe() {
        let v = validator(&[], false);
        let outcome = v
            .validate_candidate("192.168.50.0/24", "192.168.51.1")
            .unwrap();
        assert!(matches!(outcome, ValidationOutcome::InvalidFormat(_)));
        assert!(!v.probe.probed.get());
    }

    #[test]
    fn test_live_gateway_is_rejected() {
        let v = validator(&[], true);
        let outcome = v
            .validate_candidate("192.168.50.0/24", "192.168.50.1")
            .unwrap();
        assert_eq!(outcome, ValidationOutcome::GatewayInUse);
    }

    #[test]
    fn test_full_config_rejects_bad_passphrase_before_probe() {
        let v = validator(&[], true);
        let config = ApConfiguration::new(
            "SetupAP",
            "short",
            "192.168.50.0/24".parse().unwrap(),
            ip_to_u32("192.168.50.1").unwrap(),
        );
        let outcome = v.validate_config(&config).unwrap();
        assert!(matches!(outcome, ValidationOutcome::InvalidFormat(_)));
        assert!(!v.probe.probed.get());
    }

    #[test]
    fn test_full_config_accepted() {
        let v = validator(&["192.168.1.0/24"], false);
        let config = ApConfiguration::new(
            "SetupAP",
            "changeme123",
            "192.168.50.0/24".parse().unwrap(),
            ip_to_u32("192.168.50.254").unwrap(),
        );
        assert_eq!(v.validate_config(&config).unwrap(), ValidationOutcome::Valid);
    }
}
