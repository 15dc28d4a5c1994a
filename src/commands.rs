// NetIdent - Command Handlers
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! One handler per CLI subcommand.
//!
//! Handlers wire user-supplied strings into the core workflows, display
//! the resulting outcome variants, and map them to exit codes. They hold
//! no logic of their own.

use tracing::error;

use crate::models::addr::ip_to_u32;
use crate::models::{
    ApConfiguration, AppConfig, CidrBlock, ConflictPolicy, ConnectOutcome, Credential,
};
use crate::network_utils::{detect_network_adapters, detect_wifi_interface, ActiveSubnets, InterfaceEnumerator};
use crate::nm_client::{NetworkManagerOps, NmcliClient};
use crate::services::{ApValidator, HostnamePropagator, PingProbe, WifiReconciler};
use crate::storage::ApConfigStore;

/// Show detected adapters and the active subnets.
pub fn status(settings: &AppConfig) -> i32 {
    let adapters = detect_network_adapters();
    if adapters.is_empty() {
        println!("No network adapters detected.");
    } else {
        println!("Adapters:");
        for adapter in &adapters {
            let state = if adapter.is_connected { "up" } else { "down" };
            println!("  {:<6} {}", state, adapter.display_label());
        }
    }

    match InterfaceEnumerator::new().active_subnets() {
        Ok(subnets) if subnets.is_empty() => println!("No active IPv4 subnets."),
        Ok(subnets) => {
            println!("Active subnets:");
            for subnet in subnets {
                println!("  {}", subnet);
            }
        }
        Err(e) => {
            error!("Failed to enumerate subnets: {}", e);
            return 1;
        }
    }

    let client = nm_client(settings);
    match client.active_ssid() {
        Ok(Some(ssid)) => println!("Connected to: {}", ssid),
        Ok(None) => println!("Not connected to any wireless network."),
        Err(e) => error!("Failed to query active connection: {}", e),
    }

    0
}

/// List visible networks with signal strength.
pub fn scan(settings: &AppConfig) -> i32 {
    let client = nm_client(settings);
    match client.scan_networks() {
        Ok(networks) if networks.is_empty() => {
            println!("No networks found.");
            0
        }
        Ok(networks) => {
            for network in networks {
                let security = network.security.as_deref().unwrap_or("open");
                println!("{:>3}%  {:<32} {}", network.signal, network.ssid, security);
            }
            0
        }
        Err(e) => {
            error!("Scan failed: {}", e);
            1
        }
    }
}

/// Validate a candidate AP subnet and gateway.
pub fn validate_ap(settings: &AppConfig, cidr: &str, gateway: &str) -> i32 {
    let validator = ApValidator::new(
        InterfaceEnumerator::new(),
        PingProbe::new(settings.probe_timeout_secs),
        settings.conflict_policy,
    );

    match validator.validate_candidate(cidr, gateway) {
        Ok(outcome) => {
            println!("{}", outcome.describe());
            if outcome.is_valid() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            error!("Validation could not run: {}", e);
            1
        }
    }
}

/// Validate a full AP configuration and persist it when accepted.
pub fn set_ap(
    settings: &AppConfig,
    ssid: &str,
    passphrase: &str,
    cidr: &str,
    gateway: &str,
) -> i32 {
    let subnet: CidrBlock = match cidr.parse() {
        Ok(block) => block,
        Err(e) => {
            println!("invalid format: {}", e);
            return 1;
        }
    };
    let gateway_int = match ip_to_u32(gateway) {
        Ok(value) => value,
        Err(e) => {
            println!("invalid format: {}", e);
            return 1;
        }
    };

    let config = ApConfiguration::new(ssid, passphrase, subnet, gateway_int);
    let validator = ApValidator::new(
        InterfaceEnumerator::new(),
        PingProbe::new(settings.probe_timeout_secs),
        settings.conflict_policy,
    );

    let outcome = match validator.validate_config(&config) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Validation could not run: {}", e);
            return 1;
        }
    };

    if !outcome.is_valid() {
        println!("{}", outcome.describe());
        return 1;
    }

    let store = ApConfigStore::new(&settings.ap_config_path);
    match store.save(&config) {
        Ok(()) => {
            println!("AP configuration saved.");
            0
        }
        Err(e) => {
            error!("Failed to save AP configuration: {}", e);
            1
        }
    }
}

/// Reconcile a chosen network against stored profiles and connect.
pub fn join(settings: &AppConfig, ssid: &str, passphrase: Option<&str>) -> i32 {
    let reconciler = WifiReconciler::new(nm_client(settings));
    let credential = passphrase.map(Credential::new);

    match reconciler.reconcile(ssid, credential) {
        ConnectOutcome::Connected => {
            println!("Connected to {}.", ssid);
            0
        }
        ConnectOutcome::Unchanged => {
            println!("Profile for {} left unchanged.", ssid);
            0
        }
        ConnectOutcome::Failed(reason) => {
            println!("Connection failed: {}", reason);
            1
        }
    }
}

/// Validate a hostname and propagate it to the system identity stores.
pub fn hostname(name: &str) -> i32 {
    let propagator = HostnamePropagator::new();
    match propagator.propagate(name) {
        Ok(report) => {
            for step in &report.steps {
                println!("{:<28} {:<8} {}", step.step, step.status.as_str(), step.message);
            }
            if report.all_succeeded() {
                0
            } else {
                println!("{} step(s) failed.", report.error_count());
                1
            }
        }
        Err(e) => {
            println!("{}", e);
            1
        }
    }
}

/// Show or change the subnet conflict policy.
pub fn policy(settings: &mut AppConfig, value: Option<&str>) -> i32 {
    let policy = match value {
        None => {
            println!("{}", settings.conflict_policy.as_str());
            return 0;
        }
        Some("exact") => ConflictPolicy::Exact,
        Some("overlap") => ConflictPolicy::Overlap,
        Some(other) => {
            eprintln!("Unknown policy: {} (expected exact or overlap)", other);
            return 1;
        }
    };

    settings.conflict_policy = policy;
    match crate::storage::save_settings(settings) {
        Ok(()) => {
            println!("Conflict policy set to {}.", policy.as_str());
            0
        }
        Err(e) => {
            error!("Failed to save settings: {}", e);
            1
        }
    }
}

/// Build an nmcli client pinned to the configured or detected interface.
fn nm_client(settings: &AppConfig) -> NmcliClient {
    match detect_wifi_interface(settings.wifi_interface.as_deref()) {
        Some(interface) => NmcliClient::with_interface(interface),
        None => NmcliClient::new(),
    }
}
