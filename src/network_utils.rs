// NetIdent - Network Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Network interface detection and utilities.
//!
//! This module provides functions to detect and query network interfaces
//! on the system using the Linux sysfs interface, and to enumerate the
//! IPv4 subnets currently active on them. The conflict detector consumes
//! the enumeration through the [`ActiveSubnets`] trait so it can be tested
//! without touching the host.

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::models::adapter::{AdapterInfo, AdapterType};
use crate::models::{Error, Result};

/// Source of the host's currently active IPv4 subnets, in CIDR form.
pub trait ActiveSubnets {
    /// List active subnets as `a.b.c.d/p` strings.
    fn active_subnets(&self) -> Result<Vec<String>>;
}

/// Production enumerator backed by `ip -o -4 addr show`.
#[derive(Debug, Default)]
pub struct InterfaceEnumerator;

impl InterfaceEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl ActiveSubnets for InterfaceEnumerator {
    fn active_subnets(&self) -> Result<Vec<String>> {
        let output = Command::new("ip")
            .args(["-o", "-4", "addr", "show"])
            .output()
            .map_err(|e| Error::command_failed("ip addr show", e.to_string()))?;

        if !output.status.success() {
            return Err(Error::command_failed(
                "ip addr show",
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_active_subnets(&stdout))
    }
}

/// Parse `ip -o -4 addr show` output into subnet strings.
///
/// Each line looks like:
/// `2: eth0    inet 192.168.1.42/24 brd 192.168.1.255 scope global eth0`
/// Loopback addresses are skipped; duplicates are collapsed.
fn parse_active_subnets(output: &str) -> Vec<String> {
    let mut subnets = Vec::new();

    for line in output.lines() {
        let mut fields = line.split_whitespace();
        let _index = fields.next();
        let ifname = match fields.next() {
            Some(name) => name,
            None => continue,
        };
        if ifname == "lo" {
            continue;
        }

        // The CIDR follows the "inet" keyword.
        let mut rest = fields;
        while let Some(field) = rest.next() {
            if field == "inet" {
                if let Some(cidr) = rest.next() {
                    let subnet = normalize_subnet(cidr);
                    match subnet {
                        Some(s) => {
                            if !subnets.contains(&s) {
                                subnets.push(s);
                            }
                        }
                        None => warn!("Skipping unparseable address on {}: {}", ifname, cidr),
                    }
                }
                break;
            }
        }
    }

    subnets
}

/// Reduce an interface address like `192.168.1.42/24` to its subnet in
/// network-address form (`192.168.1.0/24`).
fn normalize_subnet(cidr: &str) -> Option<String> {
    use crate::models::addr::{u32_to_ip, CidrBlock};

    let block: CidrBlock = cidr.parse().ok()?;
    Some(format!("{}/{}", u32_to_ip(block.network()), block.prefix))
}

/// Detect all network adapters on the system.
///
/// Reads from /sys/class/net to find all network interfaces and determines
/// their type (Ethernet, WiFi, etc.) and current state.
pub fn detect_network_adapters() -> Vec<AdapterInfo> {
    let mut adapters = Vec::new();
    let net_path = Path::new("/sys/class/net");

    if let Ok(entries) = fs::read_dir(net_path) {
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();

            // Skip loopback for the primary list
            if name == "lo" {
                continue;
            }

            let adapter_type = determine_adapter_type(&entry.path(), &name);

            // Skip virtual/tunnel interfaces
            if matches!(adapter_type, AdapterType::Virtual | AdapterType::Loopback) {
                continue;
            }

            let mut info = AdapterInfo::new(&name, adapter_type);

            // Read MAC address
            let address_path = entry.path().join("address");
            if let Ok(mac) = fs::read_to_string(&address_path) {
                let mac = mac.trim().to_uppercase();
                if !mac.is_empty() && mac != "00:00:00:00:00:00" {
                    info.mac_address = Some(mac);
                }
            }

            // Read operational state (up/down)
            let operstate_path = entry.path().join("operstate");
            if let Ok(state) = fs::read_to_string(&operstate_path) {
                info.is_connected = state.trim() == "up";
            }

            // Driver name as the description, when exposed
            let driver_path = entry.path().join("device").join("driver");
            if let Ok(driver_link) = fs::read_link(&driver_path) {
                if let Some(driver_name) = driver_link.file_name() {
                    info.description = Some(driver_name.to_string_lossy().to_string());
                }
            }

            adapters.push(info);
        }
    }

    // Sort by name for consistent ordering
    adapters.sort_by(|a, b| natural_sort_key(&a.name).cmp(&natural_sort_key(&b.name)));

    adapters
}

/// Find the wireless interface the host should use.
///
/// Honors an explicit override first, then picks the first detected WiFi
/// adapter.
pub fn detect_wifi_interface(override_name: Option<&str>) -> Option<String> {
    if let Some(name) = override_name {
        debug!("Using configured wireless interface {}", name);
        return Some(name.to_string());
    }

    detect_network_adapters()
        .into_iter()
        .find(|a| a.adapter_type == AdapterType::Wifi)
        .map(|a| a.name)
}

/// Determine the type of network adapter.
fn determine_adapter_type(path: &Path, name: &str) -> AdapterType {
    // Check for wireless by looking for wireless directory
    let wireless_path = path.join("wireless");
    if wireless_path.exists() {
        return AdapterType::Wifi;
    }

    // Check uevent file for device type
    let uevent_path = path.join("uevent");
    if let Ok(uevent) = fs::read_to_string(&uevent_path) {
        if uevent.contains("DEVTYPE=wlan") {
            return AdapterType::Wifi;
        }
    }

    // Check type file (1 = Ethernet/ARPHRD_ETHER)
    let type_path = path.join("type");
    if let Ok(type_str) = fs::read_to_string(&type_path) {
        let type_num: u32 = type_str.trim().parse().unwrap_or(0);
        match type_num {
            1 => {
                if is_virtual_interface(name) {
                    return AdapterType::Virtual;
                }
                return AdapterType::Ethernet;
            }
            772 => return AdapterType::Loopback, // ARPHRD_LOOPBACK
            _ => {}
        }
    }

    // Check name patterns for WiFi
    if name.starts_with("wl") || name.starts_with("wlan") || name.starts_with("wifi") {
        return AdapterType::Wifi;
    }

    if is_virtual_interface(name) {
        return AdapterType::Virtual;
    }

    // Default to Ethernet for physical-looking names
    if name.starts_with("en") || name.starts_with("eth") {
        return AdapterType::Ethernet;
    }

    AdapterType::Other
}

/// Check if interface name suggests a virtual/tunnel interface.
fn is_virtual_interface(name: &str) -> bool {
    name.starts_with("veth")
        || name.starts_with("br")
        || name.starts_with("virbr")
        || name.starts_with("docker")
        || name.starts_with("vnet")
        || name.starts_with("tun")
        || name.starts_with("tap")
        || name.starts_with("bond")
        || name.starts_with("team")
        || name.starts_with("vlan")
        || name.contains("podman")
}

/// Generate a sort key that sorts numbers naturally.
fn natural_sort_key(s: &str) -> (String, u32) {
    let mut prefix = String::new();
    let mut num_str = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            num_str.push(c);
        } else if num_str.is_empty() {
            prefix.push(c);
        }
    }

    let num: u32 = num_str.parse().unwrap_or(0);
    (prefix, num)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_sort_key() {
        assert_eq!(natural_sort_key("eth0"), ("eth".to_string(), 0));
        assert_eq!(natural_sort_key("eth10"), ("eth".to_string(), 10));
        assert_eq!(natural_sort_key("wlan1"), ("wlan".to_string(), 1));
    }

    #[test]
    fn test_parse_active_subnets() {
        let output = "\
1: lo    inet 127.0.0.1/8 scope host lo\\       valid_lft forever preferred_lft forever
2: eth0    inet 192.168.1.42/24 brd 192.168.1.255 scope global dynamic eth0\\       valid_lft 85962sec preferred_lft 85962sec
3: wlan0    inet 10.3.141.1/24 brd 10.3.141.255 scope global wlan0\\       valid_lft forever preferred_lft forever
";
        let subnets = parse_active_subnets(output);
        assert_eq!(subnets, vec!["192.168.1.0/24", "10.3.141.0/24"]);
    }

    #[test]
    fn test_parse_active_subnets_collapses_duplicates() {
        let output = "\
2: eth0    inet 192.168.1.42/24 brd 192.168.1.255 scope global eth0
2: eth0    inet 192.168.1.43/24 brd 192.168.1.255 scope global secondary eth0
";
        let subnets = parse_active_subnets(output);
        assert_eq!(subnets, vec!["192.168.1.0/24"]);
    }

    #[test]
    fn test_parse_active_subnets_skips_garbage() {
        let subnets = parse_active_subnets("2: eth0    inet not-an-address scope global\n");
        assert!(subnets.is_empty());
    }

    #[test]
    fn test_normalize_subnet() {
        assert_eq!(
            normalize_subnet("192.168.1.42/24").as_deref(),
            Some("192.168.1.0/24")
        );
        assert_eq!(normalize_subnet("bogus"), None);
    }
}
