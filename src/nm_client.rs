// NetIdent - Network Manager Client
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Client for the system network manager.
//!
//! All WiFi client operations go through NetworkManager's `nmcli` tool:
//! scanning, stored profile lookup, credential updates, connecting, and
//! profile deletion. The reconciler consumes these operations through the
//! [`NetworkManagerOps`] trait; [`NmcliClient`] is the production
//! implementation. The manager treats each call as an independent command;
//! no atomicity is assumed across calls.

use std::process::Command;

use tracing::{debug, info, warn};

use crate::models::{Credential, Error, Result, WifiNetwork, WifiProfile};

/// Operations the reconciler needs from the system network manager.
///
/// Contract note: a profile is persisted by the manager as a side effect
/// of a *successful* `connect_or_create`; a failed attempt is expected to
/// leave no profile behind. This is the manager's documented behavior and
/// is not independently verified here.
pub trait NetworkManagerOps {
    /// Scan for visible networks with signal strength.
    fn scan_networks(&self) -> Result<Vec<WifiNetwork>>;

    /// Look up a stored wireless profile by connection name.
    fn find_profile(&self, name: &str) -> Result<Option<WifiProfile>>;

    /// Replace the stored PSK of a profile.
    fn update_profile_psk(&self, name: &str, credential: &Credential) -> Result<()>;

    /// Bring up a connection using a stored profile.
    fn connect_profile(&self, name: &str) -> Result<()>;

    /// Connect to a network by SSID and credential; on success the manager
    /// persists a profile named after the SSID.
    fn connect_or_create(&self, ssid: &str, credential: &Credential) -> Result<()>;

    /// Delete a stored profile.
    fn delete_profile(&self, name: &str) -> Result<()>;

    /// SSID of the currently active wireless connection, if any.
    fn active_ssid(&self) -> Result<Option<String>>;
}

/// Production network manager client backed by `nmcli`.
#[derive(Debug, Default)]
pub struct NmcliClient {
    /// Wireless interface to pin operations to (optional).
    interface: Option<String>,
}

impl NmcliClient {
    /// Create a client that lets NetworkManager pick the interface.
    pub fn new() -> Self {
        Self { interface: None }
    }

    /// Create a client pinned to a specific wireless interface.
    pub fn with_interface(interface: impl Into<String>) -> Self {
        Self {
            interface: Some(interface.into()),
        }
    }

    /// Run nmcli with the given arguments and return stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        debug!("nmcli {}", args.join(" "));
        let output = Command::new("nmcli")
            .args(args)
            .output()
            .map_err(|e| Error::command_failed("nmcli", e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::command_failed("nmcli", stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl NetworkManagerOps for NmcliClient {
    fn scan_networks(&self) -> Result<Vec<WifiNetwork>> {
        // SIGNAL and SECURITY first: the SSID is the remainder and may
        // itself contain separators.
        let mut args = vec!["-t", "-f", "SIGNAL,SECURITY,SSID", "device", "wifi", "list"];
        if let Some(iface) = &self.interface {
            args.extend(["ifname", iface.as_str()]);
        }
        let stdout = self.run(&args)?;
        Ok(parse_scan_output(&stdout))
    }

    fn find_profile(&self, name: &str) -> Result<Option<WifiProfile>> {
        let stdout = self.run(&["-t", "-f", "NAME,TYPE", "connection", "show"])?;

        for line in stdout.lines() {
            let (profile_name, profile_type) = match line.rsplit_once(':') {
                Some(parts) => parts,
                None => continue,
            };
            let profile_name = unescape_terse(profile_name);
            if profile_name == name && profile_type.contains("wireless") {
                debug!("Found stored profile for {}", name);
                // NetworkManager names profiles after the SSID on creation.
                return Ok(Some(WifiProfile::new(profile_name, name)));
            }
        }

        debug!("No stored profile for {}", name);
        Ok(None)
    }

    fn update_profile_psk(&self, name: &str, credential: &Credential) -> Result<()> {
        info!("Updating stored credential for profile {}", name);
        self.run(&[
            "connection",
            "modify",
            name,
            "wifi-sec.psk",
            credential.expose(),
        ])?;
        Ok(())
    }

    fn connect_profile(&self, name: &str) -> Result<()> {
        info!("Connecting using stored profile {}", name);
        self.run(&["connection", "up", name])
            .map_err(|e| Error::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    fn connect_or_create(&self, ssid: &str, credential: &Credential) -> Result<()> {
        info!("Connecting to {} (new profile)", ssid);
        let mut args = vec!["device", "wifi", "connect", ssid, "password"];
        args.push(credential.expose());
        if let Some(iface) = &self.interface {
            args.extend(["ifname", iface.as_str()]);
        }
        self.run(&args)
            .map_err(|e| Error::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    fn delete_profile(&self, name: &str) -> Result<()> {
        info!("Deleting profile {}", name);
        self.run(&["connection", "delete", name])?;
        Ok(())
    }

    fn active_ssid(&self) -> Result<Option<String>> {
        let stdout = self.run(&["-t", "-f", "ACTIVE,SSID", "device", "wifi", "list"])?;

        for line in stdout.lines() {
            if let Some(ssid) = line.strip_prefix("yes:") {
                let ssid = unescape_terse(ssid);
                if !ssid.is_empty() {
                    return Ok(Some(ssid));
                }
            }
        }
        Ok(None)
    }
}

/// Parse `nmcli -t -f SIGNAL,SECURITY,SSID device wifi list` output.
///
/// Networks with empty (hidden) SSIDs are skipped; duplicate SSIDs keep
/// the strongest signal. The result is sorted strongest-first.
fn parse_scan_output(output: &str) -> Vec<WifiNetwork> {
    let mut networks: Vec<WifiNetwork> = Vec::new();

    for line in output.lines() {
        let mut parts = line.splitn(3, ':');
        let signal = parts.next().and_then(|s| s.parse::<u8>().ok());
        let security = parts.next().map(|s| s.to_string());
        let ssid = parts.next().map(unescape_terse);

        let (signal, ssid) = match (signal, ssid) {
            (Some(signal), Some(ssid)) if !ssid.is_empty() => (signal, ssid),
            _ => {
                if !line.is_empty() {
                    warn!("Skipping unparseable scan line: {}", line);
                }
                continue;
            }
        };

        match networks.iter_mut().find(|n| n.ssid == ssid) {
            Some(existing) => {
                if signal > existing.signal {
                    existing.signal = signal;
                }
            }
            None => {
                let mut network = WifiNetwork::new(ssid, signal);
                network.security = security.filter(|s| !s.is_empty());
                networks.push(network);
            }
        }
    }

    networks.sort_by(|a, b| b.signal.cmp(&a.signal));
    networks
}

/// Undo nmcli's terse-mode escaping of `:` and `\`.
fn unescape_terse(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
