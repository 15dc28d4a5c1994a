// NetIdent - Reachability Probe
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Gateway reachability probing.
//!
//! A candidate AP gateway must not answer a probe: an address that replies
//! is already claimed by some other host. The AP validator consumes this
//! check through the [`ReachabilityProbe`] trait; [`PingProbe`] is the
//! production implementation.

use std::process::Command;

use tracing::debug;

/// A bounded-time reachability check against a single address.
pub trait ReachabilityProbe {
    /// True when the address answered within the probe timeout.
    fn is_reachable(&self, address: &str) -> bool;
}

/// Probe implementation using the system ping command.
#[derive(Debug, Clone)]
pub struct PingProbe {
    timeout_secs: u32,
}

impl PingProbe {
    /// Create a probe with the given per-attempt timeout.
    pub fn new(timeout_secs: u32) -> Self {
        // ping rejects a zero timeout
        Self {
            timeout_secs: timeout_secs.max(1),
        }
    }
}

impl Default for PingProbe {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ReachabilityProbe for PingProbe {
    fn is_reachable(&self, address: &str) -> bool {
        let timeout = self.timeout_secs.to_string();
        let result = Command::new("ping")
            .args(["-c", "1", "-W", &timeout, address])
            .output();

        match result {
            Ok(output) => output.status.success(),
            Err(e) => {
                debug!("Ping command failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_is_clamped() {
        let probe = PingProbe::new(0);
        assert_eq!(probe.timeout_secs, 1);
    }
}
