// NetIdent - Address Arithmetic
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! IPv4 address arithmetic.
//!
//! Conversions between dotted-decimal strings and 32-bit integers, prefix
//! mask computation, and network/broadcast derivation. Everything in this
//! module is pure; all network I/O lives in the service layer.

use std::fmt;
use std::str::FromStr;

use super::error::{Error, Result};

/// Convert a dotted-decimal IPv4 string to its 32-bit integer form.
///
/// Each octet must be numeric and within 0-255.
pub fn ip_to_u32(address: &str) -> Result<u32> {
    let octets: Vec<&str> = address.split('.').collect();
    if octets.len() != 4 {
        return Err(Error::InvalidIpAddress(address.to_string()));
    }

    let mut value: u32 = 0;
    for octet in octets {
        // Reject empty parts and anything with signs or whitespace.
        if octet.is_empty() || !octet.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidIpAddress(address.to_string()));
        }
        let n: u32 = octet
            .parse()
            .map_err(|_| Error::InvalidIpAddress(address.to_string()))?;
        if n > 255 {
            return Err(Error::InvalidIpAddress(address.to_string()));
        }
        value = (value << 8) | n;
    }

    Ok(value)
}

/// Convert a 32-bit integer back to dotted-decimal form.
pub fn u32_to_ip(value: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (value >> 24) & 0xFF,
        (value >> 16) & 0xFF,
        (value >> 8) & 0xFF,
        value & 0xFF
    )
}

/// Compute a subnet mask with `prefix` leading one-bits.
///
/// Prefix 0 yields the empty mask and prefix 32 the full mask; no
/// shift-by-32 is ever executed.
pub fn mask_from_prefix(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        32 => u32::MAX,
        p => u32::MAX << (32 - p),
    }
}

/// Network address: base AND mask.
pub fn network_address(base: u32, mask: u32) -> u32 {
    base & mask
}

/// Broadcast address: network OR the inverted mask.
pub fn broadcast_address(network: u32, mask: u32) -> u32 {
    network | !mask
}

/// An IPv4 subnet in CIDR form: base address plus prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidrBlock {
    /// Base address as given (not necessarily the network address).
    pub base: u32,
    /// Prefix length, 0-32.
    pub prefix: u8,
}

impl CidrBlock {
    /// Create a block from a base address and prefix length.
    pub fn new(base: u32, prefix: u8) -> Result<Self> {
        if prefix > 32 {
            return Err(Error::InvalidCidr(format!(
                "prefix {} exceeds maximum 32",
                prefix
            )));
        }
        Ok(Self { base, prefix })
    }

    /// Subnet mask for this block's prefix.
    pub fn mask(&self) -> u32 {
        mask_from_prefix(self.prefix)
    }

    /// Network address of this block.
    pub fn network(&self) -> u32 {
        network_address(self.base, self.mask())
    }

    /// Broadcast address of this block.
    pub fn broadcast(&self) -> u32 {
        broadcast_address(self.network(), self.mask())
    }

    /// Check whether an address falls within [network, broadcast].
    pub fn contains(&self, address: u32) -> bool {
        self.network() <= address && address <= self.broadcast()
    }

    /// Check whether this block's address range intersects another's.
    pub fn overlaps(&self, other: &CidrBlock) -> bool {
        self.network() <= other.broadcast() && other.network() <= self.broadcast()
    }
}

impl FromStr for CidrBlock {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            return Err(Error::InvalidCidr(s.to_string()));
        }

        let base = ip_to_u32(parts[0]).map_err(|_| Error::InvalidCidr(s.to_string()))?;
        let prefix: u8 = parts[1]
            .parse()
            .map_err(|_| Error::InvalidCidr(s.to_string()))?;

        Self::new(base, prefix).map_err(|_| Error::InvalidCidr(s.to_string()))
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", u32_to_ip(self.base), self.prefix)
    }
}
