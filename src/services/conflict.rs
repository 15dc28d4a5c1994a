// NetIdent - Subnet Conflict Detector
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Conflict detection between a candidate subnet and active subnets.
//!
//! The historical behavior compares subnets as strings: a candidate is
//! rejected only when it is textually identical to an active subnet, so a
//! /24 candidate inside an active /8 passes. That behavior is preserved as
//! the default policy; the stricter range-intersection test is available
//! behind `ConflictPolicy::Overlap`.

use tracing::{debug, warn};

use crate::models::addr::CidrBlock;
use crate::models::{ConflictPolicy, ValidationOutcome};

/// Detector for address-space collisions with the host's active subnets.
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    policy: ConflictPolicy,
}

impl ConflictDetector {
    /// Create a detector with the given policy.
    pub fn new(policy: ConflictPolicy) -> Self {
        Self { policy }
    }

    /// Check a candidate subnet against the active subnet list.
    ///
    /// Returns `SubnetConflict` naming the first active subnet that
    /// collides, else `Valid`. The candidate's syntax is not validated
    /// here; under the exact policy a malformed candidate simply never
    /// matches, which is the documented ordering of the AP validator.
    pub fn check(&self, candidate: &str, active_subnets: &[String]) -> ValidationOutcome {
        for active in active_subnets {
            let collides = match self.policy {
                ConflictPolicy::Exact => candidate == active,
                ConflictPolicy::Overlap => Self::ranges_overlap(candidate, active),
            };
            if collides {
                debug!("Candidate {} collides with active {}", candidate, active);
                return ValidationOutcome::SubnetConflict(active.clone());
            }
        }

        ValidationOutcome::Valid
    }

    /// True range intersection between two CIDR strings.
    ///
    /// Unparseable inputs fall back to textual comparison so the overlap
    /// policy is never weaker than the exact one.
    fn ranges_overlap(candidate: &str, active: &str) -> bool {
        let candidate_block: Option<CidrBlock> = candidate.parse().ok();
        let active_block: Option<CidrBlock> = active.parse().ok();

        match (candidate_block, active_block) {
            (Some(c), Some(a)) => c.overlaps(&a),
            _ => {
                warn!(
                    "Falling back to exact comparison for {} vs {}",
                    candidate, active
                );
                candidate == active
            }
        }
    }
}
