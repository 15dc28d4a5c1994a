// NetIdent - Core Services
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Validation and reconciliation services.
//!
//! This module contains the workflows that sit between user input and the
//! external network collaborators:
//! - Conflict: candidate subnet vs. active subnet collision detection
//! - Probe: bounded-time gateway reachability check
//! - ApValidator: accept/reject decisions for AP configurations
//! - Reconciler: stored profile reconciliation for client connections
//! - Hostname: best-effort propagation to system identity stores

pub mod ap_validator;
pub mod conflict;
pub mod hostname;
pub mod probe;
pub mod reconciler;

pub use ap_validator::ApValidator;
pub use conflict::ConflictDetector;
pub use hostname::HostnamePropagator;
pub use probe::{PingProbe, ReachabilityProbe};
pub use reconciler::WifiReconciler;
