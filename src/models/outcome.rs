// NetIdent - Operation Outcomes
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Outcome types for validation, reconciliation, and propagation.
//!
//! Rejections are values, not errors: every validation path ends in an
//! explicit variant the caller can display and act on. Outcomes are created
//! fresh per call and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of validating a candidate configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The candidate is safe to use.
    Valid,
    /// Malformed or out-of-range input, with the reason.
    InvalidFormat(String),
    /// The candidate subnet collides with an active one.
    SubnetConflict(String),
    /// The candidate gateway address answered a reachability probe.
    GatewayInUse,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Human-readable description for CLI display.
    pub fn describe(&self) -> String {
        match self {
            Self::Valid => "valid".to_string(),
            Self::InvalidFormat(reason) => format!("invalid format: {}", reason),
            Self::SubnetConflict(subnet) => {
                format!("conflicts with active subnet {}", subnet)
            }
            Self::GatewayInUse => "gateway address is already in use".to_string(),
        }
    }
}

/// Terminal outcome of a WiFi reconciliation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The host is connected to the requested network.
    Connected,
    /// The attempt failed; any profile created or rewritten during this
    /// attempt has already been cleaned up.
    Failed(String),
    /// An existing profile was left untouched.
    Unchanged,
}

/// Status of a single propagation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step completed successfully.
    Success,
    /// Step failed; later steps still run.
    Error,
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Result of a single step in a multi-step propagation workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Step name (e.g. "write /etc/hostname").
    pub step: String,
    /// Step status.
    pub status: StepStatus,
    /// Human-readable message.
    pub message: String,
    /// Timestamp when the step ran.
    pub ran_at: DateTime<Utc>,
}

impl StepOutcome {
    /// Create a success outcome.
    pub fn success(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Success,
            message: message.into(),
            ran_at: Utc::now(),
        }
    }

    /// Create an error outcome.
    pub fn error(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Error,
            message: message.into(),
            ran_at: Utc::now(),
        }
    }
}

/// Overall report of a sequential, non-transactional propagation.
///
/// Steps are independent: a failed step is recorded and surfaced but does
/// not roll back steps that already completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropagationReport {
    /// Individual step outcomes, in execution order.
    pub steps: Vec<StepOutcome>,
}

impl PropagationReport {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a step outcome.
    pub fn push(&mut self, outcome: StepOutcome) {
        self.steps.push(outcome);
    }

    /// True when every step succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.status.is_success())
    }

    /// Count failed steps.
    pub fn error_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| !s.status.is_success())
            .count()
    }
}
