// NetIdent - Hostname Propagation
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Propagation of a validated hostname to the system identity stores.
//!
//! The steps form an ordered list and each is best-effort: a failure is
//! recorded in the report and later steps still run. The stores are
//! independent system files and services with no shared transaction, so
//! no rollback is synthesized across them.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tracing::{info, warn};

use crate::models::validation::validate_hostname;
use crate::models::{Error, PropagationReport, Result, StepOutcome};

/// The loopback address conventionally bound to the hostname.
const HOSTS_LOOPBACK: &str = "127.0.1.1";

/// One step of the propagation workflow.
#[derive(Debug, Clone)]
pub struct PropagationStep {
    /// Step name for reporting.
    pub name: String,
    /// What the step does.
    pub action: StepAction,
}

/// Action a propagation step performs.
#[derive(Debug, Clone)]
pub enum StepAction {
    /// Overwrite a hostname file with the new name.
    WriteHostnameFile(PathBuf),
    /// Rewrite the `127.0.1.1` line of a hosts file.
    UpdateHostsFile(PathBuf),
    /// Run an external command with the hostname appended as the final
    /// argument.
    RunCommand(Vec<String>),
    /// Run an external command as-is.
    RunFixedCommand(Vec<String>),
    /// Set an environment variable of the current session to the hostname.
    SetSessionEnv(String),
}

/// Hostname propagation workflow.
#[derive(Debug, Clone)]
pub struct HostnamePropagator {
    steps: Vec<PropagationStep>,
}

impl HostnamePropagator {
    /// The standard system step list: host name service, name resolution
    /// file, session environment, name-service daemon.
    pub fn new() -> Self {
        Self {
            steps: vec![
                PropagationStep {
                    name: "write /etc/hostname".to_string(),
                    action: StepAction::WriteHostnameFile(PathBuf::from("/etc/hostname")),
                },
                PropagationStep {
                    name: "hostnamectl set-hostname".to_string(),
                    action: StepAction::RunCommand(vec![
                        "hostnamectl".to_string(),
                        "set-hostname".to_string(),
                    ]),
                },
                PropagationStep {
                    name: "update /etc/hosts".to_string(),
                    action: StepAction::UpdateHostsFile(PathBuf::from("/etc/hosts")),
                },
                PropagationStep {
                    name: "set session HOSTNAME".to_string(),
                    action: StepAction::SetSessionEnv("HOSTNAME".to_string()),
                },
                PropagationStep {
                    name: "restart mDNS responder".to_string(),
                    action: StepAction::RunFixedCommand(vec![
                        "systemctl".to_string(),
                        "restart".to_string(),
                        "avahi-daemon".to_string(),
                    ]),
                },
            ],
        }
    }

    /// Build a workflow from an explicit step list.
    pub fn with_steps(steps: Vec<PropagationStep>) -> Self {
        Self { steps }
    }

    /// Validate the hostname, then run every step in order.
    ///
    /// Returns an error only for invalid input; execution results are in
    /// the report, one entry per step in order.
    pub fn propagate(&self, hostname: &str) -> Result<PropagationReport> {
        let outcome = validate_hostname(hostname);
        if !outcome.is_valid() {
            return Err(Error::InvalidHostname(outcome.describe()));
        }

        info!("Propagating hostname {}", hostname);
        let mut report = PropagationReport::new();

        for step in &self.steps {
            match run_step(&step.action, hostname) {
                Ok(message) => {
                    report.push(StepOutcome::success(&step.name, message));
                }
                Err(reason) => {
                    warn!("Step '{}' failed: {}", step.name, reason);
                    report.push(StepOutcome::error(&step.name, reason));
                }
            }
        }

        Ok(report)
    }
}

impl Default for HostnamePropagator {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute one step action.
fn run_step(action: &StepAction, hostname: &str) -> std::result::Result<String, String> {
    match action {
        StepAction::WriteHostnameFile(path) => {
            fs::write(path, format!("{}\n", hostname)).map_err(|e| e.to_string())?;
            Ok(format!("wrote {}", path.display()))
        }
        StepAction::UpdateHostsFile(path) => {
            let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
            let updated = rewrite_hosts(&content, hostname);
            fs::write(path, updated).map_err(|e| e.to_string())?;
            Ok(format!("updated {}", path.display()))
        }
        StepAction::RunCommand(argv) => run_command(argv, Some(hostname)),
        StepAction::RunFixedCommand(argv) => run_command(argv, None),
        StepAction::SetSessionEnv(var) => {
            std::env::set_var(var, hostname);
            Ok(format!("set {}", var))
        }
    }
}

/// Run a command, optionally appending the hostname.
fn run_command(argv: &[String], hostname: Option<&str>) -> std::result::Result<String, String> {
    let program = argv.first().ok_or_else(|| "empty command".to_string())?;
    let mut command = Command::new(program);
    command.args(&argv[1..]);
    if let Some(hostname) = hostname {
        command.arg(hostname);
    }

    let output = command.output().map_err(|e| e.to_string())?;
    if output.status.success() {
        Ok(format!("{} succeeded", program))
    } else {
        Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}

/// Replace (or append) the `127.0.1.1` line binding the hostname.
fn rewrite_hosts(content: &str, hostname: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut replaced = false;

    for line in content.lines() {
        if line.trim_start().starts_with(HOSTS_LOOPBACK) {
            lines.push(format!("{}\t{}", HOSTS_LOOPBACK, hostname));
            replaced = true;
        } else {
            lines.push(line.to_string());
        }
    }

    if !replaced {
        lines.push(format!("{}\t{}", HOSTS_LOOPBACK, hostname));
    }

    let mut result = lines.join("\n");
    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_invalid_hostname_is_rejected_before_any_step() {
        let propagator = HostnamePropagator::with_steps(vec![]);
        assert!(propagator.propagate("-bad-").is_err());
    }

    #[test]
    fn test_rewrite_hosts_replaces_existing_line() {
        let content = "127.0.0.1\tlocalhost\n127.0.1.1\toldname\n";
        let updated = rewrite_hosts(content, "newname");
        assert!(updated.contains("127.0.1.1\tnewname"));
        assert!(!updated.contains("oldname"));
        assert!(updated.contains("127.0.0.1\tlocalhost"));
    }

    #[test]
    fn test_rewrite_hosts_appends_when_missing() {
        let updated = rewrite_hosts("127.0.0.1\tlocalhost\n", "newname");
        assert!(updated.ends_with("127.0.1.1\tnewname\n"));
    }

    #[test]
    fn test_propagate_writes_files() {
        let dir = tempdir().unwrap();
        let hostname_path = dir.path().join("hostname");
        let hosts_path = dir.path().join("hosts");
        fs::write(&hosts_path, "127.0.0.1\tlocalhost\n").unwrap();

        let propagator = HostnamePropagator::with_steps(vec![
            PropagationStep {
                name: "write hostname".to_string(),
                action: StepAction::WriteHostnameFile(hostname_path.clone()),
            },
            PropagationStep {
                name: "update hosts".to_string(),
                action: StepAction::UpdateHostsFile(hosts_path.clone()),
            },
            PropagationStep {
                name: "set session env".to_string(),
                action: StepAction::SetSessionEnv("NETIDENT_TEST_HOSTNAME".to_string()),
            },
        ]);

        let report = propagator.propagate("good-host1").unwrap();
        assert!(report.all_succeeded());
        assert_eq!(fs::read_to_string(&hostname_path).unwrap(), "good-host1\n");
        assert!(fs::read_to_string(&hosts_path)
            .unwrap()
            .contains("127.0.1.1\tgood-host1"));
        assert_eq!(
            std::env::var("NETIDENT_TEST_HOSTNAME").as_deref(),
            Ok("good-host1")
        );
    }

    #[test]
    fn test_failed_step_does_not_stop_later_steps() {
        let dir = tempdir().unwrap();
        let hostname_path = dir.path().join("hostname");
        let missing_hosts = dir.path().join("missing/hosts");

        let propagator = HostnamePropagator::with_steps(vec![
            PropagationStep {
                name: "update hosts".to_string(),
                action: StepAction::UpdateHostsFile(missing_hosts),
            },
            PropagationStep {
                name: "write hostname".to_string(),
                action: StepAction::WriteHostnameFile(hostname_path.clone()),
            },
        ]);

        let report = propagator.propagate("good-host1").unwrap();
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.error_count(), 1);
        // The later step still ran.
        assert!(hostname_path.exists());
        assert!(!report.steps[0].status.is_success());
        assert!(report.steps[1].status.is_success());
    }
}
