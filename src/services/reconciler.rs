// NetIdent - WiFi Profile Reconciler
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Reconciliation of a chosen network against stored client profiles.
//!
//! A reconciliation attempt starts from a profile lookup and runs one of
//! two paths:
//!
//! - **Existing profile**: an optional new credential may replace the
//!   stored PSK. Without one the profile is left untouched. With one, the
//!   PSK is updated and the profile reconnected; if the reconnect fails
//!   the profile is deleted so no known-bad credential survives.
//! - **No profile**: a credential is required and policy-checked before
//!   any network operation. A single connect call creates the profile as
//!   the manager's side effect; a failed attempt leaves nothing to clean
//!   up.
//!
//! Every path terminates in `Connected`, `Failed`, or `Unchanged`; the
//! call blocks until the manager command completes under the manager's
//! own timeouts.

use tracing::{info, warn};

use crate::models::{ConnectOutcome, Credential, WifiProfile};
use crate::nm_client::NetworkManagerOps;

/// Reconciler over a network manager collaborator.
pub struct WifiReconciler<M> {
    manager: M,
}

impl<M: NetworkManagerOps> WifiReconciler<M> {
    /// Create a reconciler.
    pub fn new(manager: M) -> Self {
        Self { manager }
    }

    /// Reconcile the chosen network name against stored profiles.
    pub fn reconcile(&self, ssid: &str, credential: Option<Credential>) -> ConnectOutcome {
        let profile = match self.manager.find_profile(ssid) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Profile lookup for {} failed: {}", ssid, e);
                return ConnectOutcome::Failed(format!("profile lookup failed: {}", e));
            }
        };

        match profile {
            Some(profile) => self.reconcile_existing(profile, credential),
            None => self.reconcile_new(ssid, credential),
        }
    }

    /// Existing-profile path.
    fn reconcile_existing(
        &self,
        profile: WifiProfile,
        credential: Option<Credential>,
    ) -> ConnectOutcome {
        let credential = match credential {
            Some(credential) => credential,
            None => {
                info!("Profile {} left unchanged", profile.name);
                return ConnectOutcome::Unchanged;
            }
        };

        let policy = credential.validate();
        if !policy.is_valid() {
            return ConnectOutcome::Failed(policy.describe());
        }

        if let Err(e) = self.manager.update_profile_psk(&profile.name, &credential) {
            warn!("Credential update for {} failed: {}", profile.name, e);
            return ConnectOutcome::Failed(format!("credential update failed: {}", e));
        }

        match self.manager.connect_profile(&profile.name) {
            Ok(()) => {
                info!("Connected to {} using updated profile", profile.ssid);
                ConnectOutcome::Connected
            }
            Err(e) => {
                // The stored credential just failed; the profile must not
                // survive with it.
                info!("Connection with updated profile failed, deleting {}", profile.name);
                if let Err(delete_err) = self.manager.delete_profile(&profile.name) {
                    warn!("Cleanup of profile {} failed: {}", profile.name, delete_err);
                }
                ConnectOutcome::Failed(format!("connection failed: {}", e))
            }
        }
    }

    /// No-profile path.
    fn reconcile_new(&self, ssid: &str, credential: Option<Credential>) -> ConnectOutcome {
        let credential = match credential {
            Some(credential) => credential,
            None => {
                return ConnectOutcome::Failed(format!(
                    "no stored profile for {}; a credential is required",
                    ssid
                ));
            }
        };

        let policy = credential.validate();
        if !policy.is_valid() {
            // Rejected before any network operation.
            return ConnectOutcome::Failed(policy.describe());
        }

        match self.manager.connect_or_create(ssid, &credential) {
            Ok(()) => {
                info!("Connected to {} with new profile", ssid);
                ConnectOutcome::Connected
            }
            Err(e) => {
                // The manager persists no profile for a failed attempt.
                ConnectOutcome::Failed(format!("connection failed: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Error, Result, WifiNetwork};
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// In-memory manager that records the command sequence.
    struct MockManager {
        profiles: RefCell<HashSet<String>>,
        connect_succeeds: bool,
        calls: RefCell<Vec<String>>,
    }

    impl MockManager {
        fn new(profiles: &[&str], connect_succeeds: bool) -> Self {
            Self {
                profiles: RefCell::new(profiles.iter().map(|s| s.to_string()).collect()),
                connect_succeeds,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }
    }

    impl NetworkManagerOps for MockManager {
        fn scan_networks(&self) -> Result<Vec<WifiNetwork>> {
            Ok(Vec::new())
        }

        fn find_profile(&self, name: &str) -> Result<Option<WifiProfile>> {
            self.record(format!("find {}", name));
            Ok(self
                .profiles
                .borrow()
                .contains(name)
                .then(|| WifiProfile::new(name, name)))
        }

        fn update_profile_psk(&self, name: &str, _credential: &Credential) -> Result<()> {
            self.record(format!("update {}", name));
            Ok(())
        }

        fn connect_profile(&self, name: &str) -> Result<()> {
            self.record(format!("up {}", name));
            if self.connect_succeeds {
                Ok(())
            } else {
                Err(Error::ConnectionFailed("activation failed".to_string()))
            }
        }

        fn connect_or_create(&self, ssid: &str, _credential: &Credential) -> Result<()> {
            self.record(format!("connect {}", ssid));
            if self.connect_succeeds {
                self.profiles.borrow_mut().insert(ssid.to_string());
                Ok(())
            } else {
                Err(Error::ConnectionFailed("activation failed".to_string()))
            }
        }

        fn delete_profile(&self, name: &str) -> Result<()> {
            self.record(format!("delete {}", name));
            self.profiles.borrow_mut().remove(name);
            Ok(())
        }

        fn active_ssid(&self) -> Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn test_short_credential_rejected_without_connection() {
        let reconciler = WifiReconciler::new(MockManager::new(&[], true));
        let outcome =
            reconciler.reconcile("HomeNet", Some(Credential::new("short")));
        assert!(matches!(outcome, ConnectOutcome::Failed(_)));
        // Lookup only; no connect call was issued.
        assert_eq!(
            *reconciler.manager.calls.borrow(),
            vec!["find HomeNet".to_string()]
        );
    }

    #[test]
    fn test_new_profile_connects() {
        let reconciler = WifiReconciler::new(MockManager::new(&[], true));
        let outcome =
            reconciler.reconcile("HomeNet", Some(Credential::new("changeme123")));
        assert_eq!(outcome, ConnectOutcome::Connected);
        assert_eq!(
            *reconciler.manager.calls.borrow(),
            vec!["find HomeNet".to_string(), "connect HomeNet".to_string()]
        );
    }

    #[test]
    fn test_new_profile_requires_credential() {
        let reconciler = WifiReconciler::new(MockManager::new(&[], true));
        let outcome = reconciler.reconcile("HomeNet", None);
        assert!(matches!(outcome, ConnectOutcome::Failed(_)));
    }

    #[test]
    fn test_existing_profile_without_credential_is_unchanged() {
        let reconciler = WifiReconciler::new(MockManager::new(&["HomeNet"], true));
        let outcome = reconciler.reconcile("HomeNet", None);
        assert_eq!(outcome, ConnectOutcome::Unchanged);
        assert_eq!(
            *reconciler.manager.calls.borrow(),
            vec!["find HomeNet".to_string()]
        );
    }

    #[test]
    fn test_existing_profile_update_and_connect() {
        let reconciler = WifiReconciler::new(MockManager::new(&["HomeNet"], true));
        let outcome =
            reconciler.reconcile("HomeNet", Some(Credential::new("newpassword1")));
        assert_eq!(outcome, ConnectOutcome::Connected);
        assert_eq!(
            *reconciler.manager.calls.borrow(),
            vec![
                "find HomeNet".to_string(),
                "update HomeNet".to_string(),
                "up HomeNet".to_string()
            ]
        );
    }

    #[test]
    fn test_failed_reconnect_deletes_profile() {
        let reconciler = WifiReconciler::new(MockManager::new(&["HomeNet"], false));
        let outcome =
            reconciler.reconcile("HomeNet", Some(Credential::new("newpassword1")));
        assert!(matches!(outcome, ConnectOutcome::Failed(_)));
        assert_eq!(
            *reconciler.manager.calls.borrow(),
            vec![
                "find HomeNet".to_string(),
                "update HomeNet".to_string(),
                "up HomeNet".to_string(),
                "delete HomeNet".to_string()
            ]
        );
        // The broken profile is gone for the next lookup.
        assert_eq!(reconciler.manager.find_profile("HomeNet").unwrap(), None);
    }

    #[test]
    fn test_failed_first_connect_leaves_no_profile() {
        let reconciler = WifiReconciler::new(MockManager::new(&[], false));
        let outcome =
            reconciler.reconcile("HomeNet", Some(Credential::new("changeme123")));
        assert!(matches!(outcome, ConnectOutcome::Failed(_)));
        let calls = reconciler.manager.calls.borrow();
        assert!(!calls.iter().any(|c| c.starts_with("delete")));
        assert!(reconciler.manager.profiles.borrow().is_empty());
    }
}
