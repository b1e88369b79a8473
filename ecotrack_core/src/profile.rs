use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreError;
use crate::snapshot::SnapshotStore;

const FALLBACK_NAME: &str = "User";

/// Local account record. Sign-in is a stub: nothing is verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub is_logged_in: bool,
}

impl UserProfile {
    pub fn sign_in(name: &str, email: &str) -> Self {
        let name = name.trim();
        UserProfile {
            name: if name.is_empty() {
                FALLBACK_NAME.to_string()
            } else {
                name.to_string()
            },
            email: email.trim().to_string(),
            is_logged_in: true,
        }
    }
}

/// Persists the signed-in profile separately from the carbon state.
#[derive(Debug)]
pub struct ProfileStore<S: SnapshotStore> {
    current: Option<UserProfile>,
    backend: S,
}

impl<S: SnapshotStore> ProfileStore<S> {
    /// Corrupt or absent data means "signed out".
    pub fn open(backend: S) -> Self {
        let current = match backend.load() {
            Ok(Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!(error = %e, "discarding corrupt profile snapshot");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "profile snapshot unreadable");
                None
            }
        };
        ProfileStore { current, backend }
    }

    pub fn current(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    pub fn sign_in(&mut self, name: &str, email: &str) -> Result<&UserProfile, StoreError> {
        let profile = UserProfile::sign_in(name, email);
        self.backend.save(&serde_json::to_string(&profile)?)?;
        Ok(self.current.insert(profile))
    }

    pub fn sign_out(&mut self) -> Result<(), StoreError> {
        self.backend.clear()?;
        self.current = None;
        Ok(())
    }
}
