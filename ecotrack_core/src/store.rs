use tracing::{debug, warn};

use crate::error::StoreError;
use crate::factors::EmissionFactorTable;
use crate::snapshot::SnapshotStore;
use crate::state::{CarbonState, CategoryPatch};
use crate::summary::EmissionSummary;

/// Holder of the current [`CarbonState`].
///
/// `patch` and `reset` are the only mutators. Each one persists the full
/// new state before committing it in memory, so a failed save leaves the
/// previous state observable and nothing in between.
#[derive(Debug)]
pub struct CarbonStore<S: SnapshotStore> {
    state: CarbonState,
    factors: EmissionFactorTable,
    backend: S,
}

impl<S: SnapshotStore> CarbonStore<S> {
    /// Restores the last snapshot. Absent, unreadable or corrupt data falls
    /// back to defaults; startup never fails on it.
    pub fn open(backend: S) -> Self {
        Self::open_with_factors(backend, EmissionFactorTable::STANDARD)
    }

    pub fn open_with_factors(backend: S, factors: EmissionFactorTable) -> Self {
        let state = match backend.load() {
            Ok(Some(raw)) => match serde_json::from_str::<CarbonState>(&raw) {
                Ok(state) => state,
                Err(e) => {
                    warn!(error = %e, "discarding corrupt carbon snapshot, using defaults");
                    CarbonState::default()
                }
            },
            Ok(None) => CarbonState::default(),
            Err(e) => {
                warn!(error = %e, "carbon snapshot unreadable, using defaults");
                CarbonState::default()
            }
        };
        CarbonStore {
            state,
            factors,
            backend,
        }
    }

    pub fn get(&self) -> CarbonState {
        self.state
    }

    pub fn factors(&self) -> &EmissionFactorTable {
        &self.factors
    }

    /// Recomputed on every call.
    pub fn summary(&self) -> EmissionSummary {
        EmissionSummary::from_state(&self.state, &self.factors)
    }

    pub fn patch(&mut self, patch: impl Into<CategoryPatch>) -> Result<CarbonState, StoreError> {
        let patch = patch.into();
        let next = self.state.apply(&patch);
        self.commit(next)?;
        debug!(category = patch.category_name(), "carbon state patched");
        Ok(self.state)
    }

    pub fn reset(&mut self) -> Result<CarbonState, StoreError> {
        self.commit(CarbonState::default())?;
        debug!("carbon state reset to defaults");
        Ok(self.state)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    fn commit(&mut self, next: CarbonState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&next)?;
        self.backend.save(&raw)?;
        self.state = next;
        Ok(())
    }
}
