#![forbid(unsafe_code)]

//! Emission estimation engine: factor table, per-category calculators,
//! the aggregate summary, and the persisted carbon state store.

pub mod calculators;
pub mod config;
pub mod error;
pub mod factors;
pub mod profile;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod summary;

pub use calculators::{
    compute_electricity_emission, compute_lpg_emission, compute_travel_emission, PeriodEmission,
    TravelEmission,
};
pub use config::EngineConfig;
pub use error::{StoreError, UnknownTransportMode};
pub use factors::{EmissionFactorTable, TransportMode};
pub use profile::{ProfileStore, UserProfile};
pub use snapshot::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use state::{CarbonState, CategoryPatch, ElectricityInput, LpgInput, TravelInput, TravelPatch};
pub use store::CarbonStore;
pub use summary::{Benchmark, Category, ChartSlice, EmissionSummary};
