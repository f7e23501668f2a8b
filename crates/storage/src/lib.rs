#![forbid(unsafe_code)]

pub mod repository;
pub mod rest;
pub mod snapshot;

pub use repository::{
    InMemoryProfileRepository, ProfileChange, ProfileRecord, ProfileRepository, StorageError,
};
pub use rest::{BackendConfig, PROFILES_SETUP_SQL, RestProfileRepository};
pub use snapshot::{InMemorySnapshotStore, JsonSnapshotStore, SNAPSHOT_KEY, Snapshot, SnapshotStore};
