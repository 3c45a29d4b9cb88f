//! # tc-snapshots
//!
//! Snapshot checkpointer for the Tally-Chain DAO chain state.
//!
//! ## Role in System
//!
//! Periodically persists a defensive clone of chain state at grid-aligned
//! heights, lagged by at least one full grid interval so a persisted
//! snapshot is always safe against reorganizations shallower than that lag.
//! On restart the newest persisted snapshot is applied and replay resumes
//! from its head + 1; with no snapshot, replay starts from genesis.
//!
//! Persistence runs off the replay thread, which is why only immutable
//! clones ever reach the store: the replay thread keeps mutating live state
//! while a save is in flight.

pub mod adapters;
pub mod errors;
pub mod listener;
pub mod manager;
pub mod ports;

pub use adapters::InMemorySnapshotStore;
pub use errors::SnapshotError;
pub use listener::{run_snapshot_worker, SnapshotTrigger};
pub use manager::{SnapshotConfig, SnapshotManager};
pub use ports::SnapshotStore;
