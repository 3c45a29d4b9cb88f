//! Snapshot manager.
//!
//! Grid math plus the two-step candidate logic: at each qualifying height
//! the previously held candidate is handed out for persistence and a fresh
//! clone of the current live state becomes the new candidate. The persisted
//! snapshot therefore always lags the chain head by at least one grid
//! interval.
//!
//! The candidate step ([`SnapshotManager::on_block_added`]) is synchronous
//! and must run on the replay thread, so the clone captures the state
//! exactly as it was at the notified height. Only serialization and the
//! store write ([`SnapshotManager::persist`]) belong off the replay path.

use crate::errors::SnapshotError;
use crate::ports::SnapshotStore;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tc_state::{ChainState, StateService};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct SnapshotConfig {
    /// Snapshot grid size in blocks.
    pub grid: u64,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self { grid: 10_000 }
    }
}

pub struct SnapshotManager<S: SnapshotStore> {
    /// Weak handle: the manager is owned by the async side and must not keep
    /// the state owner (and with it the listener list) alive, or the trigger
    /// channel would never close on shutdown.
    state: Weak<StateService>,
    store: Arc<S>,
    config: SnapshotConfig,
    /// In-memory candidate from the previous qualifying height.
    candidate: Mutex<Option<ChainState>>,
}

impl<S: SnapshotStore> SnapshotManager<S> {
    pub fn new(state: &Arc<StateService>, store: Arc<S>, config: SnapshotConfig) -> Self {
        Self {
            state: Arc::downgrade(state),
            store,
            config,
            candidate: Mutex::new(None),
        }
    }

    /// The height whose snapshot would currently be persisted.
    ///
    /// `genesis + 3 * grid` is the floor so the very first persisted
    /// snapshot never lands closer than two grid intervals to genesis.
    /// Division is integer (floor) division.
    pub fn snapshot_height(genesis_height: u64, height: u64, grid: u64) -> u64 {
        (genesis_height + 3 * grid).max(height) / grid * grid - grid
    }

    pub fn is_snapshot_height(genesis_height: u64, height: u64, grid: u64) -> bool {
        height % grid == 0 && height >= Self::snapshot_height(genesis_height, height, grid)
    }

    /// Handle a block-added notification at `chain_head_height`.
    ///
    /// At a qualifying height: hand out the previous candidate (if it is
    /// from an earlier height), then replace it with a clone of current live
    /// state. Must be called on the replay thread before the chain advances
    /// past `chain_head_height`; the returned snapshot is due for
    /// [`SnapshotManager::persist`] and is never touched again.
    pub fn on_block_added(&self, chain_head_height: u64) -> Option<ChainState> {
        let state = self.state.upgrade()?;
        let genesis = state.genesis_height();
        if !Self::is_snapshot_height(genesis, chain_head_height, self.config.grid) {
            return None;
        }

        let mut candidate = self.candidate.lock();
        let stale = candidate
            .as_ref()
            .map(|c| c.chain_head_height() != Some(chain_head_height))
            .unwrap_or(false);
        let previous = if stale { candidate.take() } else { None };
        if previous.is_some() || candidate.is_none() {
            *candidate = Some(state.clone_state());
            debug!(height = chain_head_height, "cloned new snapshot candidate");
        }
        previous
    }

    /// Serialize and save a snapshot handed out by
    /// [`SnapshotManager::on_block_added`].
    pub async fn persist(&self, snapshot: ChainState) -> Result<(), SnapshotError> {
        let bytes = bincode::serialize(&snapshot)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        self.store.save(bytes).await?;
        info!(
            snapshot_head = ?snapshot.chain_head_height(),
            "persisted snapshot candidate"
        );
        Ok(())
    }

    /// Startup path: apply the newest persisted snapshot if one exists.
    ///
    /// Returns the snapshot's head height (replay resumes at head + 1), or
    /// `None` when there is no snapshot and replay starts from genesis.
    pub async fn apply_latest(&self) -> Result<Option<u64>, SnapshotError> {
        let state = self.state.upgrade().ok_or(SnapshotError::StateGone)?;
        match self.store.load_latest().await? {
            Some(bytes) => {
                let snapshot: ChainState = bincode::deserialize(&bytes)
                    .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
                let head = snapshot.chain_head_height();
                info!(head = ?head, "applying persisted snapshot");
                state.apply_snapshot(snapshot);
                Ok(head)
            }
            None => {
                info!("no stored snapshot available, full replay from genesis");
                Ok(None)
            }
        }
    }
}
