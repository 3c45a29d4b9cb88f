//! Bridge between the synchronous replay thread and the async snapshot
//! worker.
//!
//! The replay thread must never wait on storage, but the candidate clone
//! has to happen before replay advances past the notified height.
//! [`SnapshotTrigger`] is a `ChainStateListener` that runs the manager's
//! candidate step synchronously on the callback and forwards the snapshot
//! due for persistence over an unbounded channel; [`run_snapshot_worker`]
//! drains the channel and performs the store writes. The manager holds the
//! state owner weakly, so dropping the owner drops the trigger with the
//! listener list, closes the channel and lets the worker drain and exit.

use crate::manager::SnapshotManager;
use crate::ports::SnapshotStore;
use shared_types::Block;
use std::sync::Arc;
use tc_state::{ChainState, ChainStateListener};
use tokio::sync::mpsc;
use tracing::error;

/// Listener side: clones on the replay thread, queues for persistence.
pub struct SnapshotTrigger<S: SnapshotStore> {
    manager: Arc<SnapshotManager<S>>,
    sender: mpsc::UnboundedSender<ChainState>,
}

impl<S: SnapshotStore> SnapshotTrigger<S> {
    pub fn channel(
        manager: Arc<SnapshotManager<S>>,
    ) -> (Self, mpsc::UnboundedReceiver<ChainState>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { manager, sender }, receiver)
    }
}

impl<S: SnapshotStore> ChainStateListener for SnapshotTrigger<S> {
    fn on_block_added(&self, block: &Block) {
        if let Some(snapshot) = self.manager.on_block_added(block.height) {
            // Receiver dropped means the worker shut down; nothing to do.
            let _ = self.sender.send(snapshot);
        }
    }
}

/// Worker side: persists queued snapshots until the trigger is dropped.
pub async fn run_snapshot_worker<S: SnapshotStore>(
    manager: Arc<SnapshotManager<S>>,
    mut receiver: mpsc::UnboundedReceiver<ChainState>,
) {
    while let Some(snapshot) = receiver.recv().await {
        let head = snapshot.chain_head_height();
        if let Err(e) = manager.persist(snapshot).await {
            error!(head = ?head, error = %e, "snapshot persistence failed");
        }
    }
}
