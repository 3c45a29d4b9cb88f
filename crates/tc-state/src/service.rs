//! Single-writer state service.
//!
//! The replay engine is the only writer; listeners observe block-added and
//! parse-complete notifications and may read, but never mutate. Snapshots
//! leave the owner exclusively through [`StateService::clone_state`], so a
//! queued persistence write can never alias live state.

use crate::chain_state::ChainState;
use crate::errors::StateError;
use parking_lot::RwLock;
use shared_types::{
    Block, BlockHash, Cycle, Issuance, OutputType, ParamChangeEvent, Tx, TxOutput, TxOutputKey,
    TxType,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Observer of chain-state progress.
///
/// Callbacks run on the replay thread, after the mutation they report has
/// been applied.
pub trait ChainStateListener: Send + Sync {
    fn on_block_added(&self, block: &Block) {
        let _ = block;
    }
    fn on_parse_complete(&self) {}
}

/// Owner of the live [`ChainState`].
pub struct StateService {
    state: RwLock<ChainState>,
    listeners: RwLock<Vec<Arc<dyn ChainStateListener>>>,
}

impl StateService {
    pub fn new(genesis_height: u64) -> Self {
        Self {
            state: RwLock::new(ChainState::new(genesis_height)),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn add_listener(&self, listener: Arc<dyn ChainStateListener>) {
        self.listeners.write().push(listener);
    }

    // === MUTATION API (replay thread only) ===

    /// Append a confirmed block. The first block must be the genesis block;
    /// every further block must extend the head by exactly one.
    pub fn add_block(&self, block: Block) -> Result<(), StateError> {
        {
            let mut state = self.state.write();
            match state.chain_head_height() {
                None => {
                    if block.height != state.genesis_height {
                        return Err(StateError::BlockBeforeGenesis {
                            genesis: state.genesis_height,
                            actual: block.height,
                        });
                    }
                }
                Some(head) => {
                    if block.height != head + 1 {
                        return Err(StateError::NonContiguousBlock {
                            expected: head + 1,
                            actual: block.height,
                        });
                    }
                }
            }
            for tx in &block.txs {
                state.tx_heights.insert(tx.id.clone(), block.height);
            }
            // Blocks are immutable once confirmed; the Arc lets snapshots
            // share them instead of deep-copying the whole chain.
            state.blocks.insert(block.height, Arc::new(block.clone()));
            debug!(height = block.height, txs = block.txs.len(), "block added");
        }
        // Notify outside the write lock; listeners may read state.
        for listener in self.listeners.read().iter() {
            listener.on_block_added(&block);
        }
        Ok(())
    }

    /// Signal that initial chain parsing has completed.
    pub fn notify_parse_complete(&self) {
        info!("initial chain parsing complete");
        for listener in self.listeners.read().iter() {
            listener.on_parse_complete();
        }
    }

    pub fn set_output_type(&self, key: &TxOutputKey, output_type: OutputType) {
        self.state
            .write()
            .output_types
            .insert(key.clone(), output_type);
    }

    pub fn set_tx_type(&self, tx_id: impl Into<String>, tx_type: TxType) {
        self.state.write().tx_types.insert(tx_id.into(), tx_type);
    }

    /// Append a cycle. Cycles must stay contiguous in height order.
    pub fn add_cycle(&self, cycle: Cycle) -> Result<(), StateError> {
        let mut state = self.state.write();
        if let Some(last) = state.cycles.last() {
            if cycle.height_of_first_block != last.height_of_last_block() + 1 {
                return Err(StateError::CycleOutOfOrder {
                    last: last.height_of_last_block(),
                    actual: cycle.height_of_first_block,
                });
            }
        }
        debug!(
            first = cycle.height_of_first_block,
            last = cycle.height_of_last_block(),
            "cycle added"
        );
        state.cycles.push(cycle);
        Ok(())
    }

    /// Record an issuance. At most one issuance can ever exist per output;
    /// replays of the same vote result are no-ops.
    pub fn add_issuance(&self, issuance: Issuance) -> bool {
        let mut state = self.state.write();
        if state.issuances.contains_key(&issuance.output_key) {
            debug!(output = %issuance.output_key, "issuance already recorded, skipping");
            return false;
        }
        state.issuances.insert(issuance.output_key.clone(), issuance);
        true
    }

    pub fn add_param_change_event(&self, event: ParamChangeEvent) {
        self.state.write().param_change_events.push(event);
    }

    /// Replace live state with a persisted snapshot (startup path).
    pub fn apply_snapshot(&self, snapshot: ChainState) {
        info!(
            head = ?snapshot.chain_head_height(),
            "applying persisted snapshot"
        );
        *self.state.write() = snapshot;
    }

    /// Drop all blocks above `height` and discard cycles whose first block
    /// exceeds the new head (reorg handling).
    pub fn revert_to_height(&self, height: u64) {
        let mut state = self.state.write();
        let removed: Vec<u64> = state
            .blocks
            .range(height + 1..)
            .map(|(&h, _)| h)
            .collect();
        for h in &removed {
            if let Some(block) = state.blocks.remove(h) {
                for tx in &block.txs {
                    state.tx_heights.remove(&tx.id);
                    state.tx_types.remove(&tx.id);
                    for output in &tx.outputs {
                        state.output_types.remove(&output.key());
                    }
                }
            }
        }
        state.cycles.retain(|cycle| cycle.height_of_first_block <= height);
        if !removed.is_empty() {
            warn!(new_head = height, blocks_removed = removed.len(), "state reverted");
        }
    }

    // === READ API ===

    pub fn genesis_height(&self) -> u64 {
        self.state.read().genesis_height
    }

    pub fn chain_head_height(&self) -> Option<u64> {
        self.state.read().chain_head_height()
    }

    pub fn cycles(&self) -> Vec<Cycle> {
        self.state.read().cycles.clone()
    }

    pub fn output_type(&self, key: &TxOutputKey) -> OutputType {
        self.state.read().output_type(key)
    }

    pub fn tx_type(&self, tx_id: &str) -> TxType {
        self.state.read().tx_type(tx_id)
    }

    pub fn tx(&self, tx_id: &str) -> Option<Tx> {
        self.state.read().tx(tx_id).cloned()
    }

    pub fn tx_block_height(&self, tx_id: &str) -> Option<u64> {
        self.state.read().tx_block_height(tx_id)
    }

    pub fn is_confirmed(&self, tx_id: &str) -> bool {
        self.state.read().is_confirmed(tx_id)
    }

    pub fn block_hash_at(&self, height: u64) -> Option<BlockHash> {
        self.state.read().block_hash_at(height)
    }

    pub fn issuance_candidates(&self) -> Vec<TxOutput> {
        self.state.read().issuance_candidates()
    }

    pub fn issuance_for(&self, key: &TxOutputKey) -> Option<Issuance> {
        self.state.read().issuances.get(key).cloned()
    }

    pub fn param_change_events_at(&self, height: u64) -> Vec<ParamChangeEvent> {
        self.state.read().param_change_events_at(height)
    }

    /// Defensive deep clone of the complete live state.
    pub fn clone_state(&self) -> ChainState {
        self.state.read().clone()
    }
}
