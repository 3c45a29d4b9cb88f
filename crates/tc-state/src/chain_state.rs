//! The replayable chain state as a plain value.
//!
//! `ChainState` carries everything a node derives from replaying the chain:
//! confirmed blocks, the tx index, output and tx classifications, the cycle
//! calendar, issuances, and accumulated parameter-change events. It derives
//! `Clone` and serde so a copy doubles as a snapshot.
//!
//! Confirmed blocks are immutable, so they sit behind `Arc`: cloning the
//! state copies the indexes but shares the block bodies, keeping the
//! snapshot cost proportional to the index size rather than the chain size.

use serde::{Deserialize, Serialize};
use shared_types::{
    Block, BlockHash, Cycle, Issuance, OutputType, ParamChangeEvent, Tx, TxId, TxOutput,
    TxOutputKey, TxType,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainState {
    pub genesis_height: u64,
    /// Confirmed blocks by height, contiguous from genesis. Never mutated
    /// after insertion.
    pub blocks: BTreeMap<u64, Arc<Block>>,
    /// Confirmation height per tx id.
    pub tx_heights: HashMap<TxId, u64>,
    /// Output classifications. Absence means `Unverified`.
    pub output_types: HashMap<TxOutputKey, OutputType>,
    /// Tx classifications. Absence means `Undefined`.
    pub tx_types: HashMap<TxId, TxType>,
    /// The cycle calendar, append-only in height order.
    pub cycles: Vec<Cycle>,
    /// Issuances by the output they were minted against.
    pub issuances: HashMap<TxOutputKey, Issuance>,
    /// Parameter changes produced by vote results, consumed at cycle build.
    pub param_change_events: Vec<ParamChangeEvent>,
}

impl ChainState {
    pub fn new(genesis_height: u64) -> Self {
        Self {
            genesis_height,
            blocks: BTreeMap::new(),
            tx_heights: HashMap::new(),
            output_types: HashMap::new(),
            tx_types: HashMap::new(),
            cycles: Vec::new(),
            issuances: HashMap::new(),
            param_change_events: Vec::new(),
        }
    }

    /// Height of the newest confirmed block, or `None` before the genesis
    /// block has been added.
    pub fn chain_head_height(&self) -> Option<u64> {
        self.blocks.keys().next_back().copied()
    }

    pub fn block_at(&self, height: u64) -> Option<&Block> {
        self.blocks.get(&height).map(|block| block.as_ref())
    }

    pub fn block_hash_at(&self, height: u64) -> Option<BlockHash> {
        self.blocks.get(&height).map(|block| block.hash)
    }

    pub fn tx(&self, tx_id: &str) -> Option<&Tx> {
        let height = self.tx_heights.get(tx_id)?;
        self.blocks
            .get(height)?
            .txs
            .iter()
            .find(|tx| tx.id == tx_id)
    }

    pub fn tx_block_height(&self, tx_id: &str) -> Option<u64> {
        self.tx_heights.get(tx_id).copied()
    }

    pub fn is_confirmed(&self, tx_id: &str) -> bool {
        self.tx_heights.contains_key(tx_id)
    }

    pub fn output_type(&self, key: &TxOutputKey) -> OutputType {
        self.output_types
            .get(key)
            .copied()
            .unwrap_or(OutputType::Unverified)
    }

    pub fn tx_type(&self, tx_id: &str) -> TxType {
        self.tx_types.get(tx_id).copied().unwrap_or(TxType::Undefined)
    }

    /// All outputs currently classified as issuance candidates.
    pub fn issuance_candidates(&self) -> Vec<TxOutput> {
        self.output_types
            .iter()
            .filter(|(_, &output_type)| output_type == OutputType::IssuanceCandidate)
            .filter_map(|(key, _)| self.output(key).cloned())
            .collect()
    }

    pub fn output(&self, key: &TxOutputKey) -> Option<&TxOutput> {
        self.tx(&key.tx_id)?
            .outputs
            .iter()
            .find(|output| output.index == key.index)
    }

    /// Parameter-change events that become effective at `height`.
    pub fn param_change_events_at(&self, height: u64) -> Vec<ParamChangeEvent> {
        self.param_change_events
            .iter()
            .filter(|event| event.height == height)
            .copied()
            .collect()
    }
}
