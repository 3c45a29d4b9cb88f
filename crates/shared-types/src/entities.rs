//! # Core Chain Entities
//!
//! Base-chain structures as seen by the overlay protocol. Blocks and
//! transactions arrive fully confirmed and height-ordered from the external
//! chain-sync component; nothing in this crate validates base-chain rules.
//!
//! Transaction outputs are immutable data. Their overlay classification is
//! *not* stored on the output itself; it lives in the chain-state owner,
//! keyed by [`TxOutputKey`], so that the replay engine is the single writer.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;

/// A 32-byte base-chain block hash.
pub type BlockHash = [u8; 32];

/// Transaction id as assigned by the base chain (hex string).
pub type TxId = String;

/// Base-chain address in its string encoding.
pub type Address = String;

/// Hex-encoded public key taken from a transaction input.
pub type PubKey = String;

/// Stable identity of a transaction output across the whole chain state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxOutputKey {
    pub tx_id: TxId,
    pub index: u32,
}

impl TxOutputKey {
    pub fn new(tx_id: impl Into<TxId>, index: u32) -> Self {
        Self {
            tx_id: tx_id.into(),
            index,
        }
    }
}

impl fmt::Display for TxOutputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_id, self.index)
    }
}

/// A transaction input, spending a previous output.
///
/// `pub_key` is only available when the ingestion layer could extract it from
/// the unlocking script; the first input's key is used as the attribution key
/// for issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Tx id of the spent output.
    pub connected_tx_id: TxId,
    /// Output index within the spent tx.
    pub connected_output_index: u32,
    /// Public key recovered from the input script, if any.
    pub pub_key: Option<PubKey>,
}

impl TxInput {
    pub fn connected_output_key(&self) -> TxOutputKey {
        TxOutputKey::new(self.connected_tx_id.clone(), self.connected_output_index)
    }
}

/// A transaction output.
///
/// `value` is in the base chain's smallest unit. An op-return candidate
/// carries its raw metadata bytes in `op_return_data`; regular value outputs
/// carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Owning transaction id.
    pub tx_id: TxId,
    /// Position within the owning transaction.
    pub index: u32,
    /// Output value in smallest units. Zero for op-return outputs.
    pub value: u64,
    /// Destination address. Empty for op-return outputs.
    pub address: Address,
    /// Raw metadata payload for op-return outputs.
    pub op_return_data: Option<Vec<u8>>,
}

impl TxOutput {
    pub fn key(&self) -> TxOutputKey {
        TxOutputKey::new(self.tx_id.clone(), self.index)
    }
}

/// A confirmed transaction with its ordered inputs and outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    pub id: TxId,
    /// Height of the block that confirmed this tx.
    pub block_height: u64,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

impl Tx {
    /// The last output of the transaction. Op-return metadata must occupy
    /// this position to be considered at all.
    pub fn last_output(&self) -> Option<&TxOutput> {
        self.outputs.last()
    }

    pub fn is_last_output(&self, index: u32) -> bool {
        !self.outputs.is_empty() && index as usize == self.outputs.len() - 1
    }
}

/// A confirmed base-chain block, reduced to the transactions relevant for
/// the overlay protocol.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub height: u64,
    #[serde_as(as = "Bytes")]
    pub hash: BlockHash,
    #[serde_as(as = "Bytes")]
    pub prev_hash: BlockHash,
    pub txs: Vec<Tx>,
}
