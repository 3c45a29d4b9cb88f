use shared_types::TxId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Non-contiguous block: expected height {expected}, got {actual}")]
    NonContiguousBlock { expected: u64, actual: u64 },

    #[error("Block before genesis: genesis {genesis}, got {actual}")]
    BlockBeforeGenesis { genesis: u64, actual: u64 },

    #[error("Tx not found: {tx_id}")]
    TxNotFound { tx_id: TxId },

    #[error("Cycle out of order: last cycle ends at {last}, new cycle starts at {actual}")]
    CycleOutOfOrder { last: u64, actual: u64 },
}
