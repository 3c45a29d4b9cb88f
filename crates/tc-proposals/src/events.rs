//! Events consumed by the proposal coordinator.

use serde::{Deserialize, Serialize};
use shared_types::{Proposal, ProposalRecord, TxId};

/// Everything that can change proposal collections.
///
/// Block events come from the replay thread; the ephemeral and append-only
/// variants come from network callbacks. The coordinator serializes them,
/// so any interleaving is safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProposalEvent {
    /// A block was appended to chain state.
    BlockAdded { height: u64 },
    /// A proposal arrived for the ephemeral collection.
    EphemeralAdded(Proposal),
    /// A removal request for an ephemeral proposal.
    EphemeralRemoved { tx_id: TxId },
    /// An append-only record was delivered from the network.
    AppendOnlyAdded(ProposalRecord),
    /// Initial chain parsing finished.
    ParseComplete,
}
