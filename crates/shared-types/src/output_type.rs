//! # Output and Transaction Classification Registries
//!
//! Closed enums describing every classification state an output or
//! transaction can reach during replay. Every node must classify
//! byte-identically, so the registries are data-only lookup tables with no
//! dynamic dispatch.

use serde::{Deserialize, Serialize};

/// Classification of a transaction output after replay.
///
/// Every output starts as `Unverified` and is set exactly once per replay
/// pass by the metadata processor (a reorg reprocesses the whole output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputType {
    /// Not yet touched by the replay engine.
    Unverified,
    /// Output of the genesis tx that seeded the token supply.
    Genesis,
    /// Verified overlay-token value.
    Token,
    /// Plain base-chain value, no overlay meaning.
    Base,
    /// Failed classification. Never carries token value.
    Invalid,
    /// Op-return output carrying a valid value-padding payload.
    PaddingOpReturn,
    /// Op-return output of a verified proposal tx.
    ProposalOpReturn,
    /// Op-return output of a verified compensation request tx.
    CompReqOpReturn,
    /// Output that becomes token value if the compensation request wins.
    IssuanceCandidate,
    /// Op-return output of a verified blind vote tx.
    BlindVoteOpReturn,
    /// Stake locked by a blind vote tx.
    BlindVoteLockStake,
    /// Op-return output of a verified vote reveal tx.
    VoteRevealOpReturn,
    /// Stake unlocked by a vote reveal tx.
    VoteRevealUnlockStake,
    /// Op-return output of a bond lockup tx.
    BondLockOpReturn,
    /// Op-return output of a bond unlock tx.
    BondUnlockOpReturn,
}

/// Classification of a whole transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    Undefined,
    Unverified,
    Invalid,
    Genesis,
    TransferToken,
    PayTradeFee,
    Proposal,
    CompensationRequest,
    BlindVote,
    VoteReveal,
    Lockup,
    Unlock,
}

impl TxType {
    /// Whether this tx type carries an op-return metadata output.
    pub const fn has_op_return(self) -> bool {
        matches!(
            self,
            TxType::Proposal
                | TxType::CompensationRequest
                | TxType::BlindVote
                | TxType::VoteReveal
                | TxType::Lockup
                | TxType::Unlock
        )
    }

    /// Whether this tx type must pay a token fee to be valid.
    pub const fn requires_fee(self) -> bool {
        matches!(
            self,
            TxType::PayTradeFee
                | TxType::Proposal
                | TxType::CompensationRequest
                | TxType::BlindVote
        )
    }
}

/// Message-type tag carried in byte 0 of an op-return payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpReturnType {
    ValuePadding,
    Proposal,
    CompensationRequest,
    BlindVote,
    VoteReveal,
    Lockup,
    Unlock,
}

impl OpReturnType {
    /// Wire tag for this message type.
    pub const fn tag(self) -> u8 {
        match self {
            OpReturnType::ValuePadding => 0x01,
            OpReturnType::Proposal => 0x10,
            OpReturnType::CompensationRequest => 0x11,
            OpReturnType::BlindVote => 0x12,
            OpReturnType::VoteReveal => 0x13,
            OpReturnType::Lockup => 0x14,
            OpReturnType::Unlock => 0x15,
        }
    }

    /// Look up a message type by wire tag. Unknown tags are not an error at
    /// this level; the processor decides how to treat them.
    pub const fn from_tag(tag: u8) -> Option<OpReturnType> {
        match tag {
            0x01 => Some(OpReturnType::ValuePadding),
            0x10 => Some(OpReturnType::Proposal),
            0x11 => Some(OpReturnType::CompensationRequest),
            0x12 => Some(OpReturnType::BlindVote),
            0x13 => Some(OpReturnType::VoteReveal),
            0x14 => Some(OpReturnType::Lockup),
            0x15 => Some(OpReturnType::Unlock),
            _ => None,
        }
    }
}
