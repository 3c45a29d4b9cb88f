//! # Governance Calendar and Voting Entities
//!
//! The cycle/phase calendar, protocol parameters, and the proposal and
//! issuance data carried through a voting cycle.
//!
//! A [`Cycle`] is a fixed sequence of phases laid out over the chain's
//! height axis. Cycles are stored append-only in height order with no gaps:
//! `cycle[i + 1].height_of_first_block == cycle[i].height_of_last_block() + 1`.

use crate::entities::{Address, BlockHash, TxId, TxOutputKey};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// Named sub-range of a voting cycle.
///
/// The order of the variants is the on-chain order of the phases inside a
/// cycle. `Undefined` is a zero-length placeholder so every height maps to
/// some phase value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Undefined,
    Proposal,
    Break1,
    BlindVote,
    Break2,
    VoteReveal,
    Break3,
    Result,
}

impl Phase {
    /// All phases in their on-chain order.
    pub const ALL: [Phase; 8] = [
        Phase::Undefined,
        Phase::Proposal,
        Phase::Break1,
        Phase::BlindVote,
        Phase::Break2,
        Phase::VoteReveal,
        Phase::Break3,
        Phase::Result,
    ];
}

/// A phase together with its duration in blocks for one concrete cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWrapper {
    pub phase: Phase,
    pub duration: u64,
}

impl PhaseWrapper {
    pub fn new(phase: Phase, duration: u64) -> Self {
        Self { phase, duration }
    }
}

/// One voting cycle: a contiguous block range divided into phases.
///
/// Owns an ordered phase list covering every [`Phase`] exactly once. The
/// phase durations are fixed once the cycle is created; parameter changes
/// only affect cycles created afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub height_of_first_block: u64,
    pub phase_wrappers: Vec<PhaseWrapper>,
}

impl Cycle {
    pub fn new(height_of_first_block: u64, phase_wrappers: Vec<PhaseWrapper>) -> Self {
        Self {
            height_of_first_block,
            phase_wrappers,
        }
    }

    pub fn duration(&self) -> u64 {
        self.phase_wrappers.iter().map(|w| w.duration).sum()
    }

    pub fn height_of_last_block(&self) -> u64 {
        self.height_of_first_block + self.duration().saturating_sub(1)
    }

    pub fn contains(&self, height: u64) -> bool {
        self.height_of_first_block <= height && height <= self.height_of_last_block()
    }

    pub fn duration_of(&self, phase: Phase) -> u64 {
        self.phase_wrappers
            .iter()
            .find(|w| w.phase == phase)
            .map(|w| w.duration)
            .unwrap_or(0)
    }

    /// First block of `phase` within this cycle, or `None` for a phase with
    /// zero duration.
    pub fn first_block_of(&self, phase: Phase) -> Option<u64> {
        if self.duration_of(phase) == 0 {
            return None;
        }
        let mut offset = 0;
        for wrapper in &self.phase_wrappers {
            if wrapper.phase == phase {
                return Some(self.height_of_first_block + offset);
            }
            offset += wrapper.duration;
        }
        None
    }

    /// Last block of `phase` within this cycle, or `None` for a phase with
    /// zero duration.
    pub fn last_block_of(&self, phase: Phase) -> Option<u64> {
        self.first_block_of(phase)
            .map(|first| first + self.duration_of(phase) - 1)
    }

    pub fn is_in_phase(&self, height: u64, phase: Phase) -> bool {
        match (self.first_block_of(phase), self.last_block_of(phase)) {
            (Some(first), Some(last)) => first <= height && height <= last,
            _ => false,
        }
    }
}

/// Protocol parameter, adjustable by vote.
///
/// Phase-duration parameters map one-to-one onto [`Phase`] variants so that
/// a parameter-change event can be applied to the matching phase when the
/// next cycle is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Param {
    /// Fee (in token smallest units) for a proposal or compensation request.
    ProposalFee,
    /// Fee for a blind vote.
    BlindVoteFee,
    PhaseUndefined,
    PhaseProposal,
    PhaseBreak1,
    PhaseBlindVote,
    PhaseBreak2,
    PhaseVoteReveal,
    PhaseBreak3,
    PhaseResult,
}

impl Param {
    /// Protocol-default value, used until a vote changes the parameter.
    pub const fn default_value(self) -> u64 {
        match self {
            Param::ProposalFee => 100,
            Param::BlindVoteFee => 100,
            Param::PhaseUndefined => 0,
            Param::PhaseProposal => 3600,
            Param::PhaseBreak1 => 150,
            Param::PhaseBlindVote => 600,
            Param::PhaseBreak2 => 10,
            Param::PhaseVoteReveal => 300,
            Param::PhaseBreak3 => 10,
            Param::PhaseResult => 10,
        }
    }

    /// The phase governed by this parameter, if it is a duration parameter.
    pub const fn phase(self) -> Option<Phase> {
        match self {
            Param::ProposalFee | Param::BlindVoteFee => None,
            Param::PhaseUndefined => Some(Phase::Undefined),
            Param::PhaseProposal => Some(Phase::Proposal),
            Param::PhaseBreak1 => Some(Phase::Break1),
            Param::PhaseBlindVote => Some(Phase::BlindVote),
            Param::PhaseBreak2 => Some(Phase::Break2),
            Param::PhaseVoteReveal => Some(Phase::VoteReveal),
            Param::PhaseBreak3 => Some(Phase::Break3),
            Param::PhaseResult => Some(Phase::Result),
        }
    }

    /// The duration parameter for `phase`.
    pub const fn for_phase(phase: Phase) -> Param {
        match phase {
            Phase::Undefined => Param::PhaseUndefined,
            Phase::Proposal => Param::PhaseProposal,
            Phase::Break1 => Param::PhaseBreak1,
            Phase::BlindVote => Param::PhaseBlindVote,
            Phase::Break2 => Param::PhaseBreak2,
            Phase::VoteReveal => Param::PhaseVoteReveal,
            Phase::Break3 => Param::PhaseBreak3,
            Phase::Result => Param::PhaseResult,
        }
    }
}

/// A concrete new value for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamChange {
    pub param: Param,
    pub value: u64,
}

/// A parameter change that became effective at `height`, produced by
/// applying a vote result. Consumed when the next cycle is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamChangeEvent {
    pub param_change: ParamChange,
    pub height: u64,
}

impl ParamChangeEvent {
    pub fn new(param: Param, value: u64, height: u64) -> Self {
        Self {
            param_change: ParamChange { param, value },
            height,
        }
    }

    /// Event carrying the protocol-default value, used to seed the genesis
    /// cycle so that later change detection is uniform.
    pub fn default_at(param: Param, height: u64) -> Self {
        Self::new(param, param.default_value(), height)
    }
}

/// What a proposal asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalKind {
    /// A generic governance proposal with no payout attached.
    Generic,
    /// A compensation request: mint `requested_amount` to
    /// `recipient_address` if the proposal wins.
    Compensation {
        requested_amount: u64,
        recipient_address: Address,
    },
}

/// A proposal in its ephemeral form, as circulated during the PROPOSAL
/// phase. Membership in the ephemeral store is mutable (it can be
/// withdrawn); the data itself never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Node-local unique id (uuid v4).
    pub uid: String,
    pub name: String,
    /// Tx that paid the proposal fee on chain.
    pub tx_id: TxId,
    pub kind: ProposalKind,
    /// Creation date, unix millis.
    pub creation_date: u64,
}

impl Proposal {
    pub fn new(
        name: impl Into<String>,
        tx_id: impl Into<TxId>,
        kind: ProposalKind,
        creation_date: u64,
    ) -> Self {
        Self {
            uid: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            tx_id: tx_id.into(),
            kind,
            creation_date,
        }
    }

    pub fn requested_amount(&self) -> Option<u64> {
        match &self.kind {
            ProposalKind::Compensation {
                requested_amount, ..
            } => Some(*requested_amount),
            ProposalKind::Generic => None,
        }
    }

    pub fn recipient_address(&self) -> Option<&Address> {
        match &self.kind {
            ProposalKind::Compensation {
                recipient_address, ..
            } => Some(recipient_address),
            ProposalKind::Generic => None,
        }
    }
}

/// A proposal in its append-only form: immutable once admitted, bound to
/// the hash of a specific anchor block so it cannot be replayed against a
/// different chain branch.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub proposal: Proposal,
    #[serde_as(as = "Bytes")]
    pub anchor_block_hash: BlockHash,
}

impl ProposalRecord {
    pub fn new(proposal: Proposal, anchor_block_hash: BlockHash) -> Self {
        Self {
            proposal,
            anchor_block_hash,
        }
    }
}

/// New token supply minted against a specific output as the result of a
/// winning compensation request. At most one per output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuance {
    pub output_key: TxOutputKey,
    pub height: u64,
    pub amount: u64,
    /// Public key of the first input of the issuing tx, for attribution.
    pub pub_key: Option<String>,
    /// Proposal creation date, unix millis.
    pub date: u64,
}
