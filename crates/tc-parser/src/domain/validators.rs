//! Per-message-type validation rules.
//!
//! Each validator answers one question: does this payload, at this height,
//! with this fee and these correlated outputs, satisfy the consensus rules
//! for its message type? The global structural gate (last output, zero
//! value, non-empty payload) is the processor's job and is not re-checked
//! here.
//!
//! The format-version byte is deliberately not validated: version bumps must
//! stay backward compatible so that old nodes tolerate payloads written by
//! new ones.

use crate::domain::padding::PaddingCodec;
use crate::domain::tx_state::TxParseState;
use crate::ports::ParamSource;
use shared_types::{Cycle, Param, Phase};
use tc_periods::PeriodService;

/// Fixed payload size of a proposal: tag, version and the proposal hash.
pub const PROPOSAL_PAYLOAD_LEN: usize = 22;

/// Fixed payload size of a compensation request (same layout as a proposal).
pub const COMP_REQ_PAYLOAD_LEN: usize = 22;

/// Blind vote: 2 bytes tag+version, 20-byte hash, 16-byte key.
pub const BLIND_VOTE_PAYLOAD_LEN: usize = 38;

/// Vote reveal: 2 bytes tag+version, 20-byte hash, 16-byte key.
pub const VOTE_REVEAL_PAYLOAD_LEN: usize = 38;

pub struct OpReturnPaddingValidator;

impl OpReturnPaddingValidator {
    pub fn validate(data: &[u8]) -> bool {
        PaddingCodec::is_valid(data)
    }
}

pub struct OpReturnProposalValidator;

impl OpReturnProposalValidator {
    pub fn validate<P: ParamSource + ?Sized>(
        data: &[u8],
        token_fee: u64,
        height: u64,
        cycles: &[Cycle],
        params: &P,
    ) -> bool {
        data.len() == PROPOSAL_PAYLOAD_LEN
            && token_fee == params.param_value(Param::ProposalFee, height)
            && PeriodService::is_in_phase(cycles, height, Phase::Proposal)
    }
}

pub struct OpReturnCompReqValidator;

impl OpReturnCompReqValidator {
    /// Same rules as a proposal, plus a designated issuance-candidate output
    /// in the same transaction.
    pub fn validate<P: ParamSource + ?Sized>(
        data: &[u8],
        token_fee: u64,
        height: u64,
        cycles: &[Cycle],
        params: &P,
        tx_state: &TxParseState,
    ) -> bool {
        tx_state.issuance_candidate.is_some()
            && data.len() == COMP_REQ_PAYLOAD_LEN
            && token_fee == params.param_value(Param::ProposalFee, height)
            && PeriodService::is_in_phase(cycles, height, Phase::Proposal)
    }
}

pub struct OpReturnBlindVoteValidator;

impl OpReturnBlindVoteValidator {
    pub fn validate<P: ParamSource + ?Sized>(
        data: &[u8],
        token_fee: u64,
        height: u64,
        cycles: &[Cycle],
        params: &P,
        tx_state: &TxParseState,
    ) -> bool {
        tx_state.blind_vote_lock_stake_output.is_some()
            && data.len() == BLIND_VOTE_PAYLOAD_LEN
            && token_fee == params.param_value(Param::BlindVoteFee, height)
            && PeriodService::is_in_phase(cycles, height, Phase::BlindVote)
    }
}

pub struct OpReturnVoteRevealValidator;

impl OpReturnVoteRevealValidator {
    /// Requires exactly one input sourced from a previous blind-vote
    /// stake-lock output plus a designated unlock-stake output. No fee.
    pub fn validate(data: &[u8], height: u64, cycles: &[Cycle], tx_state: &TxParseState) -> bool {
        tx_state.has_input_from_blind_vote_stake
            && tx_state.single_input_from_blind_vote_stake
            && tx_state.vote_reveal_unlock_stake_output.is_some()
            && data.len() == VOTE_REVEAL_PAYLOAD_LEN
            && PeriodService::is_in_phase(cycles, height, Phase::VoteReveal)
    }
}
