//! Op-return processor.
//!
//! Orchestrates classification of op-return outputs: a candidate pre-pass
//! before the token fee is known, then full validation dispatching to the
//! per-type rules, applying classifications through the chain-state owner
//! and resolving correlated-output fallbacks on failure.

use crate::domain::errors::{PaddingError, ParseError};
use crate::domain::padding::PaddingCodec;
use crate::domain::tx_state::TxParseState;
use crate::domain::validators::{
    OpReturnBlindVoteValidator, OpReturnCompReqValidator, OpReturnPaddingValidator,
    OpReturnProposalValidator, OpReturnVoteRevealValidator,
};
use crate::ports::ParamSource;
use shared_types::{OpReturnType, OutputType, Tx, TxOutput};
use std::sync::Arc;
use tc_state::StateService;
use tracing::{info, warn};

/// Parser behavior toggles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserConfig {
    /// Dev verification mode: a tag that passed the candidate filter but is
    /// missing from the registry becomes a fatal error instead of a skip.
    pub dev_mode: bool,
}

pub struct OpReturnProcessor<P: ParamSource> {
    state: Arc<StateService>,
    params: Arc<P>,
    config: ParserConfig,
}

impl<P: ParamSource> OpReturnProcessor<P> {
    pub fn new(state: Arc<StateService>, params: Arc<P>, config: ParserConfig) -> Self {
        Self {
            state,
            params,
            config,
        }
    }

    /// Candidate pre-pass.
    ///
    /// Records only the candidate type so that correlated-output lookups
    /// work before the token fee is known. Padding candidates must already
    /// be structurally valid because the padding values are needed while
    /// parsing the other outputs. No classification is applied here.
    pub fn process_op_return_candidate(&self, output: &TxOutput, tx_state: &mut TxParseState) {
        let Some(data) = output.op_return_data.as_deref() else {
            return;
        };
        if output.value != 0 || data.is_empty() {
            return;
        }
        let Some(op_return_type) = OpReturnType::from_tag(data[0]) else {
            return;
        };
        if op_return_type == OpReturnType::ValuePadding {
            if OpReturnPaddingValidator::validate(data) {
                tx_state.op_return_candidate_data = Some(data.to_vec());
                tx_state.op_return_type_candidate = Some(op_return_type);
            }
        } else {
            tx_state.op_return_type_candidate = Some(op_return_type);
        }
    }

    /// Full validation pass.
    ///
    /// Structural gate first: the op-return output must be the last output
    /// of its tx, carry zero value and a non-empty payload. A violation
    /// classifies the output `Invalid` without inspecting type rules.
    pub fn validate(
        &self,
        data: &[u8],
        output: &TxOutput,
        tx: &Tx,
        index: u32,
        token_fee: u64,
        height: u64,
        tx_state: &mut TxParseState,
    ) -> Result<(), ParseError> {
        if output.value != 0 || !tx.is_last_output(index) || data.is_empty() {
            warn!(
                tx_id = %tx.id,
                data = %hex::encode(data),
                "op-return output does not match structural rules"
            );
            self.state.set_output_type(&output.key(), OutputType::Invalid);
            return Ok(());
        }

        match OpReturnType::from_tag(data[0]) {
            Some(op_return_type) => {
                self.select_validator(op_return_type, data, output, token_fee, height, tx_state)
            }
            None => {
                // The candidate pre-pass only records known tags, so an
                // unknown tag here means the registry and the parser
                // disagree on this node.
                warn!(
                    tx_id = %tx.id,
                    data = %hex::encode(data),
                    "op-return data does not match any defined type"
                );
                if self.config.dev_mode {
                    return Err(ParseError::UnsupportedOpReturnType {
                        tag: data[0],
                        tx_id: tx.id.clone(),
                    });
                }
                Ok(())
            }
        }
    }

    fn select_validator(
        &self,
        op_return_type: OpReturnType,
        data: &[u8],
        output: &TxOutput,
        token_fee: u64,
        height: u64,
        tx_state: &mut TxParseState,
    ) -> Result<(), ParseError> {
        match op_return_type {
            OpReturnType::ValuePadding => self.process_value_padding(data, output, tx_state),
            OpReturnType::Proposal => {
                self.process_proposal(data, output, token_fee, height, tx_state)
            }
            OpReturnType::CompensationRequest => {
                self.process_comp_req(data, output, token_fee, height, tx_state)
            }
            OpReturnType::BlindVote => {
                self.process_blind_vote(data, output, token_fee, height, tx_state)
            }
            OpReturnType::VoteReveal => self.process_vote_reveal(data, output, height, tx_state),
            OpReturnType::Lockup => {
                self.state
                    .set_output_type(&output.key(), OutputType::BondLockOpReturn);
                tx_state.verified_op_return_type = Some(OpReturnType::Lockup);
                Ok(())
            }
            OpReturnType::Unlock => {
                self.state
                    .set_output_type(&output.key(), OutputType::BondUnlockOpReturn);
                tx_state.verified_op_return_type = Some(OpReturnType::Unlock);
                Ok(())
            }
        }
    }

    fn process_value_padding(
        &self,
        data: &[u8],
        output: &TxOutput,
        tx_state: &mut TxParseState,
    ) -> Result<(), ParseError> {
        if OpReturnPaddingValidator::validate(data) {
            self.state
                .set_output_type(&output.key(), OutputType::PaddingOpReturn);
            tx_state.verified_op_return_type = Some(OpReturnType::ValuePadding);
        } else {
            info!(output = %output.key(), "expected value padding op-return data but it did not match the rules");
            self.state.set_output_type(&output.key(), OutputType::Invalid);
        }
        Ok(())
    }

    fn process_proposal(
        &self,
        data: &[u8],
        output: &TxOutput,
        token_fee: u64,
        height: u64,
        tx_state: &mut TxParseState,
    ) -> Result<(), ParseError> {
        let cycles = self.state.cycles();
        if OpReturnProposalValidator::validate(data, token_fee, height, &cycles, self.params.as_ref())
        {
            self.state
                .set_output_type(&output.key(), OutputType::ProposalOpReturn);
            tx_state.verified_op_return_type = Some(OpReturnType::Proposal);
        } else {
            info!(
                output = %output.key(),
                height,
                "expected proposal op-return data but it did not match the rules"
            );
            self.state.set_output_type(&output.key(), OutputType::Invalid);
        }
        Ok(())
    }

    fn process_comp_req(
        &self,
        data: &[u8],
        output: &TxOutput,
        token_fee: u64,
        height: u64,
        tx_state: &mut TxParseState,
    ) -> Result<(), ParseError> {
        let cycles = self.state.cycles();
        let issuance_candidate = tx_state.issuance_candidate.clone();
        if OpReturnCompReqValidator::validate(
            data,
            token_fee,
            height,
            &cycles,
            self.params.as_ref(),
            tx_state,
        ) {
            self.state
                .set_output_type(&output.key(), OutputType::CompReqOpReturn);
            tx_state.verified_op_return_type = Some(OpReturnType::CompensationRequest);
            if let Some(candidate) = issuance_candidate {
                self.state
                    .set_output_type(&candidate, OutputType::IssuanceCandidate);
            }
        } else {
            info!(
                output = %output.key(),
                height,
                "expected compensation request op-return data but it did not match the rules"
            );
            self.state.set_output_type(&output.key(), OutputType::Invalid);

            // The candidate cannot become token value with an invalid
            // op-return, but its funds were independently verified: it falls
            // back to a plain base-chain value transfer, never burned.
            if let Some(candidate) = issuance_candidate {
                self.state.set_output_type(&candidate, OutputType::Base);
            }
        }
        Ok(())
    }

    fn process_blind_vote(
        &self,
        data: &[u8],
        output: &TxOutput,
        token_fee: u64,
        height: u64,
        tx_state: &mut TxParseState,
    ) -> Result<(), ParseError> {
        let cycles = self.state.cycles();
        let stake_output = tx_state.blind_vote_lock_stake_output.clone();
        if OpReturnBlindVoteValidator::validate(
            data,
            token_fee,
            height,
            &cycles,
            self.params.as_ref(),
            tx_state,
        ) {
            self.state
                .set_output_type(&output.key(), OutputType::BlindVoteOpReturn);
            tx_state.verified_op_return_type = Some(OpReturnType::BlindVote);
            if let Some(stake) = stake_output {
                self.state
                    .set_output_type(&stake, OutputType::BlindVoteLockStake);
            }
        } else {
            info!(
                output = %output.key(),
                height,
                "expected blind vote op-return data but it did not match the rules"
            );
            self.state.set_output_type(&output.key(), OutputType::Invalid);

            // The stake was verified as valid token value during the output
            // iteration; do not burn it over malformed metadata.
            if let Some(stake) = stake_output {
                self.state.set_output_type(&stake, OutputType::Token);
            }
        }
        Ok(())
    }

    fn process_vote_reveal(
        &self,
        data: &[u8],
        output: &TxOutput,
        height: u64,
        tx_state: &mut TxParseState,
    ) -> Result<(), ParseError> {
        let cycles = self.state.cycles();
        let unlock_output = tx_state.vote_reveal_unlock_stake_output.clone();
        if OpReturnVoteRevealValidator::validate(data, height, &cycles, tx_state) {
            self.state
                .set_output_type(&output.key(), OutputType::VoteRevealOpReturn);
            tx_state.verified_op_return_type = Some(OpReturnType::VoteReveal);
            if let Some(unlock) = unlock_output {
                self.state
                    .set_output_type(&unlock, OutputType::VoteRevealUnlockStake);
            }
        } else {
            info!(
                output = %output.key(),
                height,
                "expected vote reveal op-return data but it did not match the rules"
            );
            self.state.set_output_type(&output.key(), OutputType::Invalid);

            // Same fallback as the blind-vote stake: verified token value
            // stays token value.
            if let Some(unlock) = unlock_output {
                self.state.set_output_type(&unlock, OutputType::Token);
            }
        }
        Ok(())
    }

    // === PADDING FACADE ===

    pub fn padding_from_op_return(&self, data: Option<&[u8]>, output_index: u8) -> u16 {
        data.map(|data| PaddingCodec::padding_for_index(data, output_index))
            .unwrap_or(0)
    }

    pub fn op_return_data_for_padding(
        &self,
        pairs: &[(u8, i64)],
    ) -> Result<Vec<u8>, PaddingError> {
        PaddingCodec::encode(pairs)
    }

    pub fn op_return_data_for_single_padding(
        &self,
        output_index: u8,
        padding: i64,
    ) -> Result<Vec<u8>, PaddingError> {
        PaddingCodec::encode_single(output_index, padding)
    }
}
