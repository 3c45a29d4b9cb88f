//! Proposal validation predicates.
//!
//! Two admission levels. Ephemeral adds happen while the proposal tx may
//! still be sitting in the mempool, so they accept unconfirmed txs as long
//! as the data fields hold up. Append-only admission runs after the
//! PROPOSAL phase closed and demands the full confirmed check.

use shared_types::{Phase, Proposal, ProposalKind, TxType};
use std::sync::Arc;
use tc_periods::PeriodService;
use tc_state::StateService;

pub struct ProposalValidator {
    state: Arc<StateService>,
}

impl ProposalValidator {
    pub fn new(state: Arc<StateService>) -> Self {
        Self { state }
    }

    /// Structural checks on the proposal data itself, independent of chain
    /// state.
    pub fn is_data_valid(&self, proposal: &Proposal) -> bool {
        if proposal.name.is_empty() || proposal.tx_id.is_empty() {
            return false;
        }
        match &proposal.kind {
            ProposalKind::Generic => true,
            ProposalKind::Compensation {
                requested_amount,
                recipient_address,
            } => *requested_amount > 0 && !recipient_address.is_empty(),
        }
    }

    /// Ephemeral admission: data must be valid, and the tx must either be
    /// unconfirmed or pass the full confirmed check.
    pub fn is_valid_or_unconfirmed(&self, proposal: &Proposal) -> bool {
        if !self.is_data_valid(proposal) {
            return false;
        }
        if !self.state.is_confirmed(&proposal.tx_id) {
            return true;
        }
        self.is_valid_and_confirmed(proposal)
    }

    /// Append-only admission: data valid, tx confirmed during the PROPOSAL
    /// phase of its cycle, and the tx classified as the matching type.
    pub fn is_valid_and_confirmed(&self, proposal: &Proposal) -> bool {
        if !self.is_data_valid(proposal) {
            return false;
        }
        let tx_height = match self.state.tx_block_height(&proposal.tx_id) {
            Some(height) => height,
            None => return false,
        };
        let cycles = self.state.cycles();
        if !PeriodService::is_tx_in_phase(&cycles, tx_height, Phase::Proposal) {
            return false;
        }
        let expected = match &proposal.kind {
            ProposalKind::Generic => TxType::Proposal,
            ProposalKind::Compensation { .. } => TxType::CompensationRequest,
        };
        self.state.tx_type(&proposal.tx_id) == expected
    }
}
