//! Issuance of new token supply for winning compensation requests.

use crate::errors::IssuanceError;
use shared_types::{Issuance, Phase, Proposal, TxOutput};
use std::sync::Arc;
use tc_periods::PeriodService;
use tc_state::StateService;
use tracing::{debug, info};

pub struct IssuanceService {
    state: Arc<StateService>,
}

impl IssuanceService {
    pub fn new(state: Arc<StateService>) -> Self {
        Self { state }
    }

    /// Issue against the winning compensation request `proposal`, tallied
    /// at `height`.
    ///
    /// Scans issuance-candidate outputs for the first one where,
    /// conjunctively: the owning tx is the proposal's tx, the output value
    /// equals the requested amount, the output address is the declared
    /// recipient, the tx sits in the same cycle as `height`, and the tx was
    /// confirmed during the PROPOSAL phase. Returns `Ok(None)` when nothing
    /// matches. At most one issuance ever exists per output, so replaying a
    /// vote result is a no-op.
    pub fn issue(
        &self,
        proposal: &Proposal,
        height: u64,
    ) -> Result<Option<Issuance>, IssuanceError> {
        let requested_amount =
            proposal
                .requested_amount()
                .ok_or_else(|| IssuanceError::NotACompensationRequest {
                    tx_id: proposal.tx_id.clone(),
                })?;
        let recipient = proposal
            .recipient_address()
            .cloned()
            .unwrap_or_default();

        let cycles = self.state.cycles();
        for candidate in self.state.issuance_candidates() {
            if !self.matches(proposal, &candidate, requested_amount, &recipient, height, &cycles) {
                continue;
            }
            let pub_key = self
                .state
                .tx(&candidate.tx_id)
                .and_then(|tx| tx.inputs.first().and_then(|input| input.pub_key.clone()));
            let issuance = Issuance {
                output_key: candidate.key(),
                height,
                amount: requested_amount,
                pub_key,
                date: proposal.creation_date,
            };
            if self.state.add_issuance(issuance.clone()) {
                info!(
                    "\n################################################################################\n\
                     Issued {} tokens to {} (proposal tx {})\n\
                     ################################################################################",
                    requested_amount, recipient, proposal.tx_id
                );
                return Ok(Some(issuance));
            }
            debug!(output = %candidate.key(), "issuance already recorded");
            return Ok(None);
        }
        debug!(tx_id = %proposal.tx_id, "no issuance candidate matched");
        Ok(None)
    }

    fn matches(
        &self,
        proposal: &Proposal,
        candidate: &TxOutput,
        requested_amount: u64,
        recipient: &str,
        height: u64,
        cycles: &[shared_types::Cycle],
    ) -> bool {
        if candidate.tx_id != proposal.tx_id {
            return false;
        }
        if candidate.value != requested_amount {
            return false;
        }
        if candidate.address != recipient {
            return false;
        }
        let tx_height = match self.state.tx_block_height(&proposal.tx_id) {
            Some(h) => h,
            None => return false,
        };
        PeriodService::is_tx_in_cycle(cycles, tx_height, height)
            && PeriodService::is_tx_in_phase(cycles, tx_height, Phase::Proposal)
    }
}
