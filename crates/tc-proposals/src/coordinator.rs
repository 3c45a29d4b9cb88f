//! Single-writer proposal coordinator.
//!
//! All collection mutation funnels through [`ProposalCoordinator::handle_event`],
//! which the host calls from one place. Block events and network callbacks
//! may be interleaved in any order; every insert checks membership first,
//! so duplicate or reordered deliveries are no-ops.

use crate::errors::ProposalError;
use crate::events::ProposalEvent;
use crate::ports::NetworkPublisher;
use crate::validator::ProposalValidator;
use shared_types::{BlockHash, Phase, Proposal, ProposalRecord, TxId};
use std::collections::HashMap;
use std::sync::Arc;
use tc_periods::PeriodService;
use tc_state::StateService;
use tracing::{debug, info, warn};

pub struct ProposalCoordinator<N: NetworkPublisher> {
    state: Arc<StateService>,
    validator: ProposalValidator,
    publisher: Arc<N>,
    ephemeral: HashMap<TxId, Proposal>,
    append_only: HashMap<TxId, ProposalRecord>,
    /// Republishing is held back until initial chain parsing completed,
    /// otherwise a node catching up would re-broadcast stale records at
    /// every historical cycle boundary.
    parsing_complete: bool,
}

impl<N: NetworkPublisher> ProposalCoordinator<N> {
    pub fn new(state: Arc<StateService>, publisher: Arc<N>) -> Self {
        let validator = ProposalValidator::new(state.clone());
        Self {
            state,
            validator,
            publisher,
            ephemeral: HashMap::new(),
            append_only: HashMap::new(),
            parsing_complete: false,
        }
    }

    /// Refill both collections from the externally persisted store
    /// contents. Entries go through the same admission rules as live
    /// deliveries.
    pub fn start(&mut self, ephemeral: Vec<Proposal>, records: Vec<ProposalRecord>) {
        for proposal in ephemeral {
            if let Err(e) = self.add_ephemeral(proposal) {
                debug!(error = %e, "stored ephemeral proposal not re-admitted");
            }
        }
        for record in records {
            if let Err(e) = self.accept_record(record) {
                debug!(error = %e, "stored record not re-admitted");
            }
        }
        info!(
            ephemeral = self.ephemeral.len(),
            append_only = self.append_only.len(),
            "proposal collections refilled from store"
        );
    }

    pub fn handle_event(&mut self, event: ProposalEvent) {
        match event {
            ProposalEvent::BlockAdded { height } => self.on_block_added(height),
            ProposalEvent::ParseComplete => {
                self.parsing_complete = true;
            }
            ProposalEvent::EphemeralAdded(proposal) => {
                if let Err(e) = self.add_ephemeral(proposal) {
                    warn!(error = %e, "ephemeral proposal rejected");
                }
            }
            ProposalEvent::EphemeralRemoved { tx_id } => {
                if let Err(e) = self.remove_ephemeral(&tx_id) {
                    warn!(error = %e, "ephemeral removal rejected, entry retained");
                }
            }
            ProposalEvent::AppendOnlyAdded(record) => {
                if let Err(e) = self.accept_record(record) {
                    warn!(error = %e, "network record dropped");
                }
            }
        }
    }

    pub fn ephemeral_proposals(&self) -> Vec<Proposal> {
        self.ephemeral.values().cloned().collect()
    }

    pub fn append_only_records(&self) -> Vec<ProposalRecord> {
        self.append_only.values().cloned().collect()
    }

    fn add_ephemeral(&mut self, proposal: Proposal) -> Result<(), ProposalError> {
        if self.ephemeral.contains_key(&proposal.tx_id) {
            debug!(tx_id = %proposal.tx_id, "ephemeral proposal already present");
            return Ok(());
        }
        if !self.validator.is_valid_or_unconfirmed(&proposal) {
            return Err(ProposalError::RejectedByValidation {
                tx_id: proposal.tx_id,
            });
        }
        debug!(tx_id = %proposal.tx_id, "ephemeral proposal added");
        self.ephemeral.insert(proposal.tx_id.clone(), proposal);
        Ok(())
    }

    /// Removal is only honoured while the chain head sits inside the
    /// PROPOSAL phase. Outside that window the entry is retained.
    fn remove_ephemeral(&mut self, tx_id: &str) -> Result<(), ProposalError> {
        let in_proposal_phase = self
            .state
            .chain_head_height()
            .map(|head| PeriodService::is_in_phase(&self.state.cycles(), head, Phase::Proposal))
            .unwrap_or(false);
        if !in_proposal_phase {
            return Err(ProposalError::RemovalOutsideProposalPhase {
                tx_id: tx_id.to_string(),
            });
        }
        if self.ephemeral.remove(tx_id).is_some() {
            debug!(tx_id, "ephemeral proposal removed");
        }
        Ok(())
    }

    /// One block past the first BREAK1 block, promote every confirmed and
    /// rule-valid ephemeral entry into the append-only collection, anchored
    /// to that first BREAK1 block's hash.
    fn on_block_added(&mut self, height: u64) {
        if !self.parsing_complete {
            return;
        }
        let cycles = self.state.cycles();
        let first_break1 = match PeriodService::first_block_of_phase(&cycles, height, Phase::Break1)
        {
            Some(h) => h,
            None => return,
        };
        if height != first_break1 + 1 {
            return;
        }
        let anchor = match self.state.block_hash_at(first_break1) {
            Some(hash) => hash,
            None => {
                warn!(height = first_break1, "anchor block missing, republish skipped");
                return;
            }
        };
        self.republish(anchor);
    }

    fn republish(&mut self, anchor: BlockHash) {
        let mut candidates: Vec<Proposal> = self.ephemeral.values().cloned().collect();
        candidates.sort_by(|a, b| a.tx_id.cmp(&b.tx_id));
        for proposal in candidates {
            if !self.validator.is_valid_and_confirmed(&proposal) {
                debug!(tx_id = %proposal.tx_id, "ephemeral entry not confirmed-valid, skipped");
                continue;
            }
            if self.append_only.contains_key(&proposal.tx_id) {
                continue;
            }
            let record = ProposalRecord::new(proposal, anchor);
            info!(tx_id = %record.proposal.tx_id, "proposal promoted to append-only store");
            self.publisher.publish_record(&record);
            self.append_only
                .insert(record.proposal.tx_id.clone(), record);
        }
    }

    /// Acceptance of a network-delivered record: anchor hash must match the
    /// locally computed anchor for the proposal's cycle, and the proposal
    /// must independently re-validate as confirmed and rule-valid.
    fn accept_record(&mut self, record: ProposalRecord) -> Result<(), ProposalError> {
        let tx_id = record.proposal.tx_id.clone();
        if self.append_only.contains_key(&tx_id) {
            debug!(%tx_id, "record already present");
            return Ok(());
        }
        let tx_height = self
            .state
            .tx_block_height(&tx_id)
            .ok_or_else(|| ProposalError::NotConfirmed {
                tx_id: tx_id.clone(),
            })?;
        let cycles = self.state.cycles();
        let expected_anchor = PeriodService::first_block_of_phase(&cycles, tx_height, Phase::Break1)
            .and_then(|h| self.state.block_hash_at(h));
        if expected_anchor != Some(record.anchor_block_hash) {
            return Err(ProposalError::AnchorMismatch { tx_id });
        }
        if !self.validator.is_valid_and_confirmed(&record.proposal) {
            return Err(ProposalError::RejectedByValidation { tx_id });
        }
        debug!(%tx_id, "network record accepted");
        self.append_only.insert(tx_id, record);
        Ok(())
    }
}
