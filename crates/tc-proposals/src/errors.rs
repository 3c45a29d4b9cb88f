use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProposalError {
    #[error("Proposal {tx_id} failed validation")]
    RejectedByValidation { tx_id: String },

    #[error("Proposal {tx_id} is not confirmed")]
    NotConfirmed { tx_id: String },

    #[error("Record for proposal {tx_id} is anchored to a different chain branch")]
    AnchorMismatch { tx_id: String },

    #[error("Removal of proposal {tx_id} outside the proposal phase")]
    RemovalOutsideProposalPhase { tx_id: String },
}
