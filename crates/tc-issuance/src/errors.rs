use thiserror::Error;

#[derive(Debug, Error)]
pub enum IssuanceError {
    #[error("Proposal {tx_id} is not a compensation request")]
    NotACompensationRequest { tx_id: String },
}
