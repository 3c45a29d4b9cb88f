//! # tc-parser
//!
//! Output-classification validator chain for the Tally-Chain DAO.
//!
//! ## Role in System
//!
//! Every op-return output of every confirmed transaction runs through the
//! [`OpReturnProcessor`]: a candidate pre-pass before correlated outputs are
//! resolved, then full validation once the token fee is known. Validation
//! consults the phase calendar (`tc-periods`) and mutates classifications
//! through the chain-state owner (`tc-state`).
//!
//! Classification must be byte-identical on every node replaying the same
//! chain. All rules here are pure functions of (payload, tx, height, fee,
//! calendar, parameters); nothing depends on wall-clock time or local
//! configuration except the explicit dev verification mode.
//!
//! ## Failure philosophy
//!
//! A malformed op-return payload never burns independently verified token
//! value: the op-return output itself is classified `Invalid`, while the
//! correlated output (issuance candidate, stake lock, stake unlock) falls
//! back to its best-effort honest classification.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod processor;

pub use adapters::InMemoryParamSource;
pub use domain::{
    OpReturnBlindVoteValidator, OpReturnCompReqValidator, OpReturnPaddingValidator,
    OpReturnProposalValidator, OpReturnVoteRevealValidator, PaddingCodec, PaddingError,
    ParseError, TxParseState,
    BLIND_VOTE_PAYLOAD_LEN, COMP_REQ_PAYLOAD_LEN, PROPOSAL_PAYLOAD_LEN, VOTE_REVEAL_PAYLOAD_LEN,
};
pub use ports::ParamSource;
pub use processor::{OpReturnProcessor, ParserConfig};
