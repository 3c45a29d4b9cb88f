//! Domain logic: the padding codec, per-type validators and the per-tx
//! parse scratch state.

pub mod errors;
pub mod padding;
pub mod tx_state;
pub mod validators;

pub use errors::{PaddingError, ParseError};
pub use padding::{PaddingCodec, PADDING_FORMAT_VERSION};
pub use tx_state::TxParseState;
pub use validators::{
    OpReturnBlindVoteValidator, OpReturnCompReqValidator, OpReturnPaddingValidator,
    OpReturnProposalValidator, OpReturnVoteRevealValidator, BLIND_VOTE_PAYLOAD_LEN,
    COMP_REQ_PAYLOAD_LEN, PROPOSAL_PAYLOAD_LEN, VOTE_REVEAL_PAYLOAD_LEN,
};
