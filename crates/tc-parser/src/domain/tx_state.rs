//! Per-transaction parse scratch state.
//!
//! One `TxParseState` accompanies a transaction through the whole replay
//! pass. The output iteration (outside this crate) records the correlated
//! outputs it discovers (issuance candidate, stake lock, stake unlock)
//! before the op-return output is validated, which is why the candidate
//! pre-pass exists at all: correlated-output relationships must be
//! resolvable before the token fee is known.

use shared_types::{OpReturnType, TxOutputKey};

#[derive(Debug, Clone, Default)]
pub struct TxParseState {
    /// Type recorded pre-validation from the tag byte.
    pub op_return_type_candidate: Option<OpReturnType>,
    /// Raw payload of a structurally valid padding candidate.
    pub op_return_candidate_data: Option<Vec<u8>>,
    /// Type recorded after full validation succeeded.
    pub verified_op_return_type: Option<OpReturnType>,
    /// Output that becomes token value if a compensation request wins.
    pub issuance_candidate: Option<TxOutputKey>,
    /// Stake locked by a blind vote tx.
    pub blind_vote_lock_stake_output: Option<TxOutputKey>,
    /// Stake unlocked by a vote reveal tx.
    pub vote_reveal_unlock_stake_output: Option<TxOutputKey>,
    /// Whether any input spends a previous blind-vote stake-lock output.
    pub has_input_from_blind_vote_stake: bool,
    /// Whether exactly one input spends a blind-vote stake-lock output.
    pub single_input_from_blind_vote_stake: bool,
}

impl TxParseState {
    pub fn new() -> Self {
        Self::default()
    }
}
