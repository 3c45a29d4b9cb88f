//! Shared replay fixtures.
//!
//! A compact replay harness standing in for the host's block-ingestion
//! loop: append the block to chain state, then run every tx through the
//! candidate pre-pass, correlated-output discovery, and full op-return
//! validation, the way the replay engine drives the parser in production.

use shared_types::{
    Block, Cycle, OpReturnType, OutputType, Phase, PhaseWrapper, Tx, TxInput, TxOutput, TxType,
};
use std::collections::HashMap;
use std::sync::Arc;
use tc_parser::{InMemoryParamSource, OpReturnProcessor, ParseError, ParserConfig, TxParseState};
use tc_state::{StateError, StateService};

/// Install a fmt subscriber honouring `RUST_LOG`. Safe to call from every
/// test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A cycle compact enough to replay in tests: 50 blocks total.
///
/// Proposal 0..19, Break1 20..24, BlindVote 25..34, Break2 35..36,
/// VoteReveal 37..46, Break3 47..48, Result 49 (offsets from the first
/// block).
pub fn governance_cycle(first_block: u64) -> Cycle {
    Cycle::new(
        first_block,
        vec![
            PhaseWrapper::new(Phase::Undefined, 0),
            PhaseWrapper::new(Phase::Proposal, 20),
            PhaseWrapper::new(Phase::Break1, 5),
            PhaseWrapper::new(Phase::BlindVote, 10),
            PhaseWrapper::new(Phase::Break2, 2),
            PhaseWrapper::new(Phase::VoteReveal, 10),
            PhaseWrapper::new(Phase::Break3, 2),
            PhaseWrapper::new(Phase::Result, 1),
        ],
    )
}

/// Op-return payload of `len` bytes: tag, format version 1, zero filler.
pub fn payload(op_return_type: OpReturnType, len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    data[0] = op_return_type.tag();
    data[1] = 1;
    data
}

pub fn block(height: u64, txs: Vec<Tx>) -> Block {
    Block {
        height,
        hash: [(height % 251) as u8; 32],
        prev_hash: [((height.wrapping_sub(1)) % 251) as u8; 32],
        txs,
    }
}

pub fn value_output(tx_id: &str, index: u32, value: u64, address: &str) -> TxOutput {
    TxOutput {
        tx_id: tx_id.to_string(),
        index,
        value,
        address: address.to_string(),
        op_return_data: None,
    }
}

pub fn op_return_output(tx_id: &str, index: u32, data: Vec<u8>) -> TxOutput {
    TxOutput {
        tx_id: tx_id.to_string(),
        index,
        value: 0,
        address: String::new(),
        op_return_data: Some(data),
    }
}

/// Compensation request: candidate output at index 0, op-return last.
pub fn comp_req_tx(height: u64, requested: u64) -> Tx {
    Tx {
        id: "tx-comp".to_string(),
        block_height: height,
        inputs: vec![TxInput {
            connected_tx_id: "tx-funding".to_string(),
            connected_output_index: 0,
            pub_key: Some("pubkey-requester".to_string()),
        }],
        outputs: vec![
            value_output("tx-comp", 0, requested, "addr-recipient"),
            op_return_output(
                "tx-comp",
                1,
                payload(OpReturnType::CompensationRequest, 22),
            ),
        ],
    }
}

/// Blind vote: stake-lock output at index 0, op-return last.
pub fn blind_vote_tx(height: u64, stake: u64) -> Tx {
    Tx {
        id: "tx-blind-vote".to_string(),
        block_height: height,
        inputs: vec![TxInput {
            connected_tx_id: "tx-funding".to_string(),
            connected_output_index: 1,
            pub_key: Some("pubkey-voter".to_string()),
        }],
        outputs: vec![
            value_output("tx-blind-vote", 0, stake, "addr-voter"),
            op_return_output("tx-blind-vote", 1, payload(OpReturnType::BlindVote, 38)),
        ],
    }
}

/// Vote reveal: spends the blind-vote stake, unlock output at index 0.
pub fn vote_reveal_tx(height: u64, stake: u64) -> Tx {
    Tx {
        id: "tx-vote-reveal".to_string(),
        block_height: height,
        inputs: vec![TxInput {
            connected_tx_id: "tx-blind-vote".to_string(),
            connected_output_index: 0,
            pub_key: Some("pubkey-voter".to_string()),
        }],
        outputs: vec![
            value_output("tx-vote-reveal", 0, stake, "addr-voter"),
            op_return_output("tx-vote-reveal", 1, payload(OpReturnType::VoteReveal, 38)),
        ],
    }
}

/// Replay loop: chain state plus the op-return processor, driven block by
/// block the way the host engine does it.
pub struct ReplayHarness {
    pub state: Arc<StateService>,
    pub params: Arc<InMemoryParamSource>,
    pub processor: OpReturnProcessor<InMemoryParamSource>,
}

impl ReplayHarness {
    pub fn new(genesis_height: u64) -> Self {
        let state = Arc::new(StateService::new(genesis_height));
        let params = Arc::new(InMemoryParamSource::new());
        let processor = OpReturnProcessor::new(
            state.clone(),
            params.clone(),
            ParserConfig { dev_mode: false },
        );
        Self {
            state,
            params,
            processor,
        }
    }

    pub fn strict(genesis_height: u64) -> Self {
        let mut harness = Self::new(genesis_height);
        harness.processor = OpReturnProcessor::new(
            harness.state.clone(),
            harness.params.clone(),
            ParserConfig { dev_mode: true },
        );
        harness
    }

    /// Append and parse one block. `fees` maps tx id to the token fee the
    /// tx paid, which the real engine derives from input/output balances.
    pub fn process_block(
        &self,
        block: Block,
        fees: &HashMap<String, u64>,
    ) -> Result<(), ReplayError> {
        let height = block.height;
        let txs = block.txs.clone();
        self.state.add_block(block)?;
        for tx in &txs {
            let fee = fees.get(&tx.id).copied().unwrap_or(0);
            self.process_tx(tx, height, fee)?;
        }
        Ok(())
    }

    fn process_tx(&self, tx: &Tx, height: u64, fee: u64) -> Result<(), ReplayError> {
        let mut tx_state = TxParseState::new();

        // Candidate pre-pass on the last output.
        if let Some(last) = tx.last_output() {
            self.processor.process_op_return_candidate(last, &mut tx_state);
        }

        // Correlated-output discovery across the non-op-return outputs.
        match tx_state.op_return_type_candidate {
            Some(OpReturnType::CompensationRequest) => {
                tx_state.issuance_candidate = tx
                    .outputs
                    .iter()
                    .find(|o| o.op_return_data.is_none())
                    .map(|o| o.key());
            }
            Some(OpReturnType::BlindVote) => {
                tx_state.blind_vote_lock_stake_output = tx
                    .outputs
                    .iter()
                    .find(|o| o.op_return_data.is_none())
                    .map(|o| o.key());
            }
            Some(OpReturnType::VoteReveal) => {
                tx_state.vote_reveal_unlock_stake_output = tx
                    .outputs
                    .iter()
                    .find(|o| o.op_return_data.is_none())
                    .map(|o| o.key());
                let stake_inputs = tx
                    .inputs
                    .iter()
                    .filter(|input| {
                        self.state.output_type(&input.connected_output_key())
                            == OutputType::BlindVoteLockStake
                    })
                    .count();
                tx_state.has_input_from_blind_vote_stake = stake_inputs > 0;
                tx_state.single_input_from_blind_vote_stake = stake_inputs == 1;
            }
            _ => {}
        }

        // Full validation on the op-return output, if any.
        if let Some(last) = tx.last_output() {
            if let Some(data) = last.op_return_data.clone() {
                let index = tx.outputs.len() as u32 - 1;
                self.processor
                    .validate(&data, last, tx, index, fee, height, &mut tx_state)?;
            }
        }

        // The engine derives the tx type from the verified op-return type.
        let tx_type = match tx_state.verified_op_return_type {
            Some(OpReturnType::Proposal) => Some(TxType::Proposal),
            Some(OpReturnType::CompensationRequest) => Some(TxType::CompensationRequest),
            Some(OpReturnType::BlindVote) => Some(TxType::BlindVote),
            Some(OpReturnType::VoteReveal) => Some(TxType::VoteReveal),
            Some(OpReturnType::Lockup) => Some(TxType::Lockup),
            Some(OpReturnType::Unlock) => Some(TxType::Unlock),
            Some(OpReturnType::ValuePadding) | None => None,
        };
        if let Some(tx_type) = tx_type {
            self.state.set_tx_type(tx.id.clone(), tx_type);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ReplayError {
    State(StateError),
    Parse(ParseError),
}

impl From<StateError> for ReplayError {
    fn from(e: StateError) -> Self {
        ReplayError::State(e)
    }
}

impl From<ParseError> for ReplayError {
    fn from(e: ParseError) -> Self {
        ReplayError::Parse(e)
    }
}
