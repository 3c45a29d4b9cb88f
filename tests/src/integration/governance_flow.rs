//! Full voting-cycle choreography: parser, calendar, proposal lifecycle,
//! and issuance working against one shared chain state.

#[cfg(test)]
mod tests {
    use crate::integration::replay_fixture::*;
    use shared_types::{
        OpReturnType, OutputType, Param, ParamChangeEvent, Phase, Proposal, ProposalKind,
        TxOutputKey,
    };
    use std::collections::HashMap;
    use std::sync::Arc;
    use tc_issuance::IssuanceService;
    use tc_parser::PaddingCodec;
    use tc_periods::CycleService;
    use tc_proposals::{ProposalCoordinator, ProposalEvent, RecordingPublisher};

    const GENESIS: u64 = 100;

    fn proposal() -> Proposal {
        Proposal {
            uid: "uid-comp".to_string(),
            name: "q3 compensation".to_string(),
            tx_id: "tx-comp".to_string(),
            kind: ProposalKind::Compensation {
                requested_amount: 5000,
                recipient_address: "addr-recipient".to_string(),
            },
            creation_date: 1_700_000_000_000,
        }
    }

    /// One cycle end to end: compensation request confirmed in PROPOSAL,
    /// promoted at BREAK1 + 1, blind vote and reveal in their phases, and
    /// issuance minted at the RESULT phase.
    #[test]
    fn test_full_cycle_replay() {
        init_tracing();
        let harness = ReplayHarness::new(GENESIS);
        harness.state.add_cycle(governance_cycle(GENESIS)).unwrap();

        let publisher = Arc::new(RecordingPublisher::new());
        let mut coordinator =
            ProposalCoordinator::new(harness.state.clone(), publisher.clone());
        coordinator.handle_event(ProposalEvent::ParseComplete);

        let mut fees = HashMap::new();
        fees.insert("tx-comp".to_string(), Param::ProposalFee.default_value());
        fees.insert(
            "tx-blind-vote".to_string(),
            Param::BlindVoteFee.default_value(),
        );

        for height in GENESIS..=149 {
            let txs = match height {
                110 => vec![comp_req_tx(height, 5000)],
                130 => vec![blind_vote_tx(height, 2000)],
                140 => vec![vote_reveal_tx(height, 2000)],
                _ => vec![],
            };
            harness.process_block(block(height, txs), &fees).unwrap();
            if height == 110 {
                coordinator.handle_event(ProposalEvent::EphemeralAdded(proposal()));
            }
            coordinator.handle_event(ProposalEvent::BlockAdded { height });
        }

        // Parser classifications.
        let state = &harness.state;
        assert_eq!(
            state.output_type(&TxOutputKey::new("tx-comp", 1)),
            OutputType::CompReqOpReturn
        );
        assert_eq!(
            state.output_type(&TxOutputKey::new("tx-comp", 0)),
            OutputType::IssuanceCandidate
        );
        assert_eq!(
            state.output_type(&TxOutputKey::new("tx-blind-vote", 0)),
            OutputType::BlindVoteLockStake
        );
        assert_eq!(
            state.output_type(&TxOutputKey::new("tx-vote-reveal", 0)),
            OutputType::VoteRevealUnlockStake
        );

        // The proposal was promoted once, anchored to the first BREAK1 block.
        let records = coordinator.append_only_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].anchor_block_hash, [(120 % 251) as u8; 32]);
        assert_eq!(publisher.published().len(), 1);

        // Issuance at the result phase.
        let issuance = IssuanceService::new(state.clone())
            .issue(&proposal(), 149)
            .unwrap()
            .unwrap();
        assert_eq!(issuance.amount, 5000);
        assert_eq!(issuance.pub_key.as_deref(), Some("pubkey-requester"));
        assert_eq!(issuance.output_key, TxOutputKey::new("tx-comp", 0));
    }

    /// A malformed compensation request never burns the candidate output.
    #[test]
    fn test_malformed_comp_req_falls_back_to_base() {
        let harness = ReplayHarness::new(GENESIS);
        harness.state.add_cycle(governance_cycle(GENESIS)).unwrap();

        let mut tx = comp_req_tx(110, 5000);
        // Truncated payload: right tag, wrong length.
        tx.outputs[1].op_return_data = Some(payload(OpReturnType::CompensationRequest, 21));

        let mut fees = HashMap::new();
        fees.insert("tx-comp".to_string(), Param::ProposalFee.default_value());
        for height in GENESIS..=110 {
            let txs = if height == 110 { vec![tx.clone()] } else { vec![] };
            harness.process_block(block(height, txs), &fees).unwrap();
        }

        assert_eq!(
            harness.state.output_type(&TxOutputKey::new("tx-comp", 1)),
            OutputType::Invalid
        );
        assert_eq!(
            harness.state.output_type(&TxOutputKey::new("tx-comp", 0)),
            OutputType::Base
        );
    }

    /// Fee mismatch is a rule violation, same fallback as a bad payload.
    #[test]
    fn test_wrong_fee_invalidates_comp_req() {
        let harness = ReplayHarness::new(GENESIS);
        harness.state.add_cycle(governance_cycle(GENESIS)).unwrap();

        let mut fees = HashMap::new();
        fees.insert(
            "tx-comp".to_string(),
            Param::ProposalFee.default_value() + 1,
        );
        for height in GENESIS..=110 {
            let txs = if height == 110 {
                vec![comp_req_tx(height, 5000)]
            } else {
                vec![]
            };
            harness.process_block(block(height, txs), &fees).unwrap();
        }

        assert_eq!(
            harness.state.output_type(&TxOutputKey::new("tx-comp", 1)),
            OutputType::Invalid
        );
        assert_eq!(
            harness.state.output_type(&TxOutputKey::new("tx-comp", 0)),
            OutputType::Base
        );
    }

    /// Value-padding metadata classifies and decodes through the replay
    /// path.
    #[test]
    fn test_padding_tx_classifies_and_decodes() {
        let harness = ReplayHarness::new(GENESIS);
        harness.state.add_cycle(governance_cycle(GENESIS)).unwrap();

        let data = PaddingCodec::encode_single(0, 300).unwrap();
        let tx = shared_types::Tx {
            id: "tx-padding".to_string(),
            block_height: 105,
            inputs: vec![],
            outputs: vec![
                value_output("tx-padding", 0, 1234, "addr-change"),
                op_return_output("tx-padding", 1, data.clone()),
            ],
        };

        for height in GENESIS..=105 {
            let txs = if height == 105 { vec![tx.clone()] } else { vec![] };
            harness.process_block(block(height, txs), &HashMap::new()).unwrap();
        }

        assert_eq!(
            harness.state.output_type(&TxOutputKey::new("tx-padding", 1)),
            OutputType::PaddingOpReturn
        );
        assert_eq!(
            harness.processor.padding_from_op_return(Some(&data), 0),
            300
        );
        assert_eq!(harness.processor.padding_from_op_return(Some(&data), 1), 0);
    }

    /// Unknown tags pass through in tolerant mode and abort replay in
    /// strict verification mode.
    #[test]
    fn test_unknown_tag_modes() {
        let mut data = payload(OpReturnType::ValuePadding, 8);
        data[0] = 0x77;
        let tx = shared_types::Tx {
            id: "tx-unknown".to_string(),
            block_height: 105,
            inputs: vec![],
            outputs: vec![
                value_output("tx-unknown", 0, 10, "addr"),
                op_return_output("tx-unknown", 1, data),
            ],
        };

        let tolerant = ReplayHarness::new(GENESIS);
        tolerant.state.add_cycle(governance_cycle(GENESIS)).unwrap();
        for height in GENESIS..=105 {
            let txs = if height == 105 { vec![tx.clone()] } else { vec![] };
            tolerant.process_block(block(height, txs), &HashMap::new()).unwrap();
        }
        // Tolerant mode skips: no classification recorded.
        assert_eq!(
            tolerant.state.output_type(&TxOutputKey::new("tx-unknown", 1)),
            OutputType::Unverified
        );

        let strict = ReplayHarness::strict(GENESIS);
        strict.state.add_cycle(governance_cycle(GENESIS)).unwrap();
        let mut failed = false;
        for height in GENESIS..=105 {
            let txs = if height == 105 { vec![tx.clone()] } else { vec![] };
            if strict.process_block(block(height, txs), &HashMap::new()).is_err() {
                failed = true;
            }
        }
        assert!(failed);
    }

    /// Cycle rollover driven the way the replay engine does it, with a
    /// phase-duration change taking effect in the new cycle.
    #[test]
    fn test_cycle_rollover_applies_param_change() {
        let harness = ReplayHarness::new(GENESIS);
        let service = CycleService::new(GENESIS);
        let first = governance_cycle(GENESIS);
        harness.state.add_cycle(first.clone()).unwrap();
        let rollover = first.height_of_last_block() + 1;
        harness
            .state
            .add_param_change_event(ParamChangeEvent::new(Param::PhaseProposal, 30, rollover));

        for height in GENESIS..=rollover {
            harness.process_block(block(height, vec![]), &HashMap::new()).unwrap();
            let events = harness.state.param_change_events_at(height);
            if let Some(cycle) =
                service.maybe_create_new_cycle(height, &harness.state.cycles(), &events)
            {
                harness.state.add_cycle(cycle).unwrap();
            }
        }

        let cycles = harness.state.cycles();
        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[1].height_of_first_block, rollover);
        assert_eq!(cycles[1].duration_of(Phase::Proposal), 30);
        // Unchanged phases keep the previous durations.
        assert_eq!(
            cycles[1].duration_of(Phase::BlindVote),
            first.duration_of(Phase::BlindVote)
        );
    }
}
