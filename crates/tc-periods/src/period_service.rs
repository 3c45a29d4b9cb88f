//! Phase membership queries over the cycle calendar.
//!
//! All queries are stateless functions over the caller's cycle list. Tx
//! based queries take the tx's confirmation height, which the caller
//! resolves from chain state.

use shared_types::{Cycle, Phase};

/// Stateless phase/cycle lookups.
pub struct PeriodService;

impl PeriodService {
    /// The unique cycle whose block range covers `height`.
    pub fn cycle_covering(cycles: &[Cycle], height: u64) -> Option<&Cycle> {
        cycles.iter().find(|cycle| cycle.contains(height))
    }

    /// True iff `height` falls within `phase` of the cycle covering it.
    pub fn is_in_phase(cycles: &[Cycle], height: u64, phase: Phase) -> bool {
        Self::cycle_covering(cycles, height)
            .map(|cycle| cycle.is_in_phase(height, phase))
            .unwrap_or(false)
    }

    /// First block of `phase` in the cycle covering `height`.
    pub fn first_block_of_phase(cycles: &[Cycle], height: u64, phase: Phase) -> Option<u64> {
        Self::cycle_covering(cycles, height).and_then(|cycle| cycle.first_block_of(phase))
    }

    /// Last block of `phase` in the cycle covering `height`.
    pub fn last_block_of_phase(cycles: &[Cycle], height: u64, phase: Phase) -> Option<u64> {
        Self::cycle_covering(cycles, height).and_then(|cycle| cycle.last_block_of(phase))
    }

    /// True iff the tx confirmed at `tx_height` belongs to the same cycle as
    /// `chain_height`.
    pub fn is_tx_in_cycle(cycles: &[Cycle], tx_height: u64, chain_height: u64) -> bool {
        match (
            Self::cycle_covering(cycles, tx_height),
            Self::cycle_covering(cycles, chain_height),
        ) {
            (Some(a), Some(b)) => a.height_of_first_block == b.height_of_first_block,
            _ => false,
        }
    }

    /// True iff the tx confirmed at `tx_height` was confirmed during `phase`
    /// of its own cycle.
    pub fn is_tx_in_phase(cycles: &[Cycle], tx_height: u64, phase: Phase) -> bool {
        Self::is_in_phase(cycles, tx_height, phase)
    }
}
