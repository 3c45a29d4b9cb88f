//! Cycle construction.
//!
//! A new cycle is created when replay reaches the first block after the
//! current last cycle. The new cycle clones the previous cycle's phase
//! durations and applies any parameter-change events that became effective
//! at that height.

use shared_types::{Cycle, Param, ParamChangeEvent, Phase, PhaseWrapper};
use tracing::debug;

/// Builds cycles from the genesis height and parameter-change events.
pub struct CycleService {
    genesis_height: u64,
}

impl CycleService {
    pub fn new(genesis_height: u64) -> Self {
        Self { genesis_height }
    }

    pub fn genesis_height(&self) -> u64 {
        self.genesis_height
    }

    /// The initial cycle, built from the protocol-default duration of every
    /// phase. Defaults are wrapped in genesis-height [`ParamChangeEvent`]s so
    /// that later change detection works uniformly for all cycles.
    pub fn first_cycle(&self) -> Cycle {
        let phase_wrappers = Phase::ALL
            .iter()
            .map(|&phase| {
                let event = ParamChangeEvent::default_at(Param::for_phase(phase), self.genesis_height);
                PhaseWrapper::new(phase, event.param_change.value)
            })
            .collect();
        Cycle::new(self.genesis_height, phase_wrappers)
    }

    /// Create the next cycle iff `height` is exactly the first block after
    /// the current last cycle.
    ///
    /// The contiguity guard keeps out-of-order or gapped replay from minting
    /// cycles at the wrong heights: if `height - 1` is not the last block of
    /// the last known cycle, no cycle is created and replay continues with
    /// the existing calendar. That is a silent no-op, not an error.
    pub fn maybe_create_new_cycle(
        &self,
        height: u64,
        cycles: &[Cycle],
        events: &[ParamChangeEvent],
    ) -> Option<Cycle> {
        if height == self.genesis_height {
            return None;
        }
        if !Self::is_first_block_after_previous_cycle(height, cycles) {
            debug!(height, "no cycle created: height is not contiguous with the last cycle");
            return None;
        }
        let previous = cycles.last()?;
        Some(Self::create_new_cycle(height, previous, events))
    }

    /// Clone the previous cycle's phase list, replacing the duration for any
    /// phase with a matching change event and preserving all others.
    fn create_new_cycle(height: u64, previous: &Cycle, events: &[ParamChangeEvent]) -> Cycle {
        let phase_wrappers = previous
            .phase_wrappers
            .iter()
            .map(|wrapper| {
                let changed = events
                    .iter()
                    .find(|event| event.param_change.param.phase() == Some(wrapper.phase));
                match changed {
                    Some(event) => PhaseWrapper::new(wrapper.phase, event.param_change.value),
                    None => *wrapper,
                }
            })
            .collect();
        Cycle::new(height, phase_wrappers)
    }

    fn is_first_block_after_previous_cycle(height: u64, cycles: &[Cycle]) -> bool {
        let previous_height = height.saturating_sub(1);
        cycles
            .iter()
            .find(|cycle| cycle.contains(previous_height))
            .map(|cycle| cycle.height_of_last_block() + 1 == height)
            .unwrap_or(false)
    }
}
