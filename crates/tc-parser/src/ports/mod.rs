//! Driven ports (outbound dependencies).

use shared_types::Param;

/// External key-value parameter service.
///
/// Provides the consensus-critical fee thresholds and default phase
/// durations per height. Lookups are synchronous: they sit on the
/// single-threaded replay path and must be deterministic for a given
/// `(param, height)` pair on every node.
pub trait ParamSource: Send + Sync {
    fn param_value(&self, param: Param, height: u64) -> u64;
}
