//! In-memory parameter source.
//!
//! Serves protocol defaults with optional height-effective overrides.
//! Suitable for single-node operation and tests; a production node wires
//! the external parameter service here.

use crate::ports::ParamSource;
use parking_lot::RwLock;
use shared_types::Param;
use std::collections::HashMap;

pub struct InMemoryParamSource {
    /// Overrides as `(effective_height, value)` lists per param, kept in
    /// ascending height order.
    overrides: RwLock<HashMap<Param, Vec<(u64, u64)>>>,
}

impl InMemoryParamSource {
    pub fn new() -> Self {
        Self {
            overrides: RwLock::new(HashMap::new()),
        }
    }

    /// Set `param` to `value` for all heights at or above `effective_height`.
    pub fn set_param(&self, param: Param, value: u64, effective_height: u64) {
        let mut overrides = self.overrides.write();
        let entries = overrides.entry(param).or_default();
        entries.push((effective_height, value));
        entries.sort_by_key(|&(height, _)| height);
    }
}

impl Default for InMemoryParamSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamSource for InMemoryParamSource {
    fn param_value(&self, param: Param, height: u64) -> u64 {
        self.overrides
            .read()
            .get(&param)
            .and_then(|entries| {
                entries
                    .iter()
                    .rev()
                    .find(|&&(effective, _)| effective <= height)
                    .map(|&(_, value)| value)
            })
            .unwrap_or_else(|| param.default_value())
    }
}
