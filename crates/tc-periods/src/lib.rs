//! # tc-periods
//!
//! Phase calendar engine for the Tally-Chain DAO.
//!
//! ## Role in System
//!
//! Computes cycle boundaries and phase membership from the genesis height
//! and the accumulated parameter-change events. Everything here is a pure
//! function over the cycle list owned by `tc-state`; this crate holds no
//! mutable state of its own, which is what makes phase decisions
//! byte-identical across nodes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tc_periods::{CycleService, PeriodService};
//! use shared_types::Phase;
//!
//! let cycle_service = CycleService::new(genesis_height);
//! let first = cycle_service.first_cycle();
//!
//! if PeriodService::is_in_phase(&cycles, height, Phase::Proposal) {
//!     // ...
//! }
//! ```

pub mod cycle_service;
pub mod period_service;

pub use cycle_service::CycleService;
pub use period_service::PeriodService;
