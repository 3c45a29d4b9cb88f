//! # Shared Types Crate
//!
//! This crate contains the domain entities shared across the Tally-Chain
//! DAO replay-engine crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Data only**: No services, no I/O. Behavior lives in the subsystem
//!   crates; this crate carries the vocabulary they agree on.
//! - **Closed registries**: `OutputType`, `TxType` and `OpReturnType` are
//!   closed enums with const lookup tables so exhaustiveness is checked at
//!   build time.

pub mod entities;
pub mod governance;
pub mod output_type;

pub use entities::*;
pub use governance::*;
pub use output_type::*;
