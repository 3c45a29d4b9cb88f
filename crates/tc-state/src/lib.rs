//! # tc-state
//!
//! Chain-state owner for the Tally-Chain DAO replay engine.
//!
//! ## Role in System
//!
//! - **Single Writer**: All chain-state mutation (output classification,
//!   cycle creation, issuance) goes through [`StateService`] on the replay
//!   thread.
//! - **Listeners**: Subscribers (snapshots, proposal lifecycle) get
//!   block-added and parse-complete notifications with read-only access;
//!   data only leaves the owner as a defensive clone.
//! - **Snapshot Source**: [`ChainState`] is a plain serde value, so a clone
//!   of it is a complete, immutable snapshot of everything up to the head.

pub mod chain_state;
pub mod errors;
pub mod service;

pub use chain_state::ChainState;
pub use errors::StateError;
pub use service::{ChainStateListener, StateService};
