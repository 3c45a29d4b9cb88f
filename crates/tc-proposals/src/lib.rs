//! # tc-proposals
//!
//! Proposal lifecycle for the Tally-Chain DAO.
//!
//! ## Role in System
//!
//! Proposals live in two collections. The ephemeral collection accepts adds
//! and removals during the PROPOSAL phase only; entries there may still be
//! unconfirmed. One block after the first BREAK1 block, every ephemeral
//! entry that validates as confirmed and rule-valid is promoted into the
//! append-only collection as a [`shared_types::ProposalRecord`] bound to
//! the hash of that first BREAK1 block. The anchor hash ties the record to
//! one concrete chain branch, so a record replayed against a different
//! branch fails acceptance.
//!
//! The append-only collection is replicated across nodes and eventually
//! consistent. Network deliveries may arrive duplicated, reordered, or
//! interleaved with block processing, so every mutation goes through a
//! single-writer coordinator consuming typed [`ProposalEvent`]s, and every
//! insert is an idempotent membership operation.

pub mod adapters;
pub mod coordinator;
pub mod errors;
pub mod events;
pub mod ports;
pub mod validator;

pub use adapters::RecordingPublisher;
pub use coordinator::ProposalCoordinator;
pub use errors::ProposalError;
pub use events::ProposalEvent;
pub use ports::NetworkPublisher;
pub use validator::ProposalValidator;
