//! # Tally-Chain Test Suite
//!
//! Unified test crate for cross-crate choreography that no single crate
//! can exercise alone.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── governance_flow.rs    # Full voting cycle replay end to end
//!     ├── replay_fixture.rs     # Shared chain/tx builders
//!     └── snapshot_recovery.rs  # Checkpoint, restart, resume
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p tc-tests
//!
//! # By category
//! cargo test -p tc-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
