//! # tc-issuance
//!
//! Issuance engine for the Tally-Chain DAO.
//!
//! ## Role in System
//!
//! When a compensation-request proposal wins its vote, new token supply is
//! minted against the issuance-candidate output the request reserved. The
//! engine scans candidate outputs and issues against the first one that
//! matches the winning proposal on every axis at once: owning tx, amount,
//! recipient address, cycle membership, and confirmation during the
//! PROPOSAL phase. A losing or never-matching proposal simply yields no
//! issuance.

pub mod errors;
pub mod service;

pub use errors::IssuanceError;
pub use service::IssuanceService;
