pub mod governance_flow;
pub mod replay_fixture;
pub mod snapshot_recovery;
