//! Driven ports (outbound dependencies).

use shared_types::ProposalRecord;

/// Hands freshly promoted records to the network layer for broadcast.
///
/// Called on the replay thread during republish; implementations must not
/// block on network I/O.
pub trait NetworkPublisher: Send + Sync {
    fn publish_record(&self, record: &ProposalRecord);
}
