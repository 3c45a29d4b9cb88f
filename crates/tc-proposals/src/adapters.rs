//! Driven adapters.

use crate::ports::NetworkPublisher;
use parking_lot::Mutex;
use shared_types::ProposalRecord;

/// Records published payloads instead of broadcasting them. Used in tests
/// and by nodes running without a network layer.
#[derive(Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<ProposalRecord>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<ProposalRecord> {
        self.published.lock().clone()
    }
}

impl NetworkPublisher for RecordingPublisher {
    fn publish_record(&self, record: &ProposalRecord) {
        self.published.lock().push(record.clone());
    }
}
