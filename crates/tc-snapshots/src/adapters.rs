//! Driven adapters.

use crate::errors::SnapshotError;
use crate::ports::SnapshotStore;
use async_trait::async_trait;
use parking_lot::Mutex;

/// Keeps every saved blob in memory. Used in tests and by nodes that
/// rebuild from genesis on every start.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    blobs: Mutex<Vec<Vec<u8>>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All blobs saved so far, oldest first.
    pub fn saved_blobs(&self) -> Vec<Vec<u8>> {
        self.blobs.lock().clone()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn save(&self, bytes: Vec<u8>) -> Result<(), SnapshotError> {
        self.blobs.lock().push(bytes);
        Ok(())
    }

    async fn load_latest(&self) -> Result<Option<Vec<u8>>, SnapshotError> {
        Ok(self.blobs.lock().last().cloned())
    }
}
