//! Driven ports (outbound dependencies).

use crate::errors::SnapshotError;
use async_trait::async_trait;

/// Opaque blob store for serialized snapshots.
///
/// The byte format is this crate's concern (bincode-encoded `ChainState`);
/// durability is the store's. Saves may be slow: callers only ever hand
/// over bytes derived from an immutable clone.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, bytes: Vec<u8>) -> Result<(), SnapshotError>;

    /// The most recently saved blob, if any.
    async fn load_latest(&self) -> Result<Option<Vec<u8>>, SnapshotError>;
}
