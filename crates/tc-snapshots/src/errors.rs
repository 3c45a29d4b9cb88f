use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),

    #[error("Snapshot store error: {0}")]
    Store(String),

    #[error("Chain state owner no longer alive")]
    StateGone,
}
