use thiserror::Error;

/// §7 `StorageError`: propagated to the caller. A persistence failure after
/// a decided transition is fatal to the owning instance — the embedder must
/// restart it from the last persisted height.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored record has an unsupported version byte {0:#04x}")]
    UnsupportedVersion(u8),

    #[error("stored record is empty")]
    EmptyRecord,

    #[error("failed to decode stored record: {0}")]
    Decode(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Backend(String),
}
