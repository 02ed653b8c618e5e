//! Storage error types.

use thiserror::Error;

/// Storage error type.
///
/// Codec failures (`Io`/`Nbt`) are fatal to the operation that produced
/// them and are never retried internally; callers decide whether to drop
/// the stack's persisted state or abort loading.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Byte-level read/write failure (truncated or malformed buffer).
    #[error("entity data io error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary tag codec failure.
    #[error("entity data tag error: {0}")]
    Nbt(#[from] stacker_nbt::NbtError),

    /// Peek or pop on an empty storage.
    #[error("storage is empty")]
    Empty,

    /// No adapter is available for the detected host version.
    #[error("unsupported host version: {0}")]
    UnsupportedVersion(String),

    /// Persisted data named a storage type this build does not know.
    #[error("unknown storage type id: {0}")]
    UnknownStorageType(u8),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
