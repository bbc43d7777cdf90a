use thiserror::Error;

/// Errors from primary-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure in the underlying storage engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend reported a failure that is not a plain I/O error.
    #[error("store backend error: {0}")]
    Backend(String),

    /// The store wrote fewer bytes than the payload contained.
    #[error("short write for {key}: wrote {written} of {expected} bytes")]
    ShortWrite {
        key: String,
        expected: u64,
        written: u64,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
