use blobgate_types::Category;
use thiserror::Error;

/// Errors from secondary-store writes.
///
/// These never reach an ingesting client: the mirror writer logs them
/// inside its detached task and drops them.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The secondary store rejected or failed the write.
    #[error("secondary store error: {0}")]
    Backend(String),

    /// No bucket exists for this category; the payload is not mirrorable.
    #[error("no destination bucket for category {0}")]
    UnsupportedCategory(Category),

    /// Injected failure from a test sink.
    #[error("sink failure: {0}")]
    Sink(String),
}

/// Result alias for mirror operations.
pub type MirrorResult<T> = Result<T, MirrorError>;
