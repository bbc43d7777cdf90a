use bytes::Bytes;

use blobgate_types::StorageKey;

use crate::error::StoreResult;
use crate::meta::{BlobMeta, BlobStat};

/// The authoritative chunked blob store.
///
/// Implementations must satisfy these invariants:
/// - A create at an existing key overwrites the previous object without
///   error. No existence check is performed; the overwrite is logged, not
///   detected, by this layer's contract.
/// - Completion of `create` implies the object is durably present and
///   readable under its key.
/// - `open`/`stat` return `Ok(None)` for an unknown key; `Err` is reserved
///   for real backend failures.
/// - Implementations are internally synchronized; a `&self` method never
///   leaves the store in a partial state observable through `open`.
pub trait BlobStore: Send + Sync {
    /// Create the object under `meta.key` and write `payload` in full.
    ///
    /// Returns the number of bytes written. Callers must treat a count
    /// different from `payload.len()` as a failed write.
    fn create(&self, meta: BlobMeta, payload: &[u8]) -> StoreResult<u64>;

    /// Open an object for chunked reading.
    fn open(&self, key: &StorageKey) -> StoreResult<Option<Box<dyn BlobReader>>>;

    /// Metadata for an object without opening its content.
    fn stat(&self, key: &StorageKey) -> StoreResult<Option<BlobStat>>;
}

/// A finite, single-pass sequence of content chunks.
///
/// Readers hold whatever backend resources they need (a session, a cursor)
/// and release them on drop, including when the consuming loop exits early
/// on error.
pub trait BlobReader: Send {
    /// Metadata of the object being read.
    fn stat(&self) -> &BlobStat;

    /// The next chunk, or `Ok(None)` at clean end of stream.
    fn next_chunk(&mut self) -> StoreResult<Option<Bytes>>;
}
