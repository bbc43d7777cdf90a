use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use bytes::Bytes;
use md5::{Digest, Md5};

use blobgate_types::StorageKey;

use crate::error::StoreResult;
use crate::meta::{BlobMeta, BlobStat};
use crate::traits::{BlobReader, BlobStore};

/// Default chunk size, matching the fixed read-buffer size of the gateway.
pub const DEFAULT_CHUNK_BYTES: usize = 64 * 1024;

/// In-memory, `HashMap`-based chunked blob store.
///
/// Intended for tests and embedding. Payloads are split into fixed-size
/// chunks on write and the MD5 digest is computed over the written bytes,
/// mirroring what a GridFS-like engine records. All objects are held behind
/// a `RwLock`; chunks are `Bytes`, so opening an object is cheap.
pub struct MemoryBlobStore {
    chunk_bytes: usize,
    blobs: RwLock<HashMap<String, StoredBlob>>,
}

#[derive(Clone)]
struct StoredBlob {
    stat: BlobStat,
    chunks: Vec<Bytes>,
}

impl MemoryBlobStore {
    /// Create an empty store with the default chunk size.
    pub fn new() -> Self {
        Self::with_chunk_bytes(DEFAULT_CHUNK_BYTES)
    }

    /// Create an empty store with an explicit chunk size.
    pub fn with_chunk_bytes(chunk_bytes: usize) -> Self {
        assert!(chunk_bytes > 0, "chunk size must be non-zero");
        Self {
            chunk_bytes,
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total stored bytes across all objects.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|blob| blob.stat.length)
            .sum()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryBlobStore {
    fn create(&self, meta: BlobMeta, payload: &[u8]) -> StoreResult<u64> {
        let stat = BlobStat {
            length: payload.len() as u64,
            content_type: meta.content_type,
            md5_hex: hex::encode(Md5::digest(payload)),
            owner_tag: meta.owner_tag,
        };
        let chunks = payload
            .chunks(self.chunk_bytes)
            .map(Bytes::copy_from_slice)
            .collect();

        let mut map = self.blobs.write().expect("lock poisoned");
        let previous = map.insert(meta.key.to_string(), StoredBlob { stat, chunks });
        if previous.is_some() {
            tracing::warn!(key = %meta.key, "key collision: overwriting existing object");
        }
        Ok(payload.len() as u64)
    }

    fn open(&self, key: &StorageKey) -> StoreResult<Option<Box<dyn BlobReader>>> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.get(key.as_str()).map(|blob| {
            Box::new(MemoryBlobReader {
                stat: blob.stat.clone(),
                chunks: blob.chunks.iter().cloned().collect(),
            }) as Box<dyn BlobReader>
        }))
    }

    fn stat(&self, key: &StorageKey) -> StoreResult<Option<BlobStat>> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.get(key.as_str()).map(|blob| blob.stat.clone()))
    }
}

impl std::fmt::Debug for MemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBlobStore")
            .field("object_count", &self.len())
            .field("chunk_bytes", &self.chunk_bytes)
            .finish()
    }
}

struct MemoryBlobReader {
    stat: BlobStat,
    chunks: VecDeque<Bytes>,
}

impl BlobReader for MemoryBlobReader {
    fn stat(&self) -> &BlobStat {
        &self.stat
    }

    fn next_chunk(&mut self) -> StoreResult<Option<Bytes>> {
        Ok(self.chunks.pop_front())
    }
}
