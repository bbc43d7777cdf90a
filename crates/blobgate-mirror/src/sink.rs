use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use blobgate_types::{Category, StorageKey};

use crate::error::{MirrorError, MirrorResult};

/// Destination for mirrored copies.
///
/// Implementations place a full in-memory copy of the payload under `key`
/// in the destination for `category`. The writer guarantees `category` is
/// never [`Category::Unsupported`].
#[async_trait]
pub trait MirrorSink: Send + Sync + 'static {
    async fn put(
        &self,
        key: &StorageKey,
        category: Category,
        content_type: &str,
        payload: Bytes,
    ) -> MirrorResult<()>;
}

/// One observed mirror attempt, recorded by [`MemoryMirrorSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MirrorRecord {
    pub key: StorageKey,
    pub category: Category,
    pub content_type: String,
    pub payload: Bytes,
}

/// Sink that records every put, for test assertions.
#[derive(Debug, Default)]
pub struct MemoryMirrorSink {
    records: Mutex<Vec<MirrorRecord>>,
}

impl MemoryMirrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All puts observed so far, in arrival order.
    pub fn records(&self) -> Vec<MirrorRecord> {
        self.records.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl MirrorSink for MemoryMirrorSink {
    async fn put(
        &self,
        key: &StorageKey,
        category: Category,
        content_type: &str,
        payload: Bytes,
    ) -> MirrorResult<()> {
        self.records.lock().expect("lock poisoned").push(MirrorRecord {
            key: key.clone(),
            category,
            content_type: content_type.to_string(),
            payload,
        });
        Ok(())
    }
}

/// Sink that always fails, for exercising failure isolation in tests.
#[derive(Debug, Default)]
pub struct FailingMirrorSink;

#[async_trait]
impl MirrorSink for FailingMirrorSink {
    async fn put(
        &self,
        _key: &StorageKey,
        _category: Category,
        _content_type: &str,
        _payload: Bytes,
    ) -> MirrorResult<()> {
        Err(MirrorError::Sink("injected failure".to_string()))
    }
}

/// Sink for deployments without a configured secondary store: drops every
/// payload with a debug log line.
#[derive(Debug, Default)]
pub struct DiscardMirrorSink;

#[async_trait]
impl MirrorSink for DiscardMirrorSink {
    async fn put(
        &self,
        key: &StorageKey,
        category: Category,
        _content_type: &str,
        payload: Bytes,
    ) -> MirrorResult<()> {
        tracing::debug!(%key, %category, length = payload.len(), "mirroring disabled; payload discarded");
        Ok(())
    }
}
