use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use tokio::task::JoinHandle;

use blobgate_types::{Category, StorageKey};

use crate::sink::{DiscardMirrorSink, MirrorSink};

/// Fire-and-forget dispatcher of mirrored copies.
///
/// `dispatch` classifies the payload by content type and spawns a detached
/// task that writes it through the configured [`MirrorSink`]. The task
/// outlives the triggering request; the ingestion path ignores the returned
/// handle (it exists so tests can await completion deterministically).
/// Failures are logged inside the task and never propagate.
#[derive(Clone)]
pub struct MirrorWriter {
    sink: Arc<dyn MirrorSink>,
}

impl MirrorWriter {
    pub fn new(sink: Arc<dyn MirrorSink>) -> Self {
        Self { sink }
    }

    /// Writer for deployments without a secondary store.
    pub fn disabled() -> Self {
        Self::new(Arc::new(DiscardMirrorSink))
    }

    /// Hand a payload to the secondary store.
    ///
    /// Unsupported content types are dropped with a warning and no task is
    /// spawned. Must be called from within a tokio runtime.
    pub fn dispatch(
        &self,
        key: StorageKey,
        content_type: String,
        payload: Bytes,
    ) -> Option<JoinHandle<()>> {
        let category = Category::from_mime(&content_type);
        if !category.is_mirrored() {
            tracing::warn!(%key, %content_type, "not mirroring unsupported content type");
            return None;
        }
        let sink = Arc::clone(&self.sink);
        Some(tokio::spawn(async move {
            let started = Instant::now();
            match sink.put(&key, category, &content_type, payload).await {
                Ok(()) => {
                    tracing::info!(
                        %key,
                        %category,
                        %content_type,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "mirrored to secondary store"
                    );
                }
                Err(err) => {
                    tracing::error!(%key, %category, %content_type, %err, "mirror write failed");
                }
            }
        }))
    }
}

impl std::fmt::Debug for MirrorWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorWriter").finish_non_exhaustive()
    }
}
