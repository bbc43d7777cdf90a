use std::sync::Arc;

use blobgate_media::Thumbnailer;
use blobgate_mirror::MirrorWriter;
use blobgate_store::BlobStore;

use crate::config::GatewayConfig;

/// Immutable-after-init dependencies handed to every request handler.
///
/// Constructed once at startup and shared behind an `Arc`. Holding the
/// collaborators here — rather than in process globals — keeps the store
/// and mirror swappable for test doubles.
pub struct GatewayContext {
    config: GatewayConfig,
    store: Arc<dyn BlobStore>,
    mirror: MirrorWriter,
    thumbnailer: Thumbnailer,
}

impl GatewayContext {
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn BlobStore>,
        mirror: MirrorWriter,
    ) -> Arc<Self> {
        let thumbnailer = Thumbnailer::new(config.thumbnail_width, config.thumbnail_quality);
        Arc::new(Self {
            config,
            store,
            mirror,
            thumbnailer,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn BlobStore {
        self.store.as_ref()
    }

    pub fn mirror(&self) -> &MirrorWriter {
        &self.mirror
    }

    pub fn thumbnailer(&self) -> &Thumbnailer {
        &self.thumbnailer
    }
}

impl std::fmt::Debug for GatewayContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
