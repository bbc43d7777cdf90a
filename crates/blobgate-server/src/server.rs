use std::sync::Arc;

use tokio::net::TcpListener;

use crate::context::GatewayContext;
use crate::error::{GatewayError, GatewayResult};
use crate::router::build_router;

/// The blobgate HTTP server.
pub struct GatewayServer {
    ctx: Arc<GatewayContext>,
}

impl GatewayServer {
    pub fn new(ctx: Arc<GatewayContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &GatewayContext {
        &self.ctx
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.ctx))
    }

    /// Start serving requests. Runs until the listener fails.
    pub async fn serve(self) -> GatewayResult<()> {
        let bind_addr = self.ctx.config().bind_addr;
        let app = build_router(Arc::clone(&self.ctx));
        let listener = TcpListener::bind(bind_addr).await?;
        tracing::info!("blobgate listening on {bind_addr}");
        axum::serve(listener, app)
            .await
            .map_err(|err| GatewayError::Internal(err.to_string()))
    }
}
