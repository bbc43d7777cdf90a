//! HTTP layer of the blobgate gateway.
//!
//! Hosts the three pipelines over axum:
//!
//! - ingestion (`POST /file/upload`) — multipart upload, dual-write to the
//!   primary store and the fire-and-forget secondary mirror,
//! - retrieval (`GET /file/download`) — chunked streaming of stored bytes,
//! - derivation (`GET /file/thumbnail`) — on-demand fixed-width JPEG
//!   rendition.
//!
//! Handlers receive their collaborators through [`GatewayContext`], built
//! once at startup.

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use config::{GatewayConfig, MirrorConfig};
pub use context::GatewayContext;
pub use error::{GatewayError, GatewayResult};
pub use router::build_router;
pub use server::GatewayServer;
