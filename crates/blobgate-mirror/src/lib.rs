//! Best-effort mirroring into the secondary object store.
//!
//! The primary store is the single source of truth; the secondary store is
//! an offload path partitioned into one bucket per content [`Category`].
//! Mirroring is fire-and-forget by design:
//!
//! - each mirror runs as a detached task that outlives the triggering
//!   request and is never awaited by it,
//! - a failed mirror is logged and never retried,
//! - nothing in the mirror path can fail or block an ingestion.
//!
//! [`MirrorWriter`] owns the dispatch; destinations implement [`MirrorSink`]
//! so tests can observe mirror attempts without an object-store dependency.
//!
//! [`Category`]: blobgate_types::Category

pub mod error;
pub mod s3;
pub mod sink;
pub mod writer;

pub use error::{MirrorError, MirrorResult};
pub use s3::{BucketNames, S3MirrorSink};
pub use sink::{DiscardMirrorSink, FailingMirrorSink, MemoryMirrorSink, MirrorRecord, MirrorSink};
pub use writer::MirrorWriter;
