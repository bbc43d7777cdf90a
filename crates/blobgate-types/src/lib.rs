//! Foundation types for the blobgate gateway.
//!
//! This crate provides the identity and classification types shared by every
//! other blobgate crate. It has no I/O and no async — everything here is a
//! pure value type.
//!
//! # Key Types
//!
//! - [`StorageKey`] — The identifier under which an object lives in the
//!   primary store, assigned at ingestion time
//! - [`Category`] — Image/Audio/Video/Unsupported routing for the secondary
//!   mirror store
//! - [`UploadReceipt`] — The JSON value returned to the client after a
//!   successful ingestion

pub mod category;
pub mod key;
pub mod receipt;

pub use category::Category;
pub use key::StorageKey;
pub use receipt::UploadReceipt;
