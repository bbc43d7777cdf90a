//! Content sniffing and thumbnail derivation.
//!
//! Two pure concerns live here:
//!
//! - [`sniff`] — byte-signature detection of a payload's MIME type, in the
//!   spirit of the WHATWG mime-sniffing algorithm: a table of magic
//!   patterns over the leading bytes, a textual-content fallback, and
//!   `application/octet-stream` when nothing matches.
//! - [`Thumbnailer`] — fixed-width, aspect-preserving JPEG rendition of an
//!   image payload, recomputed per request and never cached.

pub mod error;
pub mod sniff;
pub mod thumbnail;

pub use error::{MediaError, MediaResult};
pub use sniff::sniff;
pub use thumbnail::Thumbnailer;
