use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier under which an object is written to and read from the primary
/// store.
///
/// A key is assigned once at ingestion and is opaque afterwards: the read
/// path treats it as an arbitrary non-empty string. Assignment is the
/// decimal rendering of `submission_epoch_seconds + owner_tag +
/// payload_length` (wrapping 64-bit addition). This is deliberately not
/// cryptographically random — uniqueness is only as strong as the
/// distinctness of the input tuple, and a colliding tuple overwrites the
/// previous object at that key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Assign a key for a payload submitted at `submission_epoch_seconds`
    /// by the owner identified by `owner_tag`, with `payload_length` bytes.
    pub fn assign(submission_epoch_seconds: i64, owner_tag: i64, payload_length: i64) -> Self {
        let sum = submission_epoch_seconds
            .wrapping_add(owner_tag)
            .wrapping_add(payload_length);
        Self(sum.to_string())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageKey({})", self.0)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StorageKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StorageKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
