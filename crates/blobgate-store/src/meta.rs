use blobgate_types::StorageKey;

/// Metadata supplied when creating an object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobMeta {
    /// Key the object is created under. A colliding key overwrites.
    pub key: StorageKey,
    /// Declared content type, usually the sniffed MIME of the payload.
    pub content_type: String,
    /// Opaque owner tag carried as stored metadata; empty when absent.
    pub owner_tag: String,
}

/// Metadata reported back by `stat`/`open`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobStat {
    /// Exact byte length of the stored object.
    pub length: u64,
    /// Content type recorded at creation; may be empty for legacy objects.
    pub content_type: String,
    /// Hex-encoded MD5 digest computed by the store over the written bytes.
    pub md5_hex: String,
    /// Owner tag recorded at creation.
    pub owner_tag: String,
}
