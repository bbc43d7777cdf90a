use thiserror::Error;

/// Errors from thumbnail derivation.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The source payload was empty; there is nothing to decode.
    #[error("empty source payload")]
    EmptySource,

    /// The payload could not be decoded as an image.
    #[error("image decode failed: {0}")]
    Decode(#[source] image::ImageError),

    /// Re-encoding the resized image failed.
    #[error("image encode failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// Result alias for media operations.
pub type MediaResult<T> = Result<T, MediaError>;
