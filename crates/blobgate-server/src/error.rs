use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use blobgate_media::MediaError;
use blobgate_store::StoreError;

/// Request-level errors of the gateway, mapped to HTTP status codes.
///
/// Client errors (400/404) log at warn; store, derivation, and internal
/// failures log at error. Response bodies stay empty — status codes are
/// the whole error contract of this service — and internal messages are
/// never sent to the client. Wrong-method requests never reach a handler:
/// the method routers answer those with 405.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or malformed parameter or multipart form.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No object under the requested key in the primary store.
    #[error("object not found: {0}")]
    NotFound(String),

    /// Primary-store I/O failure during open/read/write/create.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Thumbnail derivation failure (empty or undecodable source).
    #[error("derivation error: {0}")]
    Media(#[from] MediaError),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Listener or connection-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else that should surface as a 500.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_)
            | Self::Media(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequest(_) | Self::NotFound(_) => {
                tracing::warn!(error = %self, "request rejected");
            }
            _ => {
                tracing::error!(error = %self, "request failed");
            }
        }
        self.status().into_response()
    }
}

impl From<MultipartError> for GatewayError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest(format!("malformed multipart form: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            GatewayError::BadRequest("no fid".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::NotFound("123".into()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn store_and_media_errors_map_to_500() {
        let store_err = GatewayError::from(StoreError::Backend("session lost".into()));
        assert_eq!(store_err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let media_err = GatewayError::from(MediaError::EmptySource);
        assert_eq!(media_err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(
            GatewayError::Internal("short write".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_body_is_empty() {
        use http_body_util::BodyExt;

        let response = GatewayError::Internal("secret detail".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = futures::executor::block_on(async {
            response.into_body().collect().await.unwrap().to_bytes()
        });
        assert!(bytes.is_empty(), "internal details must not leak: {bytes:?}");
    }
}
