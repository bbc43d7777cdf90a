use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::extract::{Multipart, Query, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;

use blobgate_media::sniff;
use blobgate_store::{BlobMeta, BlobReader, StoreError};
use blobgate_types::{StorageKey, UploadReceipt};

use crate::context::GatewayContext;
use crate::error::{GatewayError, GatewayResult};

/// Request header carrying the opaque owner tag.
pub const HEADER_UID: &str = "uid";
/// Multipart form field carrying the uploaded file.
pub const FIELD_UPLOAD: &str = "upload";

const HEADER_CONTENT_MD5: HeaderName = HeaderName::from_static("content-md5");

#[derive(Debug, Deserialize)]
pub struct FidQuery {
    fid: Option<String>,
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "name": "blobgate",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}

/// `POST /file/upload` — the ingestion pipeline.
///
/// Buffers the multipart payload, assigns the storage key, hands the
/// payload to the mirror writer as a detached task, and synchronously
/// creates the object in the primary store. The response never waits on
/// the mirror.
pub async fn upload(
    State(ctx): State<Arc<GatewayContext>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> GatewayResult<Json<UploadReceipt>> {
    let started = Instant::now();

    // Permissive tag parsing: absent or non-numeric means zero.
    let uid = header_str(&headers, HEADER_UID);
    let owner_tag: i64 = uid.parse().unwrap_or(0);

    let payload = read_upload_field(&mut multipart).await?;
    let length = payload.len();
    let content_type = sniff(&payload).to_string();
    let key = StorageKey::assign(epoch_seconds(), owner_tag, length as i64);

    // Fire-and-forget: the mirror task outlives this request and its
    // outcome never influences the response.
    let _detached = ctx
        .mirror()
        .dispatch(key.clone(), content_type.clone(), payload.clone());

    let meta = BlobMeta {
        key: key.clone(),
        content_type: content_type.clone(),
        owner_tag: uid.to_string(),
    };
    let written = ctx.store().create(meta, &payload)?;
    if written != length as u64 {
        return Err(GatewayError::Store(StoreError::ShortWrite {
            key: key.to_string(),
            expected: length as u64,
            written,
        }));
    }

    tracing::debug!(
        %key,
        uid,
        %content_type,
        length,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "upload complete"
    );
    Ok(Json(UploadReceipt::ok(&key)))
}

/// `GET /file/download` — the retrieval pipeline.
///
/// Streams the stored bytes unchanged, in fixed-size chunks, with the
/// stored checksum, content type, and exact length as response headers.
pub async fn download(
    State(ctx): State<Arc<GatewayContext>>,
    Query(query): Query<FidQuery>,
    headers: HeaderMap,
) -> GatewayResult<Response> {
    let started = Instant::now();
    let uid = header_str(&headers, HEADER_UID);

    let key = require_fid(query)?;
    let reader = ctx
        .store()
        .open(&key)?
        .ok_or_else(|| GatewayError::NotFound(key.to_string()))?;
    let stat = reader.stat().clone();

    let response_headers = object_headers(&stat.md5_hex, &stat.content_type, stat.length)?;
    let body = Body::from_stream(futures::stream::iter(ChunkIter { reader }));

    tracing::debug!(
        %key,
        uid,
        length = stat.length,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "download streaming"
    );
    Ok((StatusCode::OK, response_headers, body).into_response())
}

/// `GET /file/thumbnail` — the derivation pipeline.
///
/// Buffers the stored object, derives a fixed-width JPEG rendition, and
/// returns it with the derived length. The checksum and content-type
/// headers describe the source object; nothing is cached.
pub async fn thumbnail(
    State(ctx): State<Arc<GatewayContext>>,
    Query(query): Query<FidQuery>,
    headers: HeaderMap,
) -> GatewayResult<Response> {
    let started = Instant::now();
    let uid = header_str(&headers, HEADER_UID);

    let key = require_fid(query)?;
    let mut reader = ctx
        .store()
        .open(&key)?
        .ok_or_else(|| GatewayError::NotFound(key.to_string()))?;
    let stat = reader.stat().clone();

    let mut source = Vec::with_capacity(stat.length as usize);
    while let Some(chunk) = reader.next_chunk()? {
        source.extend_from_slice(&chunk);
    }

    let derived = ctx.thumbnailer().derive(&source)?;
    let response_headers =
        object_headers(&stat.md5_hex, &stat.content_type, derived.len() as u64)?;

    tracing::debug!(
        %key,
        uid,
        source_length = stat.length,
        derived_length = derived.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "thumbnail derived"
    );
    Ok((StatusCode::OK, response_headers, derived).into_response())
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> &'h str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

fn require_fid(query: FidQuery) -> GatewayResult<StorageKey> {
    query
        .fid
        .filter(|fid| !fid.is_empty())
        .map(StorageKey::from)
        .ok_or_else(|| GatewayError::BadRequest("missing fid parameter".to_string()))
}

async fn read_upload_field(multipart: &mut Multipart) -> GatewayResult<Bytes> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FIELD_UPLOAD) {
            return Ok(field.bytes().await?);
        }
    }
    Err(GatewayError::BadRequest(format!(
        "multipart field `{FIELD_UPLOAD}` missing"
    )))
}

fn object_headers(
    md5_hex: &str,
    content_type: &str,
    content_length: u64,
) -> GatewayResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(HEADER_CONTENT_MD5, header_value(md5_hex)?);
    if !content_type.is_empty() {
        headers.insert(header::CONTENT_TYPE, header_value(content_type)?);
    }
    headers.insert(
        header::CONTENT_LENGTH,
        header_value(&content_length.to_string())?,
    );
    Ok(headers)
}

fn header_value(value: &str) -> GatewayResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|err| GatewayError::Internal(format!("invalid header value: {err}")))
}

fn epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

/// Bridges a [`BlobReader`] into the response body as a lazy, finite,
/// single-pass chunk sequence. A mid-stream error surfaces as a stream
/// error after earlier chunks may already have been flushed.
struct ChunkIter {
    reader: Box<dyn BlobReader>,
}

impl Iterator for ChunkIter {
    type Item = Result<Bytes, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_chunk().transpose()
    }
}
