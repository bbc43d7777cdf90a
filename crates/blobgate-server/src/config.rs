use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Gateway configuration, loaded from a TOML file at startup.
///
/// Every field has a default so a partial file (or none at all, for
/// embedded use) yields a runnable configuration. Invalid TOML or an
/// unreadable file is a fatal startup error.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Upper bound on a buffered multipart upload, in bytes.
    pub max_upload_bytes: usize,
    /// Chunk size of the embedded primary store backend.
    pub store_chunk_bytes: usize,
    /// Fixed output width of derived thumbnails, in pixels.
    pub thumbnail_width: u32,
    /// JPEG compression quality of derived thumbnails (1-100).
    pub thumbnail_quality: u8,
    /// Secondary-store mirroring; absent means mirroring is disabled.
    pub mirror: Option<MirrorConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8642".parse().unwrap(),
            max_upload_bytes: 5 * 1024 * 1024,
            store_chunk_bytes: 64 * 1024,
            thumbnail_width: 200,
            thumbnail_quality: 50,
            mirror: None,
        }
    }
}

/// Destination configuration for the secondary object store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Bucket receiving mirrored image objects.
    pub image_bucket: String,
    /// Bucket receiving mirrored audio objects.
    pub audio_bucket: String,
    /// Bucket receiving mirrored video objects.
    pub video_bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Explicit endpoint for MinIO-style deployments.
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl GatewayConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> GatewayResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            GatewayError::Config(format!("cannot read {}: {err}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|err| GatewayError::Config(format!("cannot parse {}: {err}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = GatewayConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8642".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(c.store_chunk_bytes, 64 * 1024);
        assert_eq!(c.thumbnail_width, 200);
        assert_eq!(c.thumbnail_quality, 50);
        assert!(c.mirror.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: GatewayConfig = toml::from_str("bind_addr = \"0.0.0.0:9000\"").unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.thumbnail_width, 200);
    }

    #[test]
    fn mirror_section_parses() {
        let c: GatewayConfig = toml::from_str(
            r#"
            [mirror]
            image_bucket = "gw-image"
            audio_bucket = "gw-audio"
            video_bucket = "gw-video"
            endpoint_url = "http://minio:9000"
            force_path_style = true
            "#,
        )
        .unwrap();
        let mirror = c.mirror.unwrap();
        assert_eq!(mirror.image_bucket, "gw-image");
        assert_eq!(mirror.region, "us-east-1");
        assert_eq!(mirror.endpoint_url.as_deref(), Some("http://minio:9000"));
        assert!(mirror.force_path_style);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "thumbnail_width = 320").unwrap();

        let c = GatewayConfig::load(file.path()).unwrap();
        assert_eq!(c.thumbnail_width, 320);
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        let err = GatewayConfig::load(Path::new("/nonexistent/blobgate.toml")).unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = not-an-address").unwrap();

        let err = GatewayConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }
}
