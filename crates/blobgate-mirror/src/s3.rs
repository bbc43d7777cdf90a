use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;

use blobgate_types::{Category, StorageKey};

use crate::error::{MirrorError, MirrorResult};
use crate::sink::MirrorSink;

/// The three fixed destination buckets, one per mirrored category.
#[derive(Clone, Debug)]
pub struct BucketNames {
    pub image: String,
    pub audio: String,
    pub video: String,
}

/// S3-backed mirror sink.
///
/// Objects are written with public-read visibility so the secondary store
/// can serve as a CDN offload path. The sink never reads back what it
/// writes; bucket consistency is the store's concern.
#[derive(Clone, Debug)]
pub struct S3MirrorSink {
    client: S3Client,
    buckets: BucketNames,
}

impl S3MirrorSink {
    pub fn new(client: S3Client, buckets: BucketNames) -> Self {
        Self { client, buckets }
    }

    fn bucket_for(&self, category: Category) -> Option<&str> {
        match category {
            Category::Image => Some(&self.buckets.image),
            Category::Audio => Some(&self.buckets.audio),
            Category::Video => Some(&self.buckets.video),
            Category::Unsupported => None,
        }
    }
}

#[async_trait]
impl MirrorSink for S3MirrorSink {
    async fn put(
        &self,
        key: &StorageKey,
        category: Category,
        content_type: &str,
        payload: Bytes,
    ) -> MirrorResult<()> {
        let bucket = self
            .bucket_for(category)
            .ok_or(MirrorError::UnsupportedCategory(category))?;
        self.client
            .put_object()
            .bucket(bucket)
            .key(key.as_str())
            .body(ByteStream::from(payload.to_vec()))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|err| MirrorError::Backend(err.to_string()))?;
        Ok(())
    }
}

/// Build an S3 client for the secondary store.
///
/// `endpoint_url` and `force_path_style` support MinIO-style deployments
/// where the store is addressed by URL rather than by AWS region alone.
pub async fn build_client(
    region: &str,
    endpoint_url: Option<&str>,
    force_path_style: bool,
) -> S3Client {
    let region_provider = RegionProviderChain::first_try(Region::new(region.to_string()))
        .or_else("us-east-1");
    let base = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    let mut builder = aws_sdk_s3::config::Builder::from(&base);
    if let Some(url) = endpoint_url {
        builder = builder.endpoint_url(url);
    }
    if force_path_style {
        builder = builder.force_path_style(true);
    }
    S3Client::from_conf(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets() -> BucketNames {
        BucketNames {
            image: "gw-image".to_string(),
            audio: "gw-audio".to_string(),
            video: "gw-video".to_string(),
        }
    }

    #[tokio::test]
    async fn bucket_selection_by_category() {
        let client = build_client("us-east-1", Some("http://localhost:9000"), true).await;
        let sink = S3MirrorSink::new(client, buckets());

        assert_eq!(sink.bucket_for(Category::Image), Some("gw-image"));
        assert_eq!(sink.bucket_for(Category::Audio), Some("gw-audio"));
        assert_eq!(sink.bucket_for(Category::Video), Some("gw-video"));
        assert_eq!(sink.bucket_for(Category::Unsupported), None);
    }
}
