use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use blobgate_mirror::{BucketNames, MirrorWriter, S3MirrorSink};
use blobgate_server::{GatewayConfig, GatewayContext, GatewayServer, MirrorConfig};
use blobgate_store::{BlobStore, MemoryBlobStore};

use crate::cli::{Cli, Command, ConfigArgs, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GatewayConfig> {
    match path {
        Some(path) => GatewayConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(GatewayConfig::default()),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(async move {
        let store: Arc<dyn BlobStore> =
            Arc::new(MemoryBlobStore::with_chunk_bytes(config.store_chunk_bytes));
        let mirror = match &config.mirror {
            Some(mirror_config) => build_mirror(mirror_config).await,
            None => {
                tracing::warn!("no [mirror] configuration; secondary-store mirroring disabled");
                MirrorWriter::disabled()
            }
        };
        let ctx = GatewayContext::new(config, store, mirror);
        GatewayServer::new(ctx)
            .serve()
            .await
            .context("gateway server exited")
    })
}

async fn build_mirror(config: &MirrorConfig) -> MirrorWriter {
    let client = blobgate_mirror::s3::build_client(
        &config.region,
        config.endpoint_url.as_deref(),
        config.force_path_style,
    )
    .await;
    let buckets = BucketNames {
        image: config.image_bucket.clone(),
        audio: config.audio_bucket.clone(),
        video: config.video_bucket.clone(),
    };
    MirrorWriter::new(Arc::new(S3MirrorSink::new(client, buckets)))
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
