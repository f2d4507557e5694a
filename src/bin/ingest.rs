use std::env;
use std::path::PathBuf;
use std::time::Instant;

use reqwest::Client;
use tracing_subscriber::FmtSubscriber;
use url::Url;

use podsmith::chunking::ChunkSplitter;
use podsmith::ingestion::parse_link_manifest;
use podsmith::pipeline::{IngestOptions, ingest_links, prepare_chunks};
use podsmith::render::StaticRenderer;
use podsmith::types::IngestError;
use podsmith::validate::SentenceValidator;

#[tokio::main]
async fn main() -> Result<(), IngestError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let base_url = env::var("PODSMITH_BASE_URL")
        .unwrap_or_else(|_| "https://www.superdatascience.com".to_string());
    let base_url =
        Url::parse(&base_url).map_err(|err| IngestError::InvalidDocument(err.to_string()))?;

    let manifest_url = env::var("PODSMITH_MANIFEST_URL")
        .map_err(|_| IngestError::MalformedManifest("PODSMITH_MANIFEST_URL not set".to_string()))?;
    let manifest_url =
        Url::parse(&manifest_url).map_err(|err| IngestError::InvalidDocument(err.to_string()))?;

    let output_dir = env::var("PODSMITH_OUTPUT_DIR").unwrap_or_else(|_| "./output".to_string());
    let limit = env::var("PODSMITH_LIMIT")
        .ok()
        .and_then(|value| value.parse::<usize>().ok());

    let chunk_size = env::var("PODSMITH_CHUNK_SIZE")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(podsmith::chunking::DEFAULT_CHUNK_SIZE);
    let chunk_overlap = env::var("PODSMITH_CHUNK_OVERLAP")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(podsmith::chunking::DEFAULT_CHUNK_OVERLAP);
    let splitter = ChunkSplitter::new(chunk_size, chunk_overlap)?;

    let client = Client::builder()
        .user_agent("podsmith-ingestor/0.1")
        .build()?;

    let manifest: serde_json::Value = client
        .get(manifest_url.clone())
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let mut links = parse_link_manifest(&base_url, &manifest)?;
    if let Some(limit) = limit {
        links.truncate(limit);
    }
    println!("Found {} podcast links to process", links.len());

    let renderer = StaticRenderer::new(client);
    let options = IngestOptions {
        output_dir: Some(PathBuf::from(&output_dir)),
        ..IngestOptions::default()
    };

    let start = Instant::now();
    let report = ingest_links(&renderer, &links, &options).await?;

    let validator = SentenceValidator::default();
    let mut chunks_prepared = 0usize;
    for record in &report.records {
        chunks_prepared += prepare_chunks(record, &validator, &splitter).len();
    }

    println!("\nIngest complete.");
    println!("  pages processed : {}", report.processed);
    println!("  pages skipped   : {}", report.skipped);
    println!("  chunks prepared : {}", chunks_prepared);
    println!("  output directory: {}", output_dir);
    println!("  duration        : {:.1}s", start.elapsed().as_secs_f64());

    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let subscriber = FmtSubscriber::builder().with_env_filter("info").finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
