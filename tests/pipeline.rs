//! End-to-end ingest over mock-served pages.
//!
//! Drives the full pipeline — load, locate, extract, normalize, derive,
//! assemble, persist — against an HTTP mock, then checks the chunk stage on
//! the produced record.

use httpmock::prelude::*;
use tempfile::tempdir;
use url::Url;

use podsmith::chunking::ChunkSplitter;
use podsmith::ingestion::{RawLink, loader::LoadPolicy};
use podsmith::pipeline::{IngestOptions, ingest_links, prepare_chunks};
use podsmith::render::StaticRenderer;
use podsmith::validate::SentenceValidator;

const TRANSCRIPT_PAGE: &str = r#"<html>
<head><title>SDS 003: Quitting Smoking</title></head>
<body>
  <div class="podcast-details">
    <p>Episode details</p>
    <p>Published on Mar 5, 2021</p>
  </div>
  <section class="transcript">
    <p>Podcast Transcript</p>
    <p>Kirill: Welcome back [00:12:34] everyone, I’ll keep this short.</p>
    <p>We raised 200,000 dollars in 2019.3 months.</p>
    <p>Show all</p>
  </section>
</body>
</html>"#;

const NO_TRANSCRIPT_PAGE: &str = r#"<html>
<head><title>Company News</title></head>
<body><main><span>nothing transcript-shaped here</span></main></body>
</html>"#;

fn links_for(server: &MockServer, paths: &[&str]) -> Vec<RawLink> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| RawLink {
            url: Url::parse(&server.url(*path)).unwrap(),
            position: i + 1,
        })
        .collect()
}

fn fast_options(output_dir: Option<std::path::PathBuf>) -> IngestOptions {
    IngestOptions {
        load_policy: LoadPolicy {
            max_retries: 2,
            ..LoadPolicy::default()
        },
        output_dir,
        ..IngestOptions::default()
    }
}

#[tokio::test]
async fn full_pipeline_produces_a_clean_persisted_record() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/podcast/sds-003-quitting-smoking");
        then.status(200).body(TRANSCRIPT_PAGE);
    });

    let dir = tempdir().unwrap();
    let renderer = StaticRenderer::new(reqwest::Client::new());
    let links = links_for(&server, &["/podcast/sds-003-quitting-smoking"]);

    let report = ingest_links(
        &renderer,
        &links,
        &fast_options(Some(dir.path().to_path_buf())),
    )
    .await
    .unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped, 0);

    let record = &report.records[0];
    assert_eq!(record.number, "sds-0003");
    assert_eq!(record.title, "SDS 003: Quitting Smoking");
    assert_eq!(record.date, "20210305");
    assert_eq!(
        record.full_text,
        "Kirill: Welcome back everyone, I will keep this short. \
         We raised 200000 dollars in 2019. 3 months."
    );
    assert_eq!(record.n_words, record.full_text.split_whitespace().count());
    assert_eq!(record.tokens_count, record.full_text.len() / 4);

    let written = dir
        .path()
        .join("20210305_sds-0003_quitting_smoking.json");
    assert!(written.exists(), "record file should be persisted");
}

#[tokio::test]
async fn per_link_failures_skip_without_aborting_the_batch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/podcast/sds-010-good-page");
        then.status(200).body(TRANSCRIPT_PAGE);
    });
    server.mock(|when, then| {
        when.method(GET).path("/podcast/sds-011-broken");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/podcast/sds-012-no-transcript");
        then.status(200).body(NO_TRANSCRIPT_PAGE);
    });

    let renderer = StaticRenderer::new(reqwest::Client::new());
    let links = links_for(
        &server,
        &[
            "/podcast/sds-011-broken",
            "/podcast/sds-012-no-transcript",
            "/podcast/sds-010-good-page",
        ],
    );

    let report = ingest_links(&renderer, &links, &fast_options(None))
        .await
        .unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.records[0].number, "sds-0010");
}

#[tokio::test]
async fn chunks_cover_the_validated_text_with_configured_overlap() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/podcast/sds-003-quitting-smoking");
        then.status(200).body(TRANSCRIPT_PAGE);
    });

    let renderer = StaticRenderer::new(reqwest::Client::new());
    let links = links_for(&server, &["/podcast/sds-003-quitting-smoking"]);
    let report = ingest_links(&renderer, &links, &fast_options(None))
        .await
        .unwrap();

    let splitter = ChunkSplitter::new(6, 2).unwrap();
    // Accept everything: this test is about chunk geometry.
    let validator = SentenceValidator::new(0);
    let chunks = prepare_chunks(&report.records[0], &validator, &splitter);

    assert!(chunks.len() > 1);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.sequence_index, i);
        assert_eq!(chunk.source_title, "SDS 003: Quitting Smoking");
    }

    // Consecutive chunks share exactly the configured overlap, except
    // possibly the trailing partial chunk.
    for pair in chunks.windows(2) {
        let left: Vec<&str> = pair[0].text.split_whitespace().collect();
        let right: Vec<&str> = pair[1].text.split_whitespace().collect();
        if right.len() == 6 {
            assert_eq!(&left[left.len() - 2..], &right[..2]);
        }
    }
}
