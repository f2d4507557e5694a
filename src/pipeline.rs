//! Sequential ingest driver: link list in, transcript records out.
//!
//! One page at a time, fully processed end-to-end before the next starts. A
//! fresh rendering session is opened per link and dropped right after
//! extraction, trading throughput for isolation against a hung page.
//! Per-link failures are logged skips; only an empty link list aborts the
//! run.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{info, warn};
use url::Url;

use crate::chunking::{Chunk, ChunkSplitter};
use crate::ingestion::{
    DEFAULT_CONTENT_SELECTORS, RawLink, SelectorCandidate, extract_paragraphs, load_page,
    locate_content, loader::LoadPolicy,
};
use crate::metadata;
use crate::normalize::{collapse_whitespace, remove_timestamps, repair_urls};
use crate::record::{self, TranscriptRecord};
use crate::render::Renderer;
use crate::types::IngestError;
use crate::validate::{SentenceValidator, split_sentences};

/// Selector for the page-information block holding the publication date.
pub const DEFAULT_INFO_SELECTOR: &str = "div.podcast-details";

/// Date used when the page-information fragment yields none.
const UNKNOWN_DATE: &str = "00000000";

/// Knobs for one ingest run.
#[derive(Clone, Debug)]
pub struct IngestOptions {
    pub load_policy: LoadPolicy,
    pub selectors: Vec<SelectorCandidate>,
    pub info_selector: String,
    /// When set, every record is written as JSON under this directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            load_policy: LoadPolicy::default(),
            selectors: DEFAULT_CONTENT_SELECTORS.to_vec(),
            info_selector: DEFAULT_INFO_SELECTOR.to_string(),
            output_dir: None,
        }
    }
}

/// Outcome of an ingest run.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub processed: usize,
    pub skipped: usize,
    pub records: Vec<TranscriptRecord>,
}

/// Processes `links` strictly sequentially.
///
/// An empty link list is fatal (`MalformedManifest`): no links means no
/// possible work. Everything else that goes wrong on a single link — load
/// exhaustion, absent transcript, an unreadable page — is logged with
/// enough context to re-run just the failed subset, and skipped.
pub async fn ingest_links(
    renderer: &dyn Renderer,
    links: &[RawLink],
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    if links.is_empty() {
        return Err(IngestError::MalformedManifest(
            "link list is empty; nothing to ingest".to_string(),
        ));
    }

    let mut report = IngestReport::default();
    let mut seen_numbers: HashSet<String> = HashSet::new();

    for link in links {
        let url = &link.url;

        let session = match renderer.open_session().await {
            Ok(session) => session,
            Err(err) => {
                warn!(%url, error = %err, "could not open a rendering session; skipping");
                report.skipped += 1;
                continue;
            }
        };

        let outcome = load_page(session.as_ref(), url, &options.load_policy).await;
        if !outcome.is_loaded() {
            // The loader already logged {url, max_retries}.
            report.skipped += 1;
            continue;
        }

        let content = match locate_content(session.as_ref(), &options.selectors).await {
            Ok(Some(block)) => block,
            Ok(None) => {
                info!(%url, "no selector matched; transcript absent, skipping");
                report.skipped += 1;
                continue;
            }
            Err(err) => {
                warn!(%url, error = %err, "content probe failed; skipping");
                report.skipped += 1;
                continue;
            }
        };

        let extracted = extract_paragraphs(&content.inner_html);
        let full_text = collapse_whitespace(&repair_urls(&remove_timestamps(&extracted)));
        if full_text.is_empty() {
            info!(%url, "transcript normalized to empty text; skipping");
            report.skipped += 1;
            continue;
        }

        let title = match session.title().await {
            Ok(title) if !title.is_empty() => title,
            _ => fallback_title(url),
        };

        let date = match session.inner_html(&options.info_selector).await {
            Ok(Some(markup)) => metadata::derive_date(&markup),
            _ => None,
        }
        .unwrap_or_else(|| {
            warn!(%url, "no publication date found on page");
            UNKNOWN_DATE.to_string()
        });

        let mut number = metadata::derive_number(url, link.position);
        if !seen_numbers.insert(number.clone()) {
            let fallback = format!("ep-{:04}", link.position);
            warn!(%url, duplicate = %number, fallback = %fallback, "episode number collision");
            number = fallback;
            seen_numbers.insert(number.clone());
        }

        let record = record::assemble_record(url, number, title, date, full_text);
        if let Some(dir) = &options.output_dir {
            record::write_record(dir, &record).await?;
        }

        info!(%url, number = %record.number, words = record.n_words, "transcript ingested");
        report.records.push(record);
        report.processed += 1;
    }

    info!(
        processed = report.processed,
        skipped = report.skipped,
        "ingest run complete"
    );
    Ok(report)
}

/// Filters a record's sentences through the validator, then splits the
/// surviving text into overlapping chunks tagged with the source title.
pub fn prepare_chunks(
    record: &TranscriptRecord,
    validator: &SentenceValidator,
    splitter: &ChunkSplitter,
) -> Vec<Chunk> {
    let kept: Vec<&str> = split_sentences(&record.full_text)
        .into_iter()
        .filter(|sentence| validator.is_valid(sentence))
        .collect();
    let filtered = kept.join(" ");

    splitter
        .split(&filtered)
        .into_iter()
        .enumerate()
        .map(|(sequence_index, text)| Chunk {
            sequence_index,
            text,
            source_title: record.title.clone(),
        })
        .collect()
}

fn fallback_title(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("untitled")
        .to_string()
}
