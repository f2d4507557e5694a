//! Transcript record assembly and persistence naming.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;
use url::Url;

use crate::types::IngestError;

/// Punctuation stripped out of filename slugs.
const SLUG_STRIP: &[char] = &[
    '?', '!', '.', ',', '\'', '"', '(', ')', ':', ';', '/', '\\', '&', '#', '%',
];

/// One fully extracted transcript, persisted once and never mutated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TranscriptRecord {
    pub url: String,
    /// Episode number, unique within a run.
    pub number: String,
    pub title: String,
    /// 8-digit `YYYYMMDD`.
    pub date: String,
    pub full_text: String,
    pub n_words: usize,
    pub n_chars: usize,
    pub n_sentences: usize,
    pub tokens_count: usize,
}

/// Composes a record, deriving the counts from the normalized text.
///
/// `tokens_count` is the standard rough estimate of four characters per
/// token.
pub fn assemble_record(
    url: &Url,
    number: String,
    title: String,
    date: String,
    full_text: String,
) -> TranscriptRecord {
    let n_words = full_text.split_whitespace().count();
    let n_chars = full_text.len();
    let n_sentences = count_sentences(&full_text);
    TranscriptRecord {
        url: url.to_string(),
        number,
        title,
        date,
        n_words,
        n_chars,
        n_sentences,
        tokens_count: n_chars / 4,
        full_text,
    }
}

/// Counts non-empty sentence segments on `.`/`?`/`!` terminators.
pub fn count_sentences(text: &str) -> usize {
    text.split(['.', '?', '!'])
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Deterministic filename stem: `{date}_{number}_{slug}`.
///
/// Because the stem depends only on (date, number, title) and numbers are
/// unique per run, concurrent writers never collide and no locking is
/// needed.
pub fn file_stem(record: &TranscriptRecord) -> String {
    format!(
        "{}_{}_{}",
        record.date,
        record.number,
        title_slug(&record.title)
    )
}

/// Slug rules: substring after the first colon, lowercased, spaces to
/// underscores, fixed punctuation stripped.
fn title_slug(title: &str) -> String {
    let tail = title
        .split_once(':')
        .map(|(_, rest)| rest)
        .unwrap_or(title)
        .trim();
    tail.to_lowercase()
        .replace(' ', "_")
        .replace(SLUG_STRIP, "")
}

/// Writes one record as JSON under `dir`, returning the written path.
pub async fn write_record(dir: &Path, record: &TranscriptRecord) -> Result<PathBuf, IngestError> {
    fs::create_dir_all(dir).await?;
    let path = dir.join(format!("{}.json", file_stem(record)));
    let serialized = serde_json::to_string_pretty(record)
        .map_err(|err| IngestError::Storage(err.to_string()))?;
    fs::write(&path, serialized).await?;
    info!(path = %path.display(), "transcript record written");
    Ok(path)
}
