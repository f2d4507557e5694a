//! Crate-wide error type.
//!
//! Per-link conditions (a page that will not load, a transcript that is not
//! there) are modelled as values in [`crate::ingestion`], not errors; only
//! failures that should stop a run or bubble out of a helper surface here.

use thiserror::Error;

use crate::render::RenderError;

/// Errors surfaced by ingestion, persistence, and retrieval helpers.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The rendering seam reported a failure outside the retry loop.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// HTTP transport failure while fetching the link manifest.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The upstream link list is empty or wrong-shaped. Fatal: no links
    /// means no possible work.
    #[error("malformed link manifest: {0}")]
    MalformedManifest(String),

    /// A document or URL could not be interpreted.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Chunker configuration rejected at construction.
    #[error(transparent)]
    Chunking(#[from] crate::chunking::ChunkConfigError),

    /// Persistence-layer failure (record writer, store scan).
    #[error("storage error: {0}")]
    Storage(String),
}
