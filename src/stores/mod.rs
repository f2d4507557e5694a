//! Vector-store seam and on-disk store location.
//!
//! Embedding models and vector-database internals are external
//! collaborators; this crate exposes the [`VectorStore`] trait they
//! implement plus [`locate::locate_latest_store`], which finds the most
//! recently persisted ingestion run for retrieval.

pub mod locate;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chunking::Chunk;
use crate::types::IngestError;

pub use locate::{VectorStoreHandle, locate_latest_store};

/// One retrieval hit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScoredChunk {
    pub content: String,
    pub score: f32,
    /// Title of the transcript the chunk came from.
    pub source: String,
}

/// Seam to the external embedding index.
///
/// The writer side is assumed single-writer; retrieval is read-only and
/// must never run against a store actively being written.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Embeds and persists `chunks` under `collection`, one
    /// `(chunk_text, {source: title})` pair per chunk.
    async fn add_chunks(&self, collection: &str, chunks: Vec<Chunk>) -> Result<(), IngestError>;

    /// Free-text similarity query, optionally filtered by source title.
    /// Results come back ordered by descending relevance, at most `top_k`.
    async fn query(
        &self,
        query: &str,
        source: Option<&str>,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, IngestError>;
}
