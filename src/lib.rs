//! Transcript acquisition, normalization, and chunking for semantic search.
//!
//! ```text
//! Link manifest ──► ingestion::manifest ──► RawLink list
//!                                             │
//! RawLink ──► ingestion::loader (bounded retry)
//!          ──► ingestion::locator (selector probe)
//!          ──► ingestion::extract ──► normalize (+ timestamps, urls)
//!                                             │
//!                     metadata ──► record::TranscriptRecord ──► JSON writer
//!                                             │
//!              pipeline::prepare_chunks ──► validate + chunking
//!                                             │
//!                              stores::VectorStore (external embedder)
//!
//! Persisted stores ──► stores::locate_latest_store ──► retrieval queries
//! ```

pub mod chunking;
pub mod ingestion;
pub mod metadata;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod stores;
pub mod types;
pub mod validate;

pub use chunking::{Chunk, ChunkSplitter, collection_name};
pub use ingestion::{LoadOutcome, LoadPolicy, RawLink, parse_link_manifest};
pub use pipeline::{IngestOptions, IngestReport, ingest_links, prepare_chunks};
pub use record::TranscriptRecord;
pub use render::{PageSession, Renderer, StaticRenderer};
pub use stores::{ScoredChunk, VectorStore, VectorStoreHandle, locate_latest_store};
pub use types::IngestError;
pub use validate::SentenceValidator;
