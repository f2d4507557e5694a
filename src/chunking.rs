//! Token-bounded overlapping chunk splitting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default chunk size in whitespace tokens.
pub const DEFAULT_CHUNK_SIZE: usize = 120;

/// Default overlap between consecutive chunks, in tokens.
pub const DEFAULT_CHUNK_OVERLAP: usize = 10;

/// Rejected splitter configurations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkConfigError {
    #[error("chunk_size must be non-zero")]
    ZeroChunkSize,

    #[error("chunk_overlap ({overlap}) must be smaller than chunk_size ({size})")]
    OverlapTooLarge { overlap: usize, size: usize },
}

/// Bounded, overlapping text segment prepared for embedding.
///
/// Produced transiently per record; never persisted as a standalone
/// artifact.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    pub sequence_index: usize,
    pub text: String,
    pub source_title: String,
}

/// Splits normalized text into token-bounded overlapping chunks.
#[derive(Clone, Copy, Debug)]
pub struct ChunkSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for ChunkSplitter {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkSplitter {
    /// Builds a splitter; `chunk_overlap` must be smaller than `chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, ChunkConfigError> {
        if chunk_size == 0 {
            return Err(ChunkConfigError::ZeroChunkSize);
        }
        if chunk_overlap >= chunk_size {
            return Err(ChunkConfigError::OverlapTooLarge {
                overlap: chunk_overlap,
                size: chunk_size,
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Scans whitespace tokens with a cursor, emitting a chunk every
    /// `chunk_size` tokens and rewinding the cursor by `chunk_overlap`
    /// before the next accumulation. The trailing partial accumulation is
    /// always emitted, so empty input yields one empty chunk.
    pub fn split(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut splits = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut cursor = 0usize;

        while cursor < tokens.len() {
            current.push(tokens[cursor]);
            if current.len() == self.chunk_size {
                splits.push(current.join(" "));
                current = Vec::new();
                // Overlap is strictly smaller than the chunk just emitted,
                // so the rewind cannot underflow.
                cursor -= self.chunk_overlap;
            }
            cursor += 1;
        }

        splits.push(current.join(" "));
        splits
    }
}

/// Collection name for the embedding writer: first 61 characters of the
/// title, trailing hyphen stripped, hyphens to underscores.
pub fn collection_name(title: &str) -> String {
    let mut name: String = title.chars().take(61).collect();
    if name.ends_with('-') {
        name.pop();
    }
    name.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_text(n: usize) -> String {
        (0..n).map(|i| i.to_string()).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk_size() {
        assert!(ChunkSplitter::new(10, 10).is_err());
        assert!(ChunkSplitter::new(0, 0).is_err());
        assert!(ChunkSplitter::new(10, 9).is_ok());
    }

    #[test]
    fn consecutive_chunks_overlap_by_exactly_the_configured_amount() {
        let splitter = ChunkSplitter::new(8, 3).unwrap();
        let chunks = splitter.split(&numbered_text(30));

        for pair in chunks.windows(2) {
            let left: Vec<&str> = pair[0].split_whitespace().collect();
            let right: Vec<&str> = pair[1].split_whitespace().collect();
            if right.len() == splitter.chunk_size() {
                assert_eq!(
                    &left[left.len() - splitter.chunk_overlap()..],
                    &right[..splitter.chunk_overlap()],
                );
            }
        }
    }

    #[test]
    fn deduplicated_concatenation_reconstructs_the_token_sequence() {
        let splitter = ChunkSplitter::new(8, 3).unwrap();
        let text = numbered_text(30);
        let chunks = splitter.split(&text);

        let mut reconstructed: Vec<String> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let tokens: Vec<&str> = chunk.split_whitespace().collect();
            let skip = if i == 0 { 0 } else { splitter.chunk_overlap() };
            reconstructed.extend(tokens.iter().skip(skip).map(|t| t.to_string()));
        }

        assert_eq!(reconstructed.join(" "), text);
    }

    #[test]
    fn trailing_partial_chunk_is_emitted() {
        let splitter = ChunkSplitter::new(8, 3).unwrap();
        let chunks = splitter.split(&numbered_text(10));
        assert!(chunks.last().unwrap().split_whitespace().count() < 8);
    }

    #[test]
    fn empty_input_yields_one_empty_chunk() {
        let splitter = ChunkSplitter::default();
        assert_eq!(splitter.split(""), vec![String::new()]);
    }

    #[test]
    fn input_shorter_than_chunk_size_is_a_single_chunk() {
        let splitter = ChunkSplitter::new(100, 10).unwrap();
        let chunks = splitter.split("just a few tokens here");
        assert_eq!(chunks, vec!["just a few tokens here".to_string()]);
    }

    #[test]
    fn collection_names_are_truncated_and_underscored() {
        let long = "sds-750-how-to-build-a-career-in-data-science-with-a-mentor-x-extra";
        let name = collection_name(long);
        assert!(name.len() <= 61);
        assert!(!name.contains('-'));

        assert_eq!(collection_name("a-b-"), "a_b");
        assert_eq!(collection_name("plain title"), "plain title");
    }
}
