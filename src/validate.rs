//! Sentence-acceptance filter applied before embedding.

/// Recurring intro/outro and filler phrases that carry no searchable
/// content. Matched case-insensitively.
pub const BOILERPLATE_PHRASES: &[&str] = &[
    "Data Science Coach and Lifestyle Entrepreneur",
    "Welcome to the Super Data Science Podcast",
    "look forward to seeing you",
    "happy analyzing",
    "This is Five-Minute Friday on",
    "I was really excited",
    "see you back here next time",
];

/// Minimum sentence length accepted by default, in bytes.
pub const DEFAULT_MIN_SENTENCE_LEN: usize = 35;

/// Pure predicate deciding whether a sentence is worth embedding.
///
/// A sentence is rejected when it contains any boilerplate phrase
/// (case-insensitively) or when its length does not exceed the minimum
/// threshold.
#[derive(Clone, Debug)]
pub struct SentenceValidator {
    min_len: usize,
    phrases: Vec<String>,
}

impl Default for SentenceValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SENTENCE_LEN)
    }
}

impl SentenceValidator {
    pub fn new(min_len: usize) -> Self {
        Self {
            min_len,
            phrases: BOILERPLATE_PHRASES
                .iter()
                .map(|phrase| phrase.to_lowercase())
                .collect(),
        }
    }

    /// Replaces the boilerplate phrase list.
    #[must_use]
    pub fn with_phrases(mut self, phrases: &[&str]) -> Self {
        self.phrases = phrases.iter().map(|phrase| phrase.to_lowercase()).collect();
        self
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn is_valid(&self, sentence: &str) -> bool {
        if sentence.len() <= self.min_len {
            return false;
        }
        let lowered = sentence.to_lowercase();
        !self.phrases.iter().any(|phrase| lowered.contains(phrase))
    }
}

/// Splits normalized text into sentences on `.`/`?`/`!` terminators,
/// keeping the terminator with its sentence. Empty segments are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split_inclusive(['.', '?', '!'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}
