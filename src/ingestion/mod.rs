//! Transcript acquisition: manifest parsing, page loading, content location,
//! and paragraph extraction.
//!
//! * [`manifest`] — upstream redirect manifest → [`RawLink`]s.
//! * [`loader`] — bounded-retry page-load state machine.
//! * [`locator`] — prioritized content-selector probe.
//! * [`extract`] — paragraph extraction and ordered deduplication.

pub mod extract;
pub mod loader;
pub mod locator;
pub mod manifest;

pub use extract::extract_paragraphs;
pub use loader::{LoadOutcome, LoadPolicy, LoadState, PageLoadAttempt, load_page};
pub use locator::{ContentBlock, DEFAULT_CONTENT_SELECTORS, SelectorCandidate, locate_content};
pub use manifest::{RawLink, parse_link_manifest};
