//! Paragraph extraction from located transcript markup.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::normalize;

/// Fragment emitted by the site's collapsed-transcript toggle; never content.
const BOILERPLATE_MARKER: &str = "Show all";

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("static selector"));
static BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div").expect("static selector"));

/// Pulls and deduplicates text fragments from transcript markup.
///
/// Paragraph-level nodes are preferred when more than one exists; otherwise
/// block-level nodes are used if any exist. Each fragment is normalized
/// before filtering, fragments that clean down to nothing or to the
/// "Show all" marker are dropped, and duplicates are removed preserving
/// first-seen order. The survivors are joined with single spaces.
pub fn extract_paragraphs(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);

    let paragraphs: Vec<String> = fragment
        .select(&PARAGRAPH)
        .map(|node| node.text().collect::<String>())
        .collect();

    let texts = if paragraphs.len() > 1 {
        paragraphs
    } else {
        let blocks: Vec<String> = fragment
            .select(&BLOCK)
            .map(|node| node.text().collect::<String>())
            .collect();
        if blocks.is_empty() { paragraphs } else { blocks }
    };

    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for text in texts {
        let cleaned = normalize::clean_text(&text);
        if cleaned.is_empty() || cleaned.eq_ignore_ascii_case(BOILERPLATE_MARKER) {
            continue;
        }
        if seen.insert(cleaned.clone()) {
            kept.push(cleaned);
        }
    }

    kept.join(" ")
}
