//! Timestamp stripping sub-pass.
//!
//! Transcript text carries inline timecodes in several shapes. Each pattern
//! below is fully resolved (global replace) before the next runs; the order
//! matters because later, looser patterns would otherwise eat the context
//! that earlier ones key on.

use std::sync::LazyLock;

use regex::Regex;

struct TimestampPattern {
    pattern: &'static str,
    replacement: &'static str,
}

/// Priority-ordered timestamp shapes.
const TIMESTAMP_PATTERNS: &[TimestampPattern] = &[
    // [00:12:34]
    TimestampPattern {
        pattern: r"\[\d+:\d+:\d+\]",
        replacement: "",
    },
    // [inaudible 00:12:34]
    TimestampPattern {
        pattern: r"\s\[\w+ \d+:\d+:\d+\]",
        replacement: "",
    },
    // [crosstalk 12:34]
    TimestampPattern {
        pattern: r"\s\[\w+ \d+:\d+\]",
        replacement: "",
    },
    // (13:44) acts as a sentence break
    TimestampPattern {
        pattern: r"\s\(\d+:\d+\)",
        replacement: ". ",
    },
    // [33:28]Parameters: break the sentence, keep the letter
    TimestampPattern {
        pattern: r"\s\[\d+:\d+\]([A-Z])",
        replacement: ". ${1}",
    },
    // bare [12:34]
    TimestampPattern {
        pattern: r"\[\d+:\d+\]",
        replacement: "",
    },
    // bare (12:34)
    TimestampPattern {
        pattern: r"\(\d+:\d+\)",
        replacement: "",
    },
    // bare 00:12:34
    TimestampPattern {
        pattern: r"\b\d+:\d+:\d+\b",
        replacement: "",
    },
];

static COMPILED: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    TIMESTAMP_PATTERNS
        .iter()
        .map(|entry| {
            (
                Regex::new(entry.pattern).expect("static pattern"),
                entry.replacement,
            )
        })
        .collect()
});

/// Removes timecodes from transcript text.
///
/// Leaves surrounding whitespace unfused; callers collapse whitespace after
/// this pass.
pub fn remove_timestamps(text: &str) -> String {
    let mut text = text.to_string();
    for (regex, replacement) in COMPILED.iter() {
        text = regex.replace_all(&text, *replacement).into_owned();
    }
    text
}
