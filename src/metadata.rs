//! Metadata derivation from URL shape and the page-information fragment.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Fixed 3-letter-month table for date parsing.
pub const MONTHS: &[(&str, &str)] = &[
    ("jan", "01"),
    ("feb", "02"),
    ("mar", "03"),
    ("apr", "04"),
    ("may", "05"),
    ("jun", "06"),
    ("jul", "07"),
    ("aug", "08"),
    ("sep", "09"),
    ("oct", "10"),
    ("nov", "11"),
    ("dec", "12"),
];

static DATE_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z]{3})[A-Za-z]*\.?\s+(\d{1,2}),?\s+(\d{4})").expect("static pattern")
});

static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("static pattern"));

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("static selector"));

/// Derives the episode number from URL shape.
///
/// Three mutually exclusive rules, checked in order:
///
/// 1. `sds-` infix: embedded digits zero-padded to 4 (`sds-003` → `sds-0003`);
///    without digits, the 1-based link position is used instead.
/// 2. `podcast-` infix: the last path segment carries the number verbatim.
/// 3. generic `/podcast/` path (or anything else): sequential fallback from
///    the link position.
pub fn derive_number(url: &Url, position: usize) -> String {
    let raw = url.as_str();

    if let Some(index) = raw.find("sds-") {
        let tail = &raw[index + "sds-".len()..];
        return match LEADING_DIGITS.find(tail) {
            Some(digits) if digits.start() == 0 => {
                let value: u64 = digits.as_str().parse().unwrap_or(0);
                format!("sds-{value:04}")
            }
            _ => format!("sds-{position:04}"),
        };
    }

    if raw.contains("podcast-") {
        if let Some(segment) = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
        {
            if !segment.is_empty() {
                return segment.to_string();
            }
        }
    }

    format!("ep-{position:04}")
}

/// Parses the publication date out of the page-information fragment.
///
/// The date lives in the fragment's last paragraph as a prose date
/// ("Published on Mar 5, 2021"); the month is matched case-insensitively
/// against the 3-letter table. Returns an 8-digit `YYYYMMDD` string.
pub fn derive_date(info_markup: &str) -> Option<String> {
    let fragment = Html::parse_fragment(info_markup);
    let last_paragraph = fragment
        .select(&PARAGRAPH)
        .map(|node| node.text().collect::<String>())
        .last()?;
    parse_prose_date(&last_paragraph)
}

/// Parses a prose date ("Mar 5, 2021", "March 5 2021") into `YYYYMMDD`.
pub fn parse_prose_date(text: &str) -> Option<String> {
    for capture in DATE_IN_TEXT.captures_iter(text) {
        let month_key = capture[1].to_lowercase();
        let Some((_, month)) = MONTHS.iter().find(|(name, _)| *name == month_key) else {
            continue;
        };
        let day: u32 = capture[2].parse().ok()?;
        let year = &capture[3];
        if day == 0 || day > 31 {
            continue;
        }
        return Some(format!("{year}{month}{day:02}"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn sds_numbers_are_zero_padded() {
        let u = url("https://example.com/podcast/sds-003-Some-Title");
        assert_eq!(derive_number(&u, 7), "sds-0003");
    }

    #[test]
    fn sds_without_digits_falls_back_to_position() {
        let u = url("https://example.com/podcast/sds-special-episode");
        assert_eq!(derive_number(&u, 12), "sds-0012");
    }

    #[test]
    fn podcast_infix_takes_the_last_segment() {
        let u = url("https://example.com/shows/podcast-041-guest");
        assert_eq!(derive_number(&u, 3), "podcast-041-guest");
    }

    #[test]
    fn generic_podcast_path_synthesizes_a_sequential_number() {
        let u = url("https://example.com/podcast/a-great-conversation");
        assert_eq!(derive_number(&u, 9), "ep-0009");
    }

    #[test]
    fn rules_are_checked_in_order() {
        // Both infixes present: the sds- rule wins.
        let u = url("https://example.com/podcast-feed/sds-100-title");
        assert_eq!(derive_number(&u, 1), "sds-0100");
    }

    #[test]
    fn date_comes_from_the_last_paragraph() {
        let markup = "<p>Guest: Someone</p><p>Published on Mar 5, 2021</p>";
        assert_eq!(derive_date(markup).as_deref(), Some("20210305"));
    }

    #[test]
    fn prose_dates_parse_with_and_without_comma() {
        assert_eq!(parse_prose_date("Dec 31 1999").as_deref(), Some("19991231"));
        assert_eq!(
            parse_prose_date("aired January 7, 2023").as_deref(),
            Some("20230107")
        );
    }

    #[test]
    fn unknown_months_are_skipped() {
        assert_eq!(parse_prose_date("Xyz 12, 2021"), None);
        assert_eq!(derive_date("<p>no date here</p>"), None);
    }
}
