//! Order-sensitive multi-pass text repair.
//!
//! Two stages run over a single string: a fixed ordered phrase-substitution
//! table (contraction expansion, control characters, boilerplate phrases),
//! then ten token-repair passes that fix merged-token artifacts left behind
//! by the transcript renderer. Order is a correctness contract on both
//! stages — later entries act on text already rewritten by earlier ones —
//! so the tables are explicit slices, never associative collections.
//!
//! The normalizer is a best-effort heuristic repair layer, not a grammar
//! engine: it never fails, and ambiguous input comes out imperfect rather
//! than rejected. Identical input and tables always produce identical
//! output.

pub mod timestamps;
pub mod urls;

use std::sync::LazyLock;

use regex::Regex;

pub use timestamps::remove_timestamps;
pub use urls::repair_urls;

/// Ordered literal substitutions applied before token repair.
///
/// The order is load-bearing: `" . "` and `"..."` entries clean up residue
/// left by the contraction and removal entries above them.
pub static PHRASE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("\t", " "),
    ("\n", " "),
    ("--", "-"),
    ("I'll ", "I will "),
    ("I’ll", "I will"),
    ("you're ", "you are "),
    ("they’re", "they are"),
    ("They’re", "They are"),
    ("we'll ", "we will "),
    ("We'll", "We will"),
    ("we'll", "we will"),
    ("don't", "do not"),
    ("Don't", "Do not"),
    ("we've", "we have"),
    ("We've", "We have"),
    ("they’d", "they would"),
    ("They’d", "They would"),
    (" ...", "."),
    ("(Laughs)", ""),
    ("there’ll", "there will"),
    ("There’ll", "There will"),
    ("Can't", "Can not"),
    ("can't", "can not"),
    ("He’s", "He is"),
    ("You’d", "You would"),
    ("you’d", "you would"),
    ("there’re", "there are"),
    ("who’s", "who is"),
    ("they’ve", "they have"),
    ("They’ve", "They have"),
    ("You'll ", "You will "),
    ("you'll", "you will"),
    ("won’t", "will not"),
    ("that’ll", "that will"),
    ("wasn’t", "was not"),
    ("didn't", "did not"),
    ("Here’s", "Here is"),
    ("we’d", "we would"),
    ("We’d", "We would"),
    ("you've", "you have"),
    ("what's", "what is"),
    ("We’re", "We are"),
    ("don’t", "do not"),
    ("Don’t", "Do not"),
    ("didn’t", "did not"),
    ("Can’t", "Can not"),
    ("What’s", "What is"),
    ("wouldn’t", "would not"),
    ("we’ve", "we have"),
    ("We’ve", "We have"),
    ("can’t", "can not"),
    ("we’re", "we are"),
    ("I’d", "I would"),
    ("shouldn’t", "should not"),
    ("there’s", "there is"),
    ("you’ll", "you will"),
    ("You’ll", "You will"),
    ("There’s", "There is"),
    ("else’s", "else is"),
    ("I'm ", "I am "),
    ("I’m", "I am"),
    ("couldn’t", "could not"),
    ("They’ll", "They will"),
    ("we're", "we are"),
    ("they’ll", "they will"),
    ("We’ll", "We will"),
    ("we’ll", "we will"),
    ("he’s", "he is"),
    ("doesn’t", "does not"),
    ("I've", "I have"),
    ("you’ve", "you have"),
    ("You’ve", "You have"),
    ("It's", "It is"),
    ("it's ", "it is "),
    ("aren’t", "are not"),
    ("Aren’t", "Are not"),
    ("isn’t", "is not"),
    ("what’s", "what is"),
    ("haven’t", "have not"),
    ("Haven’t", "Have not"),
    ("it’s ", "it is "),
    ("It’s", "It is"),
    ("I’ve", "I have"),
    ("he’ll", "he will"),
    ("He’ll", "He will"),
    ("that's ", "that is "),
    ("wasn't", "was not"),
    ("That’s", "That is"),
    ("that’s", "that is"),
    ("they'll", "they will"),
    ("there‘s", "there is"),
    ("That's ", "That is "),
    ("he's", "he is"),
    ("He's", "He is"),
    ("there's ", "there is "),
    ("they're", "they are"),
    ("They're", "They are"),
    ("hasn’t", "has not"),
    ("Hasn’t", "Has not"),
    ("doesn't ", "does not"),
    ("you’re", "you are"),
    ("You’re", "You are"),
    ("there's", "there is"),
    ("There's", "There is"),
    ("Podcast Transcript", ""),
    ("(background music plays)", ""),
    (" ] ", "] "),
    (" . ", ". "),
    ("...", "."),
    ("?.", "?"),
    ("!.", "!"),
];

/// Cleans one block of transcript text.
///
/// Applies the phrase table in order, runs the token-repair passes, then
/// collapses repeated whitespace and trims. The result carries the
/// normalized-text invariant: no tab or newline characters, no doubled
/// spaces, and re-normalizing it is a no-op.
pub fn clean_text(text: &str) -> String {
    let mut text = text.trim().to_string();
    for (pattern, replacement) in PHRASE_SUBSTITUTIONS {
        text = text.replace(pattern, replacement);
    }
    let repaired = repair_tokens(&text.replace("  ", " "));
    collapse_whitespace(&repaired)
}

/// Collapses any run of whitespace to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

static PERIOD_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]\.\d").expect("static pattern"));
static DIGIT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[A-Za-z]").expect("static pattern"));
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z][A-Z]").expect("static pattern"));
static LOWER_PERIOD_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]\.[A-Z]").expect("static pattern"));
static QUESTION_JOIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+\?[A-Za-z]+").expect("static pattern"));
static BANG_JOIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+![A-Za-z]+").expect("static pattern"));
static PERIOD_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[A-Za-z]+\."[A-Za-z]+"#).expect("static pattern"));
static COLON_JOIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+:[A-Za-z]+").expect("static pattern"));
static YEAR_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}\.\d").expect("static pattern"));
static COMMA_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+,\d+").expect("static pattern"));

/// Runs the ten token-repair passes in their fixed order.
///
/// Each pass scans space-delimited tokens for its pattern, builds an ordered
/// substitution list from the tokens that currently match, and applies every
/// substitution to the full string before the next pass runs.
pub fn repair_tokens(text: &str) -> String {
    // 1. non-digit "." digits: "e.9" -> "e. 9"
    let text = token_pass(text, |token| {
        if !PERIOD_DIGITS.is_match(token) {
            return None;
        }
        let (head, tail) = token.split_once('.')?;
        Some((token.to_string(), format!("{head}. {tail}")))
    });

    // 2. digits glued to a letter: "9Self" -> "9 Self"
    let text = token_pass(&text, |token| {
        let matched = DIGIT_LETTER.find(token)?.as_str();
        let (digits, letter) = matched.split_at(matched.len() - 1);
        Some((matched.to_string(), format!("{digits} {letter}")))
    });

    // 3. lowercase glued to uppercase: "benefitsQuitting" -> "benefits Quitting"
    let text = token_pass(&text, |token| {
        let matched = LOWER_UPPER.find(token)?.as_str();
        let mut chars = matched.chars();
        let lower = chars.next()?;
        let upper = chars.next()?;
        Some((matched.to_string(), format!("{lower} {upper}")))
    });

    // 4. lowercase "." uppercase: "prohibited.Underage" -> "prohibited. Underage"
    let text = token_pass(&text, |token| {
        let matched = LOWER_PERIOD_UPPER.find(token)?.as_str();
        let (head, tail) = matched.split_once('.')?;
        Some((matched.to_string(), format!("{head}. {tail}")))
    });

    // 5. "while?Artem" -> "while? Artem"
    let text = token_pass(&text, |token| {
        let matched = QUESTION_JOIN.find(token)?.as_str();
        let (head, tail) = matched.split_once('?')?;
        Some((matched.to_string(), format!("{head}? {tail}")))
    });

    // 6. "word!word" joins with "?" (intentional, preserved exactly)
    let text = token_pass(&text, |token| {
        let matched = BANG_JOIN.find(token)?.as_str();
        let (head, tail) = matched.split_once('!')?;
        Some((matched.to_string(), format!("{head}? {tail}")))
    });

    // 7. "needed.\"Kirill" -> "needed. \"Kirill"
    let text = token_pass(&text, |token| {
        let matched = PERIOD_QUOTE.find(token)?.as_str();
        let (head, tail) = matched.split_once('.')?;
        Some((matched.to_string(), format!("{head}. {tail}")))
    });

    // 8. colon treated as a sentence break: "intro:Next" -> "intro. Next"
    let text = token_pass(&text, |token| {
        let matched = COLON_JOIN.find(token)?.as_str();
        let (head, tail) = matched.split_once(':')?;
        Some((matched.to_string(), format!("{head}. {tail}")))
    });

    // 9. 4-digit year "." digit: "2019.3" -> "2019. 3"
    let text = token_pass(&text, |token| {
        let matched = YEAR_PERIOD.find(token)?.as_str();
        let (head, tail) = matched.split_once('.')?;
        Some((matched.to_string(), format!("{head}. {tail}")))
    });

    // 10. de-thousand-separate: "200,000" -> "200000"
    token_pass(&text, |token| {
        let matched = COMMA_DIGITS.find(token)?.as_str();
        Some((matched.to_string(), matched.replace(',', "")))
    })
}

/// One token-repair pass: collect substitutions from currently-matching
/// tokens (in token order, first occurrence wins), then apply them all to
/// the full string.
fn token_pass(text: &str, matcher: impl Fn(&str) -> Option<(String, String)>) -> String {
    let mut substitutions: Vec<(String, String)> = Vec::new();
    for token in text.split(' ') {
        if let Some(pair) = matcher(token) {
            if !substitutions.iter().any(|(from, _)| *from == pair.0) {
                substitutions.push(pair);
            }
        }
    }

    let mut out = text.to_string();
    for (from, to) in &substitutions {
        out = out.replace(from.as_str(), to.as_str());
    }
    out
}
