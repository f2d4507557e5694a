//! URL-artifact repair sub-pass.
//!
//! Show-notes text sometimes renders with links fused into the surrounding
//! prose. Two artifacts are worth fixing; anything fancier would need a real
//! URL grammar, which is out of scope. Best-effort: residual malformation is
//! acceptable.

use std::sync::LazyLock;

use regex::Regex;

// Text glued directly onto a "www."-leading domain. Path separators and
// scheme colons are excluded so "https://www." stays intact.
static GLUED_WWW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\s/:])(www\.)").expect("static pattern"));

// Two URLs concatenated back to back.
static DOUBLED_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(https?://\S+?)(https?://)").expect("static pattern"));

/// Separates concatenation artifacts around URLs.
pub fn repair_urls(text: &str) -> String {
    let text = GLUED_WWW.replace_all(text, "${1} ${2}");
    DOUBLED_SCHEME.replace_all(&text, "${1} ${2}").into_owned()
}
