//! Upstream link manifest parsing.
//!
//! The site publishes its page inventory as a redirect table: a JSON array of
//! `{oldUrl, newUrl}` pairs. Podcast pages are the entries whose new URL sits
//! under `/podcast/`. An empty or wrong-shaped manifest is fatal — no links
//! means no possible work.

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::types::IngestError;

/// One discovered source page, immutable for the rest of the run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawLink {
    pub url: Url,
    /// 1-based position within the collection run; feeds the metadata
    /// deriver's sequential fallback numbering.
    pub position: usize,
}

#[derive(Debug, Deserialize)]
struct RedirectEntry {
    #[serde(rename = "oldUrl")]
    #[allow(dead_code)]
    old_url: String,
    #[serde(rename = "newUrl")]
    new_url: String,
}

/// Parses the redirect manifest into podcast links.
///
/// Entries are joined onto `base` and filtered to `/podcast/` paths;
/// positions are assigned 1-based over the kept links in manifest order.
pub fn parse_link_manifest(
    base: &Url,
    manifest: &serde_json::Value,
) -> Result<Vec<RawLink>, IngestError> {
    let entries = manifest
        .as_array()
        .ok_or_else(|| IngestError::MalformedManifest("expected a JSON array".to_string()))?;
    if entries.is_empty() {
        return Err(IngestError::MalformedManifest(
            "redirect table is empty".to_string(),
        ));
    }

    let mut links = Vec::new();
    for entry in entries {
        let entry: RedirectEntry = serde_json::from_value(entry.clone()).map_err(|err| {
            IngestError::MalformedManifest(format!("bad redirect entry: {err}"))
        })?;
        let url = base
            .join(entry.new_url.trim_start_matches('/'))
            .map_err(|err| IngestError::MalformedManifest(format!("bad newUrl: {err}")))?;
        if url.path().contains("/podcast/") {
            links.push(RawLink {
                url,
                position: links.len() + 1,
            });
        }
    }

    info!(count = links.len(), "podcast link collection completed");
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("https://www.example.com").unwrap()
    }

    #[test]
    fn keeps_only_podcast_links_with_positions() {
        let manifest = json!([
            {"oldUrl": "/sds-001", "newUrl": "/podcast/sds-001-first"},
            {"oldUrl": "/about", "newUrl": "/company/about"},
            {"oldUrl": "/sds-002", "newUrl": "/podcast/sds-002-second"},
        ]);

        let links = parse_link_manifest(&base(), &manifest).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].position, 1);
        assert_eq!(links[1].position, 2);
        assert_eq!(
            links[1].url.as_str(),
            "https://www.example.com/podcast/sds-002-second"
        );
    }

    #[test]
    fn non_array_manifest_is_fatal() {
        let manifest = json!({"oldUrl": "a", "newUrl": "b"});
        let err = parse_link_manifest(&base(), &manifest).unwrap_err();
        assert!(matches!(err, IngestError::MalformedManifest(_)));
    }

    #[test]
    fn empty_manifest_is_fatal() {
        let err = parse_link_manifest(&base(), &json!([])).unwrap_err();
        assert!(matches!(err, IngestError::MalformedManifest(_)));
    }

    #[test]
    fn malformed_entry_is_fatal() {
        let manifest = json!([{"newUrl": "/podcast/sds-003"}]);
        let err = parse_link_manifest(&base(), &manifest).unwrap_err();
        assert!(matches!(err, IngestError::MalformedManifest(_)));
    }
}
