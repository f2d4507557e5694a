//! Prioritized content-selector probe.
//!
//! Transcript markup moves around as the site is redesigned, so the locator
//! probes an ordered list of selector candidates and takes the first match.
//! No match is a structural condition, not a transient one: the caller logs
//! and skips without retrying.

use tracing::{debug, info};

use crate::render::{PageSession, RenderError};

/// One selector to try, in priority order.
#[derive(Clone, Copy, Debug)]
pub struct SelectorCandidate {
    /// Short name used in logs.
    pub name: &'static str,
    /// CSS selector handed to the rendering session.
    pub selector: &'static str,
}

/// Default probe order for transcript content, newest page layout first.
pub const DEFAULT_CONTENT_SELECTORS: &[SelectorCandidate] = &[
    SelectorCandidate {
        name: "transcript-section",
        selector: "section.transcript",
    },
    SelectorCandidate {
        name: "transcript-div",
        selector: "div.transcript",
    },
    SelectorCandidate {
        name: "podcast-body",
        selector: "div.podcast-content",
    },
    SelectorCandidate {
        name: "article-body",
        selector: "article",
    },
];

/// Located transcript markup.
#[derive(Clone, Debug)]
pub struct ContentBlock {
    /// Selector that matched.
    pub selector: String,
    /// Inner markup of the matched node.
    pub inner_html: String,
}

/// Probes `candidates` in order and returns the first match.
///
/// Returns `Ok(None)` when nothing matches — the page has no transcript.
pub async fn locate_content(
    session: &dyn PageSession,
    candidates: &[SelectorCandidate],
) -> Result<Option<ContentBlock>, RenderError> {
    for candidate in candidates {
        match session.inner_html(candidate.selector).await? {
            Some(markup) => {
                info!(candidate = candidate.name, "transcript content located");
                return Ok(Some(ContentBlock {
                    selector: candidate.selector.to_string(),
                    inner_html: markup,
                }));
            }
            None => {
                debug!(candidate = candidate.name, "selector did not match");
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use url::Url;

    /// Session serving a fixed selector → markup table.
    struct TableSession {
        entries: Vec<(&'static str, &'static str)>,
    }

    #[async_trait]
    impl PageSession for TableSession {
        async fn navigate(&self, _url: &Url, _timeout: Duration) -> Result<(), RenderError> {
            Ok(())
        }

        async fn set_default_timeout(&self, _timeout: Duration) -> Result<(), RenderError> {
            Ok(())
        }

        async fn inner_html(&self, selector: &str) -> Result<Option<String>, RenderError> {
            Ok(self
                .entries
                .iter()
                .find(|(s, _)| *s == selector)
                .map(|(_, markup)| markup.to_string()))
        }

        async fn title(&self) -> Result<String, RenderError> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn first_matching_candidate_wins() {
        let session = TableSession {
            entries: vec![
                ("div.transcript", "<p>secondary</p>"),
                ("section.transcript", "<p>primary</p>"),
            ],
        };

        let block = locate_content(&session, DEFAULT_CONTENT_SELECTORS)
            .await
            .unwrap()
            .expect("content should be located");

        assert_eq!(block.selector, "section.transcript");
        assert_eq!(block.inner_html, "<p>primary</p>");
    }

    #[tokio::test]
    async fn probe_falls_through_to_later_candidates() {
        let session = TableSession {
            entries: vec![("article", "<p>fallback</p>")],
        };

        let block = locate_content(&session, DEFAULT_CONTENT_SELECTORS)
            .await
            .unwrap()
            .expect("content should be located");

        assert_eq!(block.selector, "article");
    }

    #[tokio::test]
    async fn no_match_means_transcript_absent() {
        let session = TableSession { entries: vec![] };
        let block = locate_content(&session, DEFAULT_CONTENT_SELECTORS)
            .await
            .unwrap();
        assert!(block.is_none());
    }
}
