//! Rendering seam between the pipeline and whatever drives the pages.
//!
//! Transcript pages are dynamically rendered, so the pipeline talks to an
//! abstract [`PageSession`] rather than to raw HTTP. A [`Renderer`] opens a
//! fresh session per link (isolation against a hung page); browser-backed
//! drivers implement the same traits outside this crate. [`StaticRenderer`]
//! ships as the built-in implementation for pages that do not require script
//! execution, and is what the tests drive.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

/// Failures reported by the rendering seam.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Navigation failed before the page settled.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Navigation exceeded the per-attempt timeout.
    #[error("navigation to {url} timed out after {timeout_ms} ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// A page query was issued before any navigation succeeded.
    #[error("no page has been loaded in this session")]
    NoPage,

    /// The selector string could not be parsed.
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),
}

/// One live page-rendering session.
///
/// Sessions are single-page: `navigate` replaces whatever was loaded before,
/// and the query methods operate on the most recent successful navigation.
#[async_trait]
pub trait PageSession: Send + Sync {
    /// Navigates to `url`, waiting at most `timeout` for the page to settle.
    async fn navigate(&self, url: &Url, timeout: Duration) -> Result<(), RenderError>;

    /// Sets the default timeout applied to subsequent page queries.
    async fn set_default_timeout(&self, timeout: Duration) -> Result<(), RenderError>;

    /// Returns the inner markup of the first node matching `selector`, or
    /// `None` when the selector matches nothing on the current page.
    async fn inner_html(&self, selector: &str) -> Result<Option<String>, RenderError>;

    /// Returns the current page title.
    async fn title(&self) -> Result<String, RenderError>;
}

/// Opens fresh [`PageSession`]s, one per link.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn PageSession>, RenderError>;
}

/// Renderer for statically served pages, backed by `reqwest` + `scraper`.
#[derive(Clone, Debug)]
pub struct StaticRenderer {
    client: Client,
}

impl StaticRenderer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Renderer for StaticRenderer {
    async fn open_session(&self) -> Result<Box<dyn PageSession>, RenderError> {
        Ok(Box::new(StaticSession {
            client: self.client.clone(),
            page: Mutex::new(None),
        }))
    }
}

/// Session state for [`StaticRenderer`]: the raw body of the last page.
///
/// `scraper::Html` is not `Send`, so the session stores the body string and
/// re-parses inside each query. Pages here are single transcripts; the parse
/// cost is irrelevant next to the network fetch.
struct StaticSession {
    client: Client,
    page: Mutex<Option<String>>,
}

#[async_trait]
impl PageSession for StaticSession {
    async fn navigate(&self, url: &Url, timeout: Duration) -> Result<(), RenderError> {
        let request = self.client.get(url.clone()).timeout(timeout);
        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                RenderError::Timeout {
                    url: url.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                }
            } else {
                RenderError::Navigation {
                    url: url.to_string(),
                    reason: err.to_string(),
                }
            }
        })?;
        let response = response
            .error_for_status()
            .map_err(|err| RenderError::Navigation {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        let body = response.text().await.map_err(|err| RenderError::Navigation {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        *self.page.lock() = Some(body);
        Ok(())
    }

    async fn set_default_timeout(&self, _timeout: Duration) -> Result<(), RenderError> {
        // Static pages have no further interactions to time out.
        Ok(())
    }

    async fn inner_html(&self, selector: &str) -> Result<Option<String>, RenderError> {
        let body = self.page.lock().clone().ok_or(RenderError::NoPage)?;
        let parsed = Selector::parse(selector)
            .map_err(|_| RenderError::InvalidSelector(selector.to_string()))?;
        let document = Html::parse_document(&body);
        Ok(document
            .select(&parsed)
            .next()
            .map(|node| node.inner_html()))
    }

    async fn title(&self) -> Result<String, RenderError> {
        let body = self.page.lock().clone().ok_or(RenderError::NoPage)?;
        let selector = Selector::parse("title")
            .map_err(|_| RenderError::InvalidSelector("title".to_string()))?;
        let document = Html::parse_document(&body);
        Ok(document
            .select(&selector)
            .next()
            .map(|node| node.text().collect::<String>().trim().to_string())
            .unwrap_or_default())
    }
}
