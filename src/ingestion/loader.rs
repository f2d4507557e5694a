//! Bounded-retry state machine that loads one dynamic page.
//!
//! The loader drives a [`PageSession`] through Idle → Loading → {Loaded,
//! Failed}. Every attempt is recorded as a typed [`PageLoadAttempt`] rather
//! than a suppressed exception; the driver never returns an error — a page
//! that will not load is a reportable skip, not a fault.

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::render::{PageSession, RenderError};

/// Per-attempt navigation timeout.
pub const NAV_TIMEOUT: Duration = Duration::from_secs(25);

/// Default interaction timeout installed after a successful navigation, so
/// subsequent page queries get a longer leash than the navigation itself.
pub const SETTLED_TIMEOUT: Duration = Duration::from_secs(60);

/// Default retry ceiling.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Loader states. `Idle` and `Loading` exist only while [`load_page`] runs;
/// callers observe `Loaded` or `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// What a single attempt produced.
///
/// All failure kinds are retried identically; the distinction is kept for
/// diagnostics only.
#[derive(Clone, Debug)]
pub enum AttemptOutcome {
    Loaded,
    TimedOut,
    NavigationFailed(String),
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Loaded)
    }
}

/// One recorded navigation attempt, scoped to the retry loop.
#[derive(Clone, Debug)]
pub struct PageLoadAttempt {
    pub url: Url,
    /// 1-based attempt number.
    pub attempt_index: u32,
    pub outcome: AttemptOutcome,
}

/// Retry and timeout policy for the loader.
#[derive(Clone, Copy, Debug)]
pub struct LoadPolicy {
    pub max_retries: u32,
    pub nav_timeout: Duration,
    pub settled_timeout: Duration,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            nav_timeout: NAV_TIMEOUT,
            settled_timeout: SETTLED_TIMEOUT,
        }
    }
}

/// Final loader verdict plus the full attempt history.
#[derive(Debug)]
pub struct LoadOutcome {
    pub state: LoadState,
    pub attempts: Vec<PageLoadAttempt>,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Number of attempts actually made.
    pub fn attempt_count(&self) -> u32 {
        self.attempts.len() as u32
    }
}

/// Attempts to load `url` up to `policy.max_retries` times.
///
/// Each attempt navigates with the fixed per-attempt timeout; the first
/// success installs the longer default interaction timeout on the session
/// and exits the loop. There is no backoff between attempts. Never returns
/// an error: exhaustion yields [`LoadState::Failed`] and the caller skips
/// the link.
pub async fn load_page(session: &dyn PageSession, url: &Url, policy: &LoadPolicy) -> LoadOutcome {
    let mut state = LoadState::Idle;
    let mut attempts = Vec::with_capacity(policy.max_retries as usize);

    for attempt_index in 1..=policy.max_retries {
        state = LoadState::Loading;
        let outcome = match session.navigate(url, policy.nav_timeout).await {
            Ok(()) => match session.set_default_timeout(policy.settled_timeout).await {
                Ok(()) => AttemptOutcome::Loaded,
                Err(err) => AttemptOutcome::NavigationFailed(err.to_string()),
            },
            Err(RenderError::Timeout { .. }) => AttemptOutcome::TimedOut,
            Err(err) => AttemptOutcome::NavigationFailed(err.to_string()),
        };

        let success = outcome.is_success();
        if !success {
            debug!(%url, attempt = attempt_index, ?outcome, "load attempt failed");
        }
        attempts.push(PageLoadAttempt {
            url: url.clone(),
            attempt_index,
            outcome,
        });

        if success {
            return LoadOutcome {
                state: LoadState::Loaded,
                attempts,
            };
        }
    }

    if state == LoadState::Idle {
        // max_retries of zero: no attempt was ever made.
        warn!(%url, "loader invoked with a zero retry ceiling");
    }
    warn!(%url, max_retries = policy.max_retries, "page failed to load after all retries");
    LoadOutcome {
        state: LoadState::Failed,
        attempts,
    }
}
