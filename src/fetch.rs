//! HTTP fetcher for article pages.
//!
//! Retrieves raw HTML for a single URL with browser-like headers. A failed
//! fetch fails the whole pipeline; retrying is the caller's decision.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Browser-like User-Agent. Many publishers serve stripped-down or blocked
/// pages to obvious bot agents.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Standard browser Accept header for document navigation.
const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// HTTP fetcher with a browser-like identity.
///
/// Cheap to clone and safe to share across concurrent pipeline invocations;
/// `reqwest::Client` uses an internal connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher with no request timeout.
    ///
    /// The pipeline imposes no time budget of its own; callers that need
    /// one should use [`Fetcher::with_timeout`] or wrap the call.
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Create a fetcher whose requests abort after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Fetch the raw HTML of `url`.
    ///
    /// Returns `Error::Fetch` on transport failure or any non-2xx status.
    /// No retries are performed.
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url.as_str())
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(|e| Error::Fetch {
                status: None,
                message: format!("{url}: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                status: Some(status.as_u16()),
                message: format!("{url}: HTTP {status}"),
            });
        }

        response.text().await.map_err(|e| Error::Fetch {
            status: Some(status.as_u16()),
            message: format!("{url}: body read failed: {e}"),
        })
    }
}
