//! Article listing API access with a fixed retry schedule.
//!
//! # Architecture
//!
//! - [`FetchPage`]: core trait, "give me page N"
//! - [`HttpPageSource`]: reqwest-backed implementation hitting `{api_base}/articles`
//! - [`RetryFetch`]: decorator that retries any [`FetchPage`] on transient errors
//! - [`Sleeper`]: the wait between attempts, swappable so tests never sleep
//!
//! # Retry Strategy
//!
//! - Up to 3 retries (4 attempts total)
//! - Waits of 2s, 5s, then 15s between attempts
//! - Only [`EtlError::Http`] and [`EtlError::Network`] are retried; a body that
//!   fails to decode is returned immediately

use crate::config::EtlConfig;
use crate::error::{EtlError, Result};
use crate::models::Page;
use reqwest::Client;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Waits between failed attempts.
pub const RETRY_DELAYS: [Duration; 3] = [
    Duration::from_secs(2),
    Duration::from_secs(5),
    Duration::from_secs(15),
];

/// Anything that can produce one page of article records.
pub trait FetchPage {
    /// Fetch page `page` (1-based).
    async fn fetch_page(&self, page: u32) -> Result<Page>;
}

/// Pause between retry attempts.
pub trait Sleeper {
    async fn sleep(&self, delay: Duration);
}

/// Real wall-clock sleeper backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Build `{api_base}/articles?page={page}&per_page={per_page}`.
///
/// A trailing slash on `api_base` is tolerated; `per_page` is passed through
/// verbatim even above the service's documented maximum.
pub fn articles_url(api_base: &Url, page: u32, per_page: u32) -> Result<Url> {
    let mut url = api_base.clone();
    url.path_segments_mut()
        .map_err(|_| EtlError::config(format!("api_base `{api_base}` cannot be a base URL")))?
        .pop_if_empty()
        .push("articles");
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("per_page", &per_page.to_string());
    Ok(url)
}

/// Fetches pages from the live listing API.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    api_base: Url,
    per_page: u32,
}

impl HttpPageSource {
    /// Build a source with a client whose requests time out after `timeout`.
    pub fn new(api_base: Url, per_page: u32, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_base,
            per_page,
        })
    }

    pub fn from_config(config: &EtlConfig) -> Result<Self> {
        Self::new(config.api_base.clone(), config.per_page, config.timeout)
    }
}

impl FetchPage for HttpPageSource {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_page(&self, page: u32) -> Result<Page> {
        let url = articles_url(&self.api_base, page, self.per_page)?;
        let t0 = Instant::now();

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let records: Page = serde_json::from_slice(&body)?;
        debug!(
            page,
            count = records.len(),
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Decoded page"
        );
        Ok(records)
    }
}

/// Wrapper that retries any [`FetchPage`] on the fixed [`RETRY_DELAYS`] schedule.
pub struct RetryFetch<T, S = TokioSleeper> {
    /// The underlying page source.
    inner: T,
    /// Wait before retry `n` is `delays[n - 1]`; its length is the retry budget.
    delays: Vec<Duration>,
    sleeper: S,
}

impl<T: FetchPage> RetryFetch<T> {
    /// Wrap `inner` with the standard schedule and real sleeps.
    pub fn new(inner: T) -> Self {
        Self::with_sleeper(inner, TokioSleeper)
    }
}

impl<T: FetchPage, S: Sleeper> RetryFetch<T, S> {
    pub fn with_sleeper(inner: T, sleeper: S) -> Self {
        Self {
            inner,
            delays: RETRY_DELAYS.to_vec(),
            sleeper,
        }
    }

    pub fn max_retries(&self) -> usize {
        self.delays.len()
    }
}

impl<T, S> fmt::Debug for RetryFetch<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("delays", &self.delays)
            .finish()
    }
}

impl<T, S> FetchPage for RetryFetch<T, S>
where
    T: FetchPage,
    S: Sleeper,
{
    #[instrument(level = "info", skip(self))]
    async fn fetch_page(&self, page: u32) -> Result<Page> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            info!(page, attempt, "Fetching page");
            let attempt_t0 = Instant::now();

            match self.inner.fetch_page(page).await {
                Ok(records) => return Ok(records),
                Err(e) if !e.is_retryable() => {
                    error!(page, attempt, error = %e, "fetch_page failed; not retryable");
                    return Err(e);
                }
                Err(e) => {
                    let elapsed_ms_attempt = attempt_t0.elapsed().as_millis() as u64;
                    let elapsed_ms_total = total_t0.elapsed().as_millis() as u64;

                    let Some(&delay) = self.delays.get(attempt - 1) else {
                        error!(
                            page,
                            attempt,
                            max = self.max_retries(),
                            elapsed_ms_attempt,
                            elapsed_ms_total,
                            error = %e,
                            "fetch_page exhausted retries"
                        );
                        return Err(e);
                    };

                    warn!(
                        page,
                        attempt,
                        max = self.max_retries(),
                        elapsed_ms_attempt,
                        elapsed_ms_total,
                        ?delay,
                        error = %e,
                        "fetch_page attempt failed; backing off"
                    );
                    self.sleeper.sleep(delay).await;
                }
            }
        }
    }
}
