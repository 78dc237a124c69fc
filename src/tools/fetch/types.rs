use crate::tools::types::Failure;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Redirects followed before giving up with `TooManyRedirects`.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Largest body buffered for extraction.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; qrawl-text/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Transport settings shared by every request of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchOptions {
    pub max_redirects: usize,
    pub user_agent: String,
    pub max_body_bytes: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// What a transport hands back for one GET, before status interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// URL after redirects.
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// The network seam.
///
/// Implementations perform exactly one GET (following redirects up to their
/// own cap) and classify failures into `NetworkError`, `Timeout` or
/// `TooManyRedirects`. Status codes are left to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn get(&self, url: &Url, timeout: Duration) -> Result<RawResponse, Failure>;
}

/// A successful (2xx) fetch.
///
/// # Examples
/// ```no_run
/// use qrawl_text::tools::fetch::{fetch, FetchOptions, ReqwestTransport};
/// use std::time::Duration;
///
/// # async fn example() -> qrawl_text::Result<()> {
/// let transport = ReqwestTransport::new(&FetchOptions::default())?;
/// if let Ok(page) = fetch(&transport, "https://example.com", Duration::from_secs(5)).await {
///     println!("{} bytes of {:?} in {}ms", page.body.len(), page.content_type, page.duration_ms);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub duration_ms: u64,
}

pub type FetchResult = Result<FetchedPage, Failure>;
