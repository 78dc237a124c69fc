use super::headers::default_headers;
use super::types::FetchOptions;
use reqwest::{redirect, Client};
use std::time::Duration;

const POOL_IDLE_TIMEOUT_SEC: u64 = 90;
const POOL_MAX_IDLE_PER_HOST: usize = 32;

/// Build the reqwest client shared by every unit of a batch.
///
/// Timeouts are applied per request, not here.
pub(crate) fn build_client(options: &FetchOptions) -> Result<Client, reqwest::Error> {
    Client::builder()
        .redirect(redirect::Policy::limited(options.max_redirects))
        .default_headers(default_headers(&options.user_agent))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .build()
}
