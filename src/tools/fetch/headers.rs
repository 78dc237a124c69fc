use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

use super::types::DEFAULT_USER_AGENT;

const HEADER_PAIRS: [(reqwest::header::HeaderName, &str); 2] = [
    (
        ACCEPT,
        "text/html,application/xhtml+xml,text/plain;q=0.9,*/*;q=0.5",
    ),
    (ACCEPT_LANGUAGE, "en-US,en;q=0.9"),
];

/// Headers sent with every request: content negotiation plus User-Agent.
///
/// An unusable User-Agent string falls back to the crate default.
pub(crate) fn default_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in HEADER_PAIRS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    let ua = HeaderValue::from_str(user_agent.trim())
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(USER_AGENT, ua);

    headers
}
