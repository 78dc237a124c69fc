use crate::tools::clean::split_addresses;
use crate::tools::extract::TextMode;
use crate::tools::fetch::{
    FetchOptions, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_REDIRECTS, DEFAULT_USER_AGENT,
};
use crate::tools::types::Outcome;
use crate::{QrawlError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MAX_CONCURRENCY: usize = 8;
const DEFAULT_PER_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_OVERALL_DEADLINE_MS: u64 = 30_000;
const MAX_CONCURRENCY_LIMIT: usize = 256;
const MAX_RETRIES: u32 = 5;

/// Batch configuration, passed explicitly to the coordinator.
///
/// Serialized with millisecond durations:
/// ```
/// use qrawl_text::BatchOptions;
///
/// let opts: BatchOptions = serde_json::from_str(r#"{"maxConcurrency": 4, "perRequestTimeoutMs": 2500}"#).unwrap();
/// assert_eq!(opts.max_concurrency, 4);
/// assert_eq!(opts.per_request_timeout.as_millis(), 2500);
/// assert_eq!(opts.overall_deadline.as_secs(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchOptions {
    /// Upper bound on simultaneously running fetch units.
    pub max_concurrency: usize,
    #[serde(rename = "perRequestTimeoutMs", with = "duration_ms")]
    pub per_request_timeout: Duration,
    /// Wall-clock budget for the whole batch.
    #[serde(rename = "overallDeadlineMs", with = "duration_ms")]
    pub overall_deadline: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
    /// Bodies larger than this fail instead of being buffered.
    pub max_body_bytes: usize,
    pub text_mode: TextMode,
    /// Extra fetch attempts after a network error or per-request timeout.
    pub retries: u32,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            per_request_timeout: Duration::from_millis(DEFAULT_PER_REQUEST_TIMEOUT_MS),
            overall_deadline: Duration::from_millis(DEFAULT_OVERALL_DEADLINE_MS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            text_mode: TextMode::Raw,
            retries: 0,
        }
    }
}

impl BatchOptions {
    /// Load configuration from `QRAWL_TEXT_*` environment variables.
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BatchOptions::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
            lookup(key).and_then(|v| v.trim().parse().ok())
        }
        let defaults = Self::default();

        Self {
            max_concurrency: parsed(&lookup, "QRAWL_TEXT_CONCURRENCY").unwrap_or(defaults.max_concurrency),
            per_request_timeout: parsed(&lookup, "QRAWL_TEXT_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.per_request_timeout),
            overall_deadline: parsed(&lookup, "QRAWL_TEXT_DEADLINE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.overall_deadline),
            max_redirects: parsed(&lookup, "QRAWL_TEXT_MAX_REDIRECTS").unwrap_or(defaults.max_redirects),
            user_agent: lookup("QRAWL_TEXT_USER_AGENT")
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            max_body_bytes: parsed(&lookup, "QRAWL_TEXT_MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            text_mode: parsed(&lookup, "QRAWL_TEXT_TEXT_MODE").unwrap_or(defaults.text_mode),
            retries: parsed(&lookup, "QRAWL_TEXT_RETRIES").unwrap_or(defaults.retries),
        }
    }

    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_timeout(mut self, per_request_timeout: Duration) -> Self {
        self.per_request_timeout = per_request_timeout;
        self
    }

    pub fn with_deadline(mut self, overall_deadline: Duration) -> Self {
        self.overall_deadline = overall_deadline;
        self
    }

    pub fn with_text_mode(mut self, text_mode: TextMode) -> Self {
        self.text_mode = text_mode;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(QrawlError::config("max_concurrency must be at least 1"));
        }
        if self.max_concurrency > MAX_CONCURRENCY_LIMIT {
            return Err(QrawlError::config(format!(
                "max_concurrency must be at most {MAX_CONCURRENCY_LIMIT}"
            )));
        }
        if self.per_request_timeout.is_zero() {
            return Err(QrawlError::config("per_request_timeout must be positive"));
        }
        if self.overall_deadline.is_zero() {
            return Err(QrawlError::config("overall_deadline must be positive"));
        }
        if self.max_body_bytes == 0 {
            return Err(QrawlError::config("max_body_bytes must be positive"));
        }
        if self.retries > MAX_RETRIES {
            return Err(QrawlError::config(format!(
                "retries must be at most {MAX_RETRIES}"
            )));
        }
        Ok(())
    }

    /// Transport settings derived from these options.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            max_redirects: self.max_redirects,
            user_agent: self.user_agent.clone(),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Inbound batch request.
///
/// `urls` is either a JSON array, taken element by element, or one
/// comma-separated string.
/// ```
/// use qrawl_text::BatchRequest;
///
/// let req = BatchRequest::from_json(r#"{"urls": "https://a.example, https://b.example"}"#).unwrap();
/// assert_eq!(req.addresses(), vec!["https://a.example", " https://b.example"]);
///
/// let req = BatchRequest::from_json(r#"{"urls": ["https://a.example/?ids=1,2"]}"#).unwrap();
/// assert_eq!(req.addresses(), vec!["https://a.example/?ids=1,2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub urls: UrlList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlList {
    Many(Vec<String>),
    Joined(String),
}

impl Default for UrlList {
    fn default() -> Self {
        Self::Joined(String::new())
    }
}

impl BatchRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| QrawlError::InvalidRequest(e.to_string()))
    }

    /// Address strings with blank entries dropped; trimming and
    /// de-duplication happen in the coordinator.
    pub fn addresses(&self) -> Vec<String> {
        let raw = match &self.urls {
            UrlList::Many(urls) => urls.clone(),
            UrlList::Joined(joined) => split_addresses(joined),
        };
        raw.into_iter().filter(|a| !a.trim().is_empty()).collect()
    }
}

/// Counts per outcome label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub extracted: usize,
    pub empty: usize,
    pub failed: usize,
    pub by_kind: BTreeMap<&'static str, usize>,
}

/// Result of one batch: one entry per distinct non-empty input, in
/// first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    entries: Vec<(String, Outcome)>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    pub(crate) fn new(
        entries: Vec<(String, Outcome)>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entries,
            started_at,
            finished_at,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, address: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(key, _)| key == address)
            .map(|(_, outcome)| outcome)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.entries.iter().map(|(key, outcome)| (key.as_str(), outcome))
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.entries.len(),
            ..BatchSummary::default()
        };
        for (_, outcome) in &self.entries {
            match outcome {
                Outcome::Extracted(_) => summary.extracted += 1,
                Outcome::EmptyContent => summary.empty += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
            *summary.by_kind.entry(outcome.label()).or_default() += 1;
        }
        summary
    }

    /// Flat `{address: text}` view where every non-text outcome is
    /// [`NO_DATA`](crate::tools::types::NO_DATA).
    pub fn legacy(&self) -> LegacyReport<'_> {
        LegacyReport(self)
    }
}

struct Entries<'a>(&'a [(String, Outcome)]);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, outcome)| (key, outcome)))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportRepr<'a> {
    started_at: &'a DateTime<Utc>,
    finished_at: &'a DateTime<Utc>,
    summary: BatchSummary,
    results: Entries<'a>,
}

impl Serialize for BatchReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ReportRepr {
            started_at: &self.started_at,
            finished_at: &self.finished_at,
            summary: self.summary(),
            results: Entries(&self.entries),
        }
        .serialize(serializer)
    }
}

/// See [`BatchReport::legacy`].
pub struct LegacyReport<'a>(&'a BatchReport);

impl Serialize for LegacyReport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .entries
                .iter()
                .map(|(key, outcome)| (key, outcome.legacy_text())),
        )
    }
}
