//! Common types shared across tools

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Text returned for every non-text outcome in legacy flat reports.
pub const NO_DATA: &str = "No data for this website.";

/// Why a single address produced no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Not an absolute http(s) URL. Never reaches the network.
    InvalidAddress,
    /// Connect, DNS, TLS or body read failure.
    NetworkError,
    /// Per-request timeout or overall batch deadline.
    Timeout,
    /// Redirect chain longer than the configured cap.
    TooManyRedirects,
    /// Final response was not 2xx.
    HttpError(u16),
    /// Body is neither HTML nor text.
    UnsupportedContentType,
    /// Body could not be decoded as a document.
    ParseError,
}

impl FailureKind {
    /// Stable snake_case name used in JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidAddress => "invalid_address",
            Self::NetworkError => "network_error",
            Self::Timeout => "timeout",
            Self::TooManyRedirects => "too_many_redirects",
            Self::HttpError(_) => "http_error",
            Self::UnsupportedContentType => "unsupported_content_type",
            Self::ParseError => "parse_error",
        }
    }

    /// HTTP status code for [`FailureKind::HttpError`].
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::HttpError(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress => write!(f, "invalid address"),
            Self::NetworkError => write!(f, "network error"),
            Self::Timeout => write!(f, "timeout"),
            Self::TooManyRedirects => write!(f, "too many redirects"),
            Self::HttpError(code) => write!(f, "http error {code}"),
            Self::UnsupportedContentType => write!(f, "unsupported content type"),
            Self::ParseError => write!(f, "parse error"),
        }
    }
}

/// A typed failure plus the detail reported by the component that saw it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidAddress, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, message)
    }
}

/// Terminal result of one fetch unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Non-empty visible text.
    Extracted(String),
    /// Parsed fine, nothing visible left.
    EmptyContent,
    Failed(Failure),
}

impl Outcome {
    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Extracted(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Extracted(text) => Some(text),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure().map(|f| f.kind)
    }

    /// Short label for logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Extracted(_) => "extracted",
            Self::EmptyContent => "empty",
            Self::Failed(failure) => failure.kind.name(),
        }
    }

    /// Collapse to the single-string form older callers expect.
    pub fn legacy_text(&self) -> &str {
        match self {
            Self::Extracted(text) => text,
            _ => NO_DATA,
        }
    }
}

impl From<Failure> for Outcome {
    fn from(failure: Failure) -> Self {
        Self::Failed(failure)
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum OutcomeRepr<'a> {
    Extracted {
        text: &'a str,
    },
    Empty,
    Failed {
        kind: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<u16>,
        message: &'a str,
    },
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            Self::Extracted(text) => OutcomeRepr::Extracted { text },
            Self::EmptyContent => OutcomeRepr::Empty,
            Self::Failed(failure) => OutcomeRepr::Failed {
                kind: failure.kind.name(),
                code: failure.kind.code(),
                message: &failure.message,
            },
        };
        repr.serialize(serializer)
    }
}
