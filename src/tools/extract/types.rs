use crate::tools::types::{Failure, Outcome};
use serde::{Deserialize, Serialize};

/// How visible text nodes are turned into the final string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    /// Every text node joined with `\n`, then trimmed once.
    #[default]
    Raw,
    /// Each node cleaned and blank nodes dropped before joining.
    Compact,
}

impl std::str::FromStr for TextMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown text mode '{other}' (expected raw or compact)")),
        }
    }
}

/// Successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Non-empty visible text.
    Text(String),
    /// The document parsed but nothing visible remained.
    Empty,
}

impl From<Extraction> for Outcome {
    fn from(extraction: Extraction) -> Self {
        match extraction {
            Extraction::Text(text) => Outcome::Extracted(text),
            Extraction::Empty => Outcome::EmptyContent,
        }
    }
}

pub type ExtractResult = Result<Extraction, Failure>;

/// Parsed `Content-Type` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MediaType {
    /// Lowercased `type/subtype`.
    pub essence: String,
    /// Lowercased charset parameter, quotes removed.
    pub charset: Option<String>,
}

/// What the extractor will do with a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocumentKind {
    Html,
    PlainText,
}
