use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::types::{DocumentKind, MediaType, TextMode};
use crate::tools::clean::clean_text;
use crate::tools::types::{Failure, FailureKind};

/// Elements whose content is never rendered.
static HIDDEN_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script, style, noscript, template").expect("valid hidden element selector")
});

const HTML_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];
const UTF8_CHARSETS: [&str; 4] = ["utf-8", "utf8", "us-ascii", "ascii"];
const LATIN1_CHARSETS: [&str; 6] = [
    "iso-8859-1",
    "iso8859-1",
    "latin1",
    "latin-1",
    "windows-1252",
    "cp1252",
];
/// Bytes inspected when sniffing for binary content.
const SNIFF_LEN: usize = 1024;

pub(super) fn parse_media_type(header: &str) -> MediaType {
    let mut parts = header.split(';');
    let essence = parts
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let charset = parts.find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"').trim_matches('\'').trim();
        (!value.is_empty()).then(|| value.to_ascii_lowercase())
    });

    MediaType { essence, charset }
}

/// Decide how to treat a body; missing or blank types are read as HTML.
pub(super) fn document_kind(media: Option<&MediaType>) -> Result<DocumentKind, Failure> {
    let essence = match media {
        Some(m) if !m.essence.is_empty() => m.essence.as_str(),
        _ => return Ok(DocumentKind::Html),
    };

    if HTML_TYPES.contains(&essence) {
        Ok(DocumentKind::Html)
    } else if essence.starts_with("text/") {
        Ok(DocumentKind::PlainText)
    } else {
        Err(Failure::new(
            FailureKind::UnsupportedContentType,
            format!("content type '{essence}' is not HTML or text"),
        ))
    }
}

/// Decode body bytes into a string.
///
/// A declared UTF-8 charset is strict. Latin-1 family charsets map one byte
/// to one char. Any other declared charset is only accepted when the body is
/// valid UTF-8. Without a charset, UTF-8 is tried first and Latin-1 is the
/// fallback. Bodies with NUL bytes are binary and never decoded.
pub(super) fn decode_body(body: &[u8], charset: Option<&str>) -> Result<String, Failure> {
    if body[..body.len().min(SNIFF_LEN)].contains(&0) {
        return Err(Failure::new(
            FailureKind::ParseError,
            "body looks binary (contains NUL bytes)",
        ));
    }

    let body = body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(body);

    match charset {
        Some(cs) if UTF8_CHARSETS.contains(&cs) => std::str::from_utf8(body)
            .map(str::to_string)
            .map_err(|e| {
                Failure::new(
                    FailureKind::ParseError,
                    format!("body is not valid {cs}: {e}"),
                )
            }),
        Some(cs) if LATIN1_CHARSETS.contains(&cs) => Ok(latin1_to_string(body)),
        Some(cs) => std::str::from_utf8(body).map(str::to_string).map_err(|_| {
            Failure::new(
                FailureKind::ParseError,
                format!("unsupported charset '{cs}' and body is not UTF-8"),
            )
        }),
        None => Ok(std::str::from_utf8(body)
            .map(str::to_string)
            .unwrap_or_else(|_| latin1_to_string(body))),
    }
}

fn latin1_to_string(body: &[u8]) -> String {
    body.iter().map(|&b| b as char).collect()
}

/// Visible text of an HTML document.
pub(super) fn visible_text(html: &str, mode: TextMode) -> String {
    let mut document = Html::parse_document(html);

    let hidden: Vec<_> = document.select(&HIDDEN_SELECTOR).map(|el| el.id()).collect();
    for id in hidden {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let nodes = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_text().map(|text| &**text));

    join_text_nodes(nodes, mode)
}

/// Text of a non-HTML `text/*` body.
pub(super) fn plain_text(text: &str, mode: TextMode) -> String {
    join_text_nodes(text.lines(), mode)
}

fn join_text_nodes<'a>(nodes: impl Iterator<Item = &'a str>, mode: TextMode) -> String {
    match mode {
        TextMode::Raw => nodes.collect::<Vec<_>>().join("\n").trim().to_string(),
        TextMode::Compact => nodes
            .map(clean_text)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
