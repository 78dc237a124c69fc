pub mod types;
mod tests;
mod utils;

pub use types::*;
use utils::*;

/// Extract the visible text of a fetched body.
///
/// `content_type` is the raw `Content-Type` header; a missing header is read
/// as HTML. Bodies that are not HTML or `text/*` fail with
/// `UnsupportedContentType` without being parsed.
///
/// HTML is parsed permissively. `script`, `style`, `noscript` and `template`
/// elements are removed before the remaining text nodes are joined with `\n`
/// and the result trimmed. A document with no visible text yields
/// [`Extraction::Empty`], never an error.
///
/// # Examples
/// ```
/// use qrawl_text::tools::extract::{extract, Extraction};
///
/// let html = b"<html><head><style>p{}</style></head><body><p>Hello</p><script>x()</script></body></html>";
/// assert_eq!(extract(html, Some("text/html")), Ok(Extraction::Text("Hello".into())));
///
/// let only_code = b"<script>var a = 1;</script>";
/// assert_eq!(extract(only_code, Some("text/html")), Ok(Extraction::Empty));
/// ```
pub fn extract(body: &[u8], content_type: Option<&str>) -> ExtractResult {
    extract_with_mode(body, content_type, TextMode::Raw)
}

/// [`extract`] with an explicit [`TextMode`].
///
/// # Examples
/// ```
/// use qrawl_text::tools::extract::{extract_with_mode, Extraction, TextMode};
///
/// let html = b"<div>\n  <h1>Title</h1>\n\n  <p>Body   text</p>\n</div>";
/// assert_eq!(
///     extract_with_mode(html, None, TextMode::Compact),
///     Ok(Extraction::Text("Title\nBody text".into()))
/// );
/// ```
pub fn extract_with_mode(body: &[u8], content_type: Option<&str>, mode: TextMode) -> ExtractResult {
    let media = content_type.map(parse_media_type);
    let kind = document_kind(media.as_ref())?;
    let decoded = decode_body(body, media.as_ref().and_then(|m| m.charset.as_deref()))?;

    let text = match kind {
        DocumentKind::Html => visible_text(&decoded, mode),
        DocumentKind::PlainText => plain_text(&decoded, mode),
    };

    if text.is_empty() {
        Ok(Extraction::Empty)
    } else {
        Ok(Extraction::Text(text))
    }
}
