//! Clean Tools

mod utils;

use utils::*;

/// Clean one run of visible text.
///
/// Performs the following operations in order:
/// 1. Normalize Unicode to NFC (canonical composition)
/// 2. Remove zero-width and control characters
/// 3. Collapse whitespace runs to a single space and trim
///
/// Entities are not decoded here; the HTML parser already did that.
///
/// # Examples
/// ```
/// use qrawl_text::tools::clean::clean_text;
///
/// assert_eq!(clean_text("  Hello\u{200B}   world \n"), "Hello world");
/// ```
pub fn clean_text(text: &str) -> String {
    let text = normalize_unicode(text);
    let text = strip_invisible_chars(&text);
    normalize_whitespace(&text)
}

/// Split a raw address list on commas and line breaks.
///
/// Elements are returned untrimmed; pass them through [`clean_addresses`].
///
/// # Examples
/// ```
/// use qrawl_text::tools::clean::split_addresses;
///
/// let parts = split_addresses("https://a.example, https://b.example");
/// assert_eq!(parts, vec!["https://a.example", " https://b.example"]);
/// ```
pub fn split_addresses(raw: &str) -> Vec<String> {
    raw.split(is_address_separator)
        .map(str::to_string)
        .collect()
}

/// Trim every address, drop empty ones, and deduplicate keeping first-seen order.
///
/// # Examples
/// ```
/// use qrawl_text::tools::clean::clean_addresses;
///
/// let cleaned = clean_addresses(&["https://a.example", "  https://a.example ", "", "https://b.example"]);
/// assert_eq!(cleaned, vec!["https://a.example", "https://b.example"]);
/// ```
pub fn clean_addresses<S: AsRef<str>>(addresses: &[S]) -> Vec<String> {
    crate::dedupe!(addresses.iter(), |address: &S| address
        .as_ref()
        .trim()
        .to_string())
}
