#[cfg(test)]
mod tests {
    use crate::tools::extract::types::{DocumentKind, MediaType};
    use crate::tools::extract::utils::{decode_body, document_kind, parse_media_type};
    use crate::tools::extract::*;
    use crate::tools::types::FailureKind;

    fn text_of(result: ExtractResult) -> String {
        match result {
            Ok(Extraction::Text(text)) => text,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_media_type_with_charset() {
        assert_eq!(
            parse_media_type("Text/HTML; Charset=\"UTF-8\""),
            MediaType {
                essence: "text/html".into(),
                charset: Some("utf-8".into())
            }
        );
        assert_eq!(parse_media_type("text/plain").charset, None);
        assert_eq!(
            parse_media_type("text/html; boundary=x; charset=ISO-8859-1").charset,
            Some("iso-8859-1".into())
        );
    }

    #[test]
    fn test_document_kind() {
        let html = parse_media_type("application/xhtml+xml");
        let csv = parse_media_type("text/csv");
        let pdf = parse_media_type("application/pdf");
        let blank = parse_media_type("  ");

        assert_eq!(document_kind(None), Ok(DocumentKind::Html));
        assert_eq!(document_kind(Some(&blank)), Ok(DocumentKind::Html));
        assert_eq!(document_kind(Some(&html)), Ok(DocumentKind::Html));
        assert_eq!(document_kind(Some(&csv)), Ok(DocumentKind::PlainText));
        assert_eq!(
            document_kind(Some(&pdf)).unwrap_err().kind,
            FailureKind::UnsupportedContentType
        );
    }

    #[test]
    fn test_decode_body_charsets() {
        assert_eq!(decode_body("h\u{e9}llo".as_bytes(), Some("utf-8")).unwrap(), "h\u{e9}llo");
        assert_eq!(decode_body(b"h\xe9llo", Some("iso-8859-1")).unwrap(), "h\u{e9}llo");
        // Undeclared and not UTF-8: Latin-1 fallback
        assert_eq!(decode_body(b"h\xe9llo", None).unwrap(), "h\u{e9}llo");
        // BOM is dropped
        assert_eq!(decode_body(b"\xEF\xBB\xBFhi", Some("utf-8")).unwrap(), "hi");
    }

    #[test]
    fn test_decode_body_failures_are_parse_errors() {
        assert_eq!(
            decode_body(b"h\xe9llo", Some("shift_jis")).unwrap_err().kind,
            FailureKind::ParseError
        );
        assert_eq!(decode_body(b"plain ascii", Some("shift_jis")).unwrap(), "plain ascii");

        let err = decode_body(b"h\xe9llo", Some("utf-8")).unwrap_err();
        assert_eq!(err.kind, FailureKind::ParseError);

        let err = decode_body(b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR", None).unwrap_err();
        assert_eq!(err.kind, FailureKind::ParseError);
    }

    #[test]
    fn test_removes_script_style_and_friends() {
        let html = br#"
            <html>
              <head>
                <title>Page</title>
                <style>body { color: red; }</style>
                <script>window.track = function() {};</script>
              </head>
              <body>
                <p>Visible paragraph</p>
                <noscript>Enable JavaScript</noscript>
                <template><p>Template only</p></template>
                <script type="application/ld+json">{"@type": "Thing"}</script>
              </body>
            </html>
        "#;

        let text = text_of(extract(html, Some("text/html")));
        assert!(text.contains("Page"));
        assert!(text.contains("Visible paragraph"));
        assert!(!text.contains("color"));
        assert!(!text.contains("track"));
        assert!(!text.contains("Enable JavaScript"));
        assert!(!text.contains("Template only"));
        assert!(!text.contains("@type"));
    }

    #[test]
    fn test_raw_mode_joins_nodes_with_newlines() {
        let html = b"<p>One</p><p>Two <b>bold</b> three</p>";
        assert_eq!(text_of(extract(html, Some("text/html"))), "One\nTwo \nbold\n three");
    }

    #[test]
    fn test_raw_mode_trims_only_the_ends() {
        let html = b"<body>\n  <p>  First</p>\n  <p>Second  </p>\n</body>";
        let text = text_of(extract(html, Some("text/html")));
        assert!(text.starts_with("First"));
        assert!(text.ends_with("Second"));
        assert!(text.contains("\n"));
    }

    #[test]
    fn test_compact_mode_cleans_each_node() {
        let html = b"<ul>\n <li>  Alpha\n  beta </li>\n <li></li>\n <li>Gamma\xe2\x80\x8b</li>\n</ul>";
        assert_eq!(
            text_of(extract_with_mode(html, Some("text/html"), TextMode::Compact)),
            "Alpha beta\nGamma"
        );
    }

    #[test]
    fn test_entities_are_decoded_by_the_parser() {
        let html = b"<p>Tom &amp; Jerry&#39;s</p>";
        assert_eq!(text_of(extract(html, Some("text/html"))), "Tom & Jerry's");
    }

    #[test]
    fn test_script_only_document_is_empty_content() {
        let html = b"<html><head><script>alert(1)</script><style>p{}</style></head><body>  \n </body></html>";
        assert_eq!(extract(html, Some("text/html")), Ok(Extraction::Empty));
    }

    #[test]
    fn test_empty_body_is_empty_content() {
        assert_eq!(extract(b"", Some("text/html")), Ok(Extraction::Empty));
    }

    #[test]
    fn test_malformed_html_still_extracts() {
        let html = b"<div><p>Unclosed <b>tags <i>everywhere</div></span><p>after";
        let text = text_of(extract(html, None));
        assert!(text.contains("Unclosed"));
        assert!(text.contains("everywhere"));
        assert!(text.contains("after"));
    }

    #[test]
    fn test_plain_text_is_returned_trimmed() {
        let body = b"\n  line one\nline <two>\n\n";
        assert_eq!(text_of(extract(body, Some("text/plain"))), "line one\nline <two>");
    }

    #[test]
    fn test_unsupported_content_type_is_not_parsed() {
        let err = extract(b"{\"a\": 1}", Some("application/json")).unwrap_err();
        assert_eq!(err.kind, FailureKind::UnsupportedContentType);
    }

    #[test]
    fn test_undecodable_body_is_parse_error() {
        let err = extract(b"<p>\xff\xfe</p>", Some("text/html; charset=utf-8")).unwrap_err();
        assert_eq!(err.kind, FailureKind::ParseError);
    }

    #[test]
    fn test_text_mode_from_str() {
        assert_eq!("Compact".parse::<TextMode>(), Ok(TextMode::Compact));
        assert_eq!(" raw ".parse::<TextMode>(), Ok(TextMode::Raw));
        assert!("fancy".parse::<TextMode>().is_err());
    }
}
