//! HTML parsing for href extraction
//!
//! The scanner only needs the raw href strings out of a document; resolving
//! and filtering them is the normalizer's job. Parsing is fully synchronous
//! so the DOM never crosses an await point.

use scraper::{Html, Selector};

/// Extracts all raw href strings from anchor tags in document order
///
/// Non-HTML input simply yields no anchors. Hrefs are returned as written
/// in the document; see [`crate::url::normalize_href`] for resolution.
///
/// # Example
///
/// ```
/// use linkscout::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["/page".to_string()]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut hrefs = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    hrefs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_href() {
        let html = r#"<html><body><a href="https://example.com/page">Link</a></body></html>"#;
        assert_eq!(extract_hrefs(html), vec!["https://example.com/page"]);
    }

    #[test]
    fn test_extract_preserves_document_order() {
        let html = r#"
            <html><body>
                <a href="/first">1</a>
                <a href="/second">2</a>
                <a href="/third">3</a>
            </body></html>
        "#;
        assert_eq!(extract_hrefs(html), vec!["/first", "/second", "/third"]);
    }

    #[test]
    fn test_anchors_without_href_skipped() {
        let html = r#"<html><body><a name="top">Anchor</a><a href="/page">Link</a></body></html>"#;
        assert_eq!(extract_hrefs(html), vec!["/page"]);
    }

    #[test]
    fn test_raw_hrefs_not_filtered() {
        // Filtering is the normalizer's concern, not the extractor's
        let html = r##"<html><body><a href="javascript:void(0)">JS</a><a href="#top">Frag</a></body></html>"##;
        assert_eq!(extract_hrefs(html), vec!["javascript:void(0)", "#top"]);
    }

    #[test]
    fn test_non_html_yields_nothing() {
        assert!(extract_hrefs("%PDF-1.4 binary soup").is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_hrefs("").is_empty());
    }
}
