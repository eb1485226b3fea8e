use crate::UrlError;
use url::Url;

/// Link schemes that can never be fetched and are dropped during extraction
const NON_CRAWLABLE_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Resolves a raw href against the page it was found on and normalizes it
///
/// # Resolution Rules
///
/// 1. Reject empty hrefs and same-page fragments (`#...`)
/// 2. Reject non-crawlable schemes (`javascript:`, `mailto:`, `tel:`, `data:`)
/// 3. Resolve relative references against the base URL (standard URL
///    resolution: `.`/`..` collapsing, scheme-relative and path-relative
///    forms)
/// 4. Canonicalize the result (see [`normalize_url`])
///
/// # Arguments
///
/// * `href` - The raw href string as it appeared in the document
/// * `base` - The URL of the page the href was found on
///
/// # Returns
///
/// * `Ok(Url)` - Normalized absolute URL
/// * `Err(UrlError)` - The href is not crawlable or failed to resolve
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkscout::url::normalize_href;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// let url = normalize_href("../files/report.pdf", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/files/report.pdf");
/// ```
pub fn normalize_href(href: &str, base: &Url) -> Result<Url, UrlError> {
    let href = href.trim();

    if href.is_empty() {
        return Err(UrlError::NotCrawlable("empty href".to_string()));
    }

    // Same-page anchors never lead anywhere new
    if href.starts_with('#') {
        return Err(UrlError::NotCrawlable(href.to_string()));
    }

    let lowered = href.to_ascii_lowercase();
    if NON_CRAWLABLE_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return Err(UrlError::NotCrawlable(href.to_string()));
    }

    let resolved = base
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    canonicalize(resolved)
}

/// Parses and normalizes an absolute URL string
///
/// Used for seed sites and target URLs supplied by the caller. Only HTTP and
/// HTTPS URLs are accepted.
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative
/// 2. Validate the scheme (http/https only)
/// 3. Remove the fragment (everything after `#`)
/// 4. Normalize the path: collapse dot segments and duplicate slashes,
///    remove the trailing slash (except for the root `/`)
/// 5. Preserve the query string as-is
///
/// Normalization is idempotent: feeding the output back in yields the same
/// URL. Two hrefs differing only by fragment or redundant trailing slashes
/// normalize identically.
///
/// # Examples
///
/// ```
/// use linkscout::url::normalize_url;
///
/// let url = normalize_url("https://example.com/a/../files/#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/files");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    canonicalize(url)
}

/// Applies the canonical form shared by both entry points
fn canonicalize(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    url.set_fragment(None);

    // A bare trailing '?' carries no information
    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}

/// Normalizes a URL path by removing dot segments and trailing slashes
fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let mut normalized_segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            // Skip empty segments (from multiple slashes) and current directory markers
            "" | "." => continue,
            // Parent directory - pop the last segment if possible
            ".." => {
                if !normalized_segments.is_empty() {
                    normalized_segments.pop();
                }
            }
            _ => normalized_segments.push(segment),
        }
    }

    if normalized_segments.is_empty() {
        return "/".to_string();
    }

    format!("/{}", normalized_segments.join("/"))
}
