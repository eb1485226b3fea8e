use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL, converts it to
/// lowercase, and appends the port when one is explicitly present — two
/// servers on the same host but different ports are different authorities.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs),
/// it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkscout::url::extract_domain;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Checks whether a URL belongs to the crawl domain
///
/// The comparison is by exact host equality; subdomains are considered
/// distinct domains and are not crawled.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkscout::url::same_domain;
///
/// let url = Url::parse("https://example.com/page").unwrap();
/// assert!(same_domain(&url, "example.com"));
/// assert!(!same_domain(&url, "other.com"));
/// ```
pub fn same_domain(url: &Url, domain: &str) -> bool {
    match extract_domain(url) {
        Some(host) => host == domain,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("127.0.0.1:8080".to_string()));
    }

    #[test]
    fn test_default_port_not_included() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_same_host_different_port_is_different_domain() {
        let url = Url::parse("http://127.0.0.1:9000/page").unwrap();
        assert!(!same_domain(&url, "127.0.0.1:8080"));
        assert!(same_domain(&url, "127.0.0.1:9000"));
    }

    #[test]
    fn test_extract_uppercase_converted_to_lowercase() {
        let url = Url::parse("https://EXAMPLE.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_same_domain_match() {
        let url = Url::parse("https://example.com/deep/path?q=1").unwrap();
        assert!(same_domain(&url, "example.com"));
    }

    #[test]
    fn test_same_domain_rejects_other_host() {
        let url = Url::parse("https://cdn.example.com/asset").unwrap();
        assert!(!same_domain(&url, "example.com"));
    }

    #[test]
    fn test_same_domain_case_insensitive() {
        let url = Url::parse("https://Example.COM/page").unwrap();
        assert!(same_domain(&url, "example.com"));
    }
}
