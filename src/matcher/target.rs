use crate::url::normalize_url;
use crate::UrlError;
use url::Url;

/// The resource being hunted, with its derived forms
///
/// Computed once at scan start and immutable for the rest of the run. The
/// derived filename is the final path segment (the query string never
/// contributes); the stem is the filename without its extension.
#[derive(Debug, Clone)]
pub struct TargetSpec {
    url: Url,
    url_lower: String,
    filename: String,
    stem: String,
    variations: Vec<String>,
}

impl TargetSpec {
    /// Parses a raw target URL and derives its match forms
    ///
    /// # Examples
    ///
    /// ```
    /// use linkscout::matcher::TargetSpec;
    ///
    /// let target = TargetSpec::parse("https://example.com/files/report.pdf?v=2").unwrap();
    /// assert_eq!(target.filename(), "report.pdf");
    /// assert_eq!(target.stem(), "report");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        let url = normalize_url(raw)?;

        let filename = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .unwrap_or("")
            .to_string();

        let stem = match filename.rsplit_once('.') {
            Some((stem, _ext)) => stem.to_string(),
            None => filename.clone(),
        };

        let variations = build_variations(&url);

        Ok(Self {
            url_lower: url.as_str().to_lowercase(),
            url,
            filename,
            stem,
            variations,
        })
    }

    /// The normalized target URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Lowercased target URL string, precomputed for body probes
    pub fn url_lower(&self) -> &str {
        &self.url_lower
    }

    /// Final path segment; empty when the target is a bare host or root path
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Filename without its extension
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Site-relative form of the target (path plus query), used by the
    /// exact-link probe; `None` for a bare root path, which would match
    /// everywhere
    pub fn relative_form(&self) -> Option<String> {
        if self.url.path() == "/" {
            return None;
        }
        match self.url.query() {
            Some(query) => Some(format!("{}?{}", self.url.path(), query)),
            None => Some(self.url.path().to_string()),
        }
    }

    /// Scheme-stripped and `www.`-stripped renderings of the target URL
    pub fn variations(&self) -> &[String] {
        &self.variations
    }
}

/// Builds the URL variation needles: the target without its scheme, and
/// without a `www.` host prefix when one is present
fn build_variations(url: &Url) -> Vec<String> {
    let full = url.as_str();
    let mut variations = Vec::new();

    if let Some(schemeless) = strip_scheme(full) {
        variations.push(schemeless.to_string());
    }

    if let Some(host) = url.host_str() {
        if let Some(bare_host) = host.strip_prefix("www.") {
            let without_www = full.replacen(host, bare_host, 1);
            if let Some(schemeless) = strip_scheme(&without_www) {
                variations.push(schemeless.to_string());
            }
            variations.push(without_www);
        }
    }

    variations
}

fn strip_scheme(url: &str) -> Option<&str> {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
}
