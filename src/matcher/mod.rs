//! Layered target matching
//!
//! Decides, for one fetched page, whether the target resource is referenced
//! and by which method. Strategies are applied in increasing cost order and
//! short-circuit on the first success: the body probes are free substring
//! checks, the final redirect strategy issues bounded, body-less network
//! requests and only runs when everything else missed.

mod strategies;
mod target;

pub use target::TargetSpec;

use crate::config::MatcherConfig;
use crate::crawler::resolve_final_url;
use crate::state::MatchMethod;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A successful match on one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMatch {
    pub method: MatchMethod,
    pub evidence: String,
}

/// Runs the pure body strategies against one fetched page
///
/// Returns the first hit in strategy order, or `None` when the body carries
/// no trace of the target.
pub fn match_body(body: &str, target: &TargetSpec, config: &MatcherConfig) -> Option<PageMatch> {
    let body_lower = body.to_lowercase();

    for (method, probe) in strategies::BODY_STRATEGIES {
        if let Some(evidence) = probe(&body_lower, target, config) {
            return Some(PageMatch {
                method: *method,
                evidence,
            });
        }
    }

    None
}

/// Filters outbound links down to redirect-verification candidates
///
/// A link qualifies when its path or query carries a configured download
/// hint, or already contains the target filename or stem. The result is
/// capped at `max_redirect_candidates` so a single link-heavy page cannot
/// stall the scan on network checks.
pub fn redirect_candidates<'a>(
    links: &'a [Url],
    target: &TargetSpec,
    config: &MatcherConfig,
) -> Vec<&'a Url> {
    links
        .iter()
        .filter(|link| is_redirect_candidate(link, target, config))
        .take(config.max_redirect_candidates)
        .collect()
}

fn is_redirect_candidate(link: &Url, target: &TargetSpec, config: &MatcherConfig) -> bool {
    let probe = match link.query() {
        Some(query) => format!("{}?{}", link.path(), query).to_lowercase(),
        None => link.path().to_lowercase(),
    };

    if config
        .download_hint_patterns
        .iter()
        .any(|hint| probe.contains(&hint.to_lowercase()))
    {
        return true;
    }

    let name = target.filename().to_lowercase();
    if !name.is_empty() && probe.contains(&name) {
        return true;
    }

    let stem = target.stem().to_lowercase();
    stem.len() > config.min_stem_length && probe.contains(&stem)
}

/// Verifies candidates by following their redirects
///
/// Issues a body-less request per candidate and inspects the final resolved
/// URL for the target URL or filename. The first candidate that resolves to
/// the target wins; a failed request skips that candidate and tries the
/// next.
pub async fn match_redirects(
    client: &Client,
    candidates: &[&Url],
    target: &TargetSpec,
    timeout: Duration,
) -> Option<PageMatch> {
    for candidate in candidates {
        let resolved = match resolve_final_url(client, candidate, timeout).await {
            Some(resolved) => resolved,
            None => {
                tracing::debug!("Redirect check failed for {}, skipping", candidate);
                continue;
            }
        };

        if resolved_matches(&resolved, target) {
            return Some(PageMatch {
                method: MatchMethod::Redirect,
                evidence: resolved.to_string(),
            });
        }
    }

    None
}

fn resolved_matches(resolved: &Url, target: &TargetSpec) -> bool {
    let resolved_lower = resolved.as_str().to_lowercase();

    if resolved_lower.contains(target.url_lower()) {
        return true;
    }

    let name = target.filename().to_lowercase();
    !name.is_empty() && resolved_lower.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> TargetSpec {
        TargetSpec::parse("https://example.com/files/report.pdf").unwrap()
    }

    fn config() -> MatcherConfig {
        MatcherConfig::default()
    }

    fn links(raw: &[&str]) -> Vec<Url> {
        raw.iter().map(|s| Url::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_match_body_precedence() {
        // Both the full URL and the bare filename appear; the exact-link
        // strategy runs first and must win
        let body = "https://example.com/files/report.pdf and also report.pdf";
        let hit = match_body(body, &target(), &config()).unwrap();
        assert_eq!(hit.method, MatchMethod::ExactLink);
    }

    #[test]
    fn test_match_body_filename_fallback() {
        let body = "grab report.pdf from the archive";
        let hit = match_body(body, &target(), &config()).unwrap();
        assert_eq!(hit.method, MatchMethod::Filename);
        assert_eq!(hit.evidence, "report.pdf");
    }

    #[test]
    fn test_match_body_upload_path_catches_short_stems() {
        // Stem "img" is below the partial-filename threshold and the exact
        // filename never appears; only the anchored upload-path probe hits
        let short = TargetSpec::parse("https://example.com/pics/img.png").unwrap();
        let body = "<img src=\"/uploads/img.jpeg\">";
        let hit = match_body(body, &short, &config()).unwrap();
        assert_eq!(hit.method, MatchMethod::KnownUploadPath);
        assert_eq!(hit.evidence, "/uploads/img");
    }

    #[test]
    fn test_match_body_no_match() {
        let body = "nothing relevant here";
        assert!(match_body(body, &target(), &config()).is_none());
    }

    #[test]
    fn test_candidates_by_download_hint() {
        let links = links(&[
            "https://example.com/about",
            "https://example.com/download?id=42",
        ]);
        let candidates = redirect_candidates(&links, &target(), &config());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].path(), "/download");
    }

    #[test]
    fn test_candidates_by_filename() {
        let links = links(&["https://cdn.example.net/x/report.pdf"]);
        let candidates = redirect_candidates(&links, &target(), &config());
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_candidates_capped() {
        let raw: Vec<String> = (0..20)
            .map(|i| format!("https://example.com/download/{}", i))
            .collect();
        let links: Vec<Url> = raw.iter().map(|s| Url::parse(s).unwrap()).collect();

        let candidates = redirect_candidates(&links, &target(), &config());
        assert_eq!(candidates.len(), config().max_redirect_candidates);
    }

    #[test]
    fn test_candidates_ignore_plain_pages() {
        let links = links(&[
            "https://example.com/",
            "https://example.com/contact",
            "https://example.com/blog/post-1",
        ]);
        assert!(redirect_candidates(&links, &target(), &config()).is_empty());
    }

    #[test]
    fn test_resolved_matches_on_filename() {
        let resolved = Url::parse("https://cdn.example.net/assets/report.pdf").unwrap();
        assert!(resolved_matches(&resolved, &target()));
    }

    #[test]
    fn test_resolved_matches_on_full_url() {
        let resolved = Url::parse("https://example.com/files/report.pdf").unwrap();
        assert!(resolved_matches(&resolved, &target()));
    }

    #[test]
    fn test_resolved_miss() {
        let resolved = Url::parse("https://example.com/somewhere-else").unwrap();
        assert!(!resolved_matches(&resolved, &target()));
    }
}
