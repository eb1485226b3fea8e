//! Body match strategies
//!
//! Each strategy is a pure probe over the lowercased page body. The table
//! at the bottom fixes the order of application: cheapest and most precise
//! first. Evidence strings keep the target's original casing.

use crate::config::MatcherConfig;
use crate::matcher::target::TargetSpec;
use crate::state::MatchMethod;

/// A pure probe: lowercased body in, matched evidence out
pub(super) type BodyProbe = fn(&str, &TargetSpec, &MatcherConfig) -> Option<String>;

/// Strategies in increasing cost order; the first hit wins
pub(super) const BODY_STRATEGIES: &[(MatchMethod, BodyProbe)] = &[
    (MatchMethod::ExactLink, exact_link),
    (MatchMethod::Filename, filename),
    (MatchMethod::PartialFilename, partial_filename),
    (MatchMethod::ExactLink, url_variation),
    (MatchMethod::KnownUploadPath, upload_path),
];

/// The literal target URL, or its site-relative form, appears in the body
fn exact_link(body: &str, target: &TargetSpec, _config: &MatcherConfig) -> Option<String> {
    if body.contains(target.url_lower()) {
        return Some(target.url().to_string());
    }

    if let Some(relative) = target.relative_form() {
        if body.contains(&relative.to_lowercase()) {
            return Some(relative);
        }
    }

    None
}

/// The derived filename appears anywhere in the body
fn filename(body: &str, target: &TargetSpec, _config: &MatcherConfig) -> Option<String> {
    let name = target.filename();
    if name.is_empty() {
        return None;
    }
    body.contains(&name.to_lowercase()).then(|| name.to_string())
}

/// The stem appears in the body; only attempted for stems long enough to
/// avoid false positives on short names
fn partial_filename(body: &str, target: &TargetSpec, config: &MatcherConfig) -> Option<String> {
    let stem = target.stem();
    if stem.len() <= config.min_stem_length {
        return None;
    }
    body.contains(&stem.to_lowercase()).then(|| stem.to_string())
}

/// A scheme-stripped or `www.`-stripped rendering of the target URL appears
/// in the body; reported as an exact-link match
fn url_variation(body: &str, target: &TargetSpec, _config: &MatcherConfig) -> Option<String> {
    target
        .variations()
        .iter()
        .find(|variation| body.contains(&variation.to_lowercase()))
        .cloned()
}

/// The filename (or its stem) appears behind one of the configured
/// asset-path prefixes
///
/// The prefix anchors the name, so even stems too short for the bare
/// partial-filename probe are precise here: CMS asset layouts keep the
/// basename while re-encoding the extension or appending size suffixes.
fn upload_path(body: &str, target: &TargetSpec, config: &MatcherConfig) -> Option<String> {
    let name = target.filename();
    if name.is_empty() {
        return None;
    }

    let mut names = vec![name.to_string()];
    let stem = target.stem();
    if !stem.is_empty() && stem != name {
        names.push(stem.to_string());
    }

    for prefix in &config.upload_path_patterns {
        for candidate in &names {
            let needle = format!("{}{}", prefix.to_lowercase(), candidate.to_lowercase());
            if body.contains(&needle) {
                return Some(format!("{}{}", prefix, candidate));
            }
        }
    }

    None
}
