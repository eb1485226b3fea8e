//! URL handling module for Linkscout
//!
//! This module provides href resolution, URL normalization, and domain
//! scoping. Normalized URLs are the identity keys used for frontier
//! deduplication throughout the crawler.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, same_domain};
pub use normalize::{normalize_href, normalize_url};
