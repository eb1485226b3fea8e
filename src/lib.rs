//! Linkscout: a targeted link hunter
//!
//! This crate implements a web crawler that traverses a single site looking
//! for pages that reference a specific target resource, matching it directly,
//! by filename, by partial name, or through redirecting links.

pub mod api;
pub mod config;
pub mod crawler;
pub mod matcher;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Linkscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("A scan is already in progress")]
    ScanInProgress,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Non-crawlable link: {0}")]
    NotCrawlable(String),
}

/// Result type alias for Linkscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::Controller;
pub use matcher::TargetSpec;
pub use state::{CrawlState, MatchMethod, MatchRecord, StatusSnapshot};
pub use url::{extract_domain, normalize_href, normalize_url, same_domain};
