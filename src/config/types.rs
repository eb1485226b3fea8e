use serde::Deserialize;

/// Main configuration structure for Linkscout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// HTTP API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the API server binds to
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-request timeout for page fetches (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Per-request timeout for redirect verification (seconds)
    #[serde(rename = "redirect-timeout-secs", default = "default_redirect_timeout")]
    pub redirect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            redirect_timeout_secs: default_redirect_timeout(),
        }
    }
}

/// Target matching configuration
///
/// The pattern lists are string-containment heuristics tuned to common
/// hosting conventions; they affect match recall, not correctness, and can
/// be adjusted per deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    /// Minimum stem length before partial-filename matching is attempted
    #[serde(rename = "min-stem-length", default = "default_min_stem_length")]
    pub min_stem_length: usize,

    /// Upper bound on redirect-verification requests per page
    #[serde(
        rename = "max-redirect-candidates",
        default = "default_max_redirect_candidates"
    )]
    pub max_redirect_candidates: usize,

    /// Asset-path prefixes checked in front of the target filename
    #[serde(
        rename = "upload-path-patterns",
        default = "default_upload_path_patterns"
    )]
    pub upload_path_patterns: Vec<String>,

    /// Path substrings that mark an outbound link as a download endpoint
    #[serde(
        rename = "download-hint-patterns",
        default = "default_download_hint_patterns"
    )]
    pub download_hint_patterns: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_stem_length: default_min_stem_length(),
            max_redirect_candidates: default_max_redirect_candidates(),
            upload_path_patterns: default_upload_path_patterns(),
            download_hint_patterns: default_download_hint_patterns(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the scanner
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Version of the scanner
    #[serde(default = "default_agent_version")]
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            version: default_agent_version(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:5003".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_redirect_timeout() -> u64 {
    5
}

fn default_min_stem_length() -> usize {
    5
}

fn default_max_redirect_candidates() -> usize {
    8
}

fn default_upload_path_patterns() -> Vec<String> {
    [
        "/uploads/",
        "/wp-content/uploads/",
        "/files/",
        "/media/",
        "/assets/",
        "/static/",
        "/documents/",
        "/downloads/",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_download_hint_patterns() -> Vec<String> {
    ["download", "attachment", "file", "export", "dl"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_agent_name() -> String {
    "linkscout".to_string()
}

fn default_agent_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
