//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scanner:
//! - Building the HTTP client with user agent and timeouts
//! - GET requests that fetch page content, following redirects
//! - Body-less requests used for redirect verification
//! - Error classification
//!
//! The scan treats every failure cause the same way (page unreachable), so
//! the classification here only feeds logging.

use crate::config::Config;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Result of a page fetch
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, TLS failure, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by the whole scan
///
/// Redirects are followed automatically (bounded hops); both the per-request
/// timeout and the connect timeout come from configuration so a single
/// unreachable host can never stall a run.
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.user_agent.name, config.user_agent.version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult indicating success or the kind of failure
pub async fn fetch_page(client: &Client, url: &Url) -> FetchResult {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            FetchResult::NetworkError { error }
        }
    }
}

/// Resolves where a URL ultimately leads, without downloading its body
///
/// Issues a HEAD request that follows redirects and returns the final
/// resolved URL. Any failure yields `None`; redirect verification simply
/// skips the candidate. The status code is deliberately ignored — a
/// redirect chain ending in an error page still reveals its destination.
pub async fn resolve_final_url(client: &Client, url: &Url, timeout: Duration) -> Option<Url> {
    let response = client
        .head(url.clone())
        .timeout(timeout)
        .send()
        .await
        .ok()?;

    Some(response.url().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = Config::default();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    fn fast_timeout_config() -> Config {
        let mut config = Config::default();
        config.crawler.request_timeout_secs = 1;
        config.crawler.connect_timeout_secs = 1;
        config
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_network_error() {
        let client = build_http_client(&fast_timeout_config()).unwrap();
        // Reserved TEST-NET-1 address, nothing listens there
        let url = Url::parse("http://192.0.2.1:9/page").unwrap();

        match fetch_page(&client, &url).await {
            FetchResult::NetworkError { .. } => {}
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resolve_unreachable_host_is_none() {
        let client = build_http_client(&fast_timeout_config()).unwrap();
        let url = Url::parse("http://192.0.2.1:9/download").unwrap();

        let resolved = resolve_final_url(&client, &url, Duration::from_millis(200)).await;
        assert!(resolved.is_none());
    }
}
