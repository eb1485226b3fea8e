use crate::config::types::Config;
use crate::ConfigError;
use std::net::SocketAddr;

/// Validates a configuration after parsing
///
/// Checks that every tunable is usable before a scan starts: the bind
/// address must parse, timeouts and bounds must be non-zero, and the
/// heuristic pattern lists must contain well-formed entries.
///
/// # Arguments
///
/// * `config` - The configuration to validate
///
/// # Returns
///
/// * `Ok(())` - The configuration is valid
/// * `Err(ConfigError)` - A descriptive validation error
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::Validation(format!(
            "bind-address is not a valid socket address: {}",
            config.server.bind_address
        )));
    }

    if config.crawler.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be greater than 0".to_string(),
        ));
    }

    if config.crawler.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be greater than 0".to_string(),
        ));
    }

    if config.crawler.redirect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "redirect-timeout-secs must be greater than 0".to_string(),
        ));
    }

    if config.matcher.min_stem_length == 0 {
        return Err(ConfigError::Validation(
            "min-stem-length must be greater than 0".to_string(),
        ));
    }

    if config.matcher.max_redirect_candidates == 0 {
        return Err(ConfigError::Validation(
            "max-redirect-candidates must be greater than 0".to_string(),
        ));
    }

    for pattern in &config.matcher.upload_path_patterns {
        if !pattern.starts_with('/') || !pattern.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "upload-path-patterns entries must start and end with '/': {}",
                pattern
            )));
        }
    }

    for pattern in &config.matcher.download_hint_patterns {
        if pattern.is_empty() {
            return Err(ConfigError::Validation(
                "download-hint-patterns entries must not be empty".to_string(),
            ));
        }
    }

    if config.user_agent.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name must not be empty".to_string(),
        ));
    }

    Ok(())
}
