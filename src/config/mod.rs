//! Configuration module for Linkscout
//!
//! Configuration is loaded from a TOML file; every field carries a default
//! so the binary also runs without one.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, MatcherConfig, ServerConfig, UserAgentConfig};
pub use validation::validate;
