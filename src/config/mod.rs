//! Configuration module for VosDroits
//!
//! This module handles loading, parsing, and validating the optional TOML configuration
//! file, plus the `HTTP_TIMEOUT` and `LOG_LEVEL` environment overrides.
//!
//! # Example
//!
//! ```no_run
//! use vosdroits::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("vosdroits.toml")).unwrap();
//! println!("Request timeout: {}s", config.client.request_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ClientConfig, Config, LoggingConfig, PolitenessConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{apply_env_overrides, load_config, load_config_or_default};
