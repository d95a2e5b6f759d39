//! VosDroits: structured access to French public service websites
//!
//! This crate crawls pages of service-public.gouv.fr and impots.gouv.fr and extracts
//! normalized records from their HTML, respecting a per-site politeness delay and
//! degrading list-shaped lookups to deterministic defaults when the crawl fails.

pub mod client;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod fallback;
pub mod output;
pub mod site;
pub mod url;

use thiserror::Error;

/// Main error type for VosDroits operations
#[derive(Debug, Error)]
pub enum VosDroitsError {
    #[error("Invalid URL: {0}")]
    UrlInvalid(String),

    #[error("URL must be from {expected} domain, got: {host}")]
    DomainMismatch { host: String, expected: String },

    #[error("Invalid target {url}: {reason}")]
    InvalidTarget { url: String, reason: String },

    #[error("Page not found: {url}")]
    NotFound { url: String },

    #[error("HTTP error {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("No content found at URL: {url}")]
    NoContent { url: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{operation} is not available on {site}")]
    Unsupported { site: String, operation: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl VosDroitsError {
    /// Stable snake-case name of the error class
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UrlInvalid(_) => "url_invalid",
            Self::DomainMismatch { .. } => "domain_mismatch",
            Self::InvalidTarget { .. } => "invalid_target",
            Self::NotFound { .. } => "not_found",
            Self::Http { .. } => "http_error",
            Self::Fetch { .. } => "fetch_error",
            Self::NoContent { .. } => "no_content",
            Self::Cancelled => "operation_cancelled",
            Self::Unsupported { .. } => "unsupported",
            Self::Selector { .. } => "selector",
            Self::Client(_) => "client",
            Self::Config(_) => "config",
        }
    }

    /// Returns true for errors raised before any network activity
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::UrlInvalid(_)
                | Self::DomainMismatch { .. }
                | Self::InvalidTarget { .. }
                | Self::Unsupported { .. }
        )
    }
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

/// Result type alias for VosDroits operations
pub type Result<T> = std::result::Result<T, VosDroitsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::SiteClient;
pub use config::Config;
pub use extract::{Article, ArticleKind, Category, LifeEvent, LifeEventDetail, SearchResult, Section};
pub use output::Record;
pub use site::{SiteId, SiteProfile};
pub use tokio_util::sync::CancellationToken;
