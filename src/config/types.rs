use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for VosDroits
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub politeness: PolitenessConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Overall timeout for a single fetch (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
        }
    }
}

/// Per-site request pacing, applied to every Site Profile
#[derive(Debug, Clone, Deserialize)]
pub struct PolitenessConfig {
    /// Minimum time between two requests to the same site (milliseconds)
    #[serde(rename = "minimum-delay-ms", default = "default_delay_ms")]
    pub minimum_delay_ms: u64,

    /// Maximum number of requests in flight per site
    #[serde(rename = "max-parallelism", default = "default_parallelism")]
    pub max_parallelism: u32,
}

impl Default for PolitenessConfig {
    fn default() -> Self {
        Self {
            minimum_delay_ms: default_delay_ms(),
            max_parallelism: default_parallelism(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_parallelism() -> u32 {
    1
}

fn default_crawler_name() -> String {
    "VosDroits-MCP-Server".to_string()
}

fn default_crawler_version() -> String {
    "1.0".to_string()
}

fn default_contact_url() -> String {
    "https://github.com/guigui42/mcp-vosdroits".to_string()
}

fn default_level() -> String {
    "info".to_string()
}
