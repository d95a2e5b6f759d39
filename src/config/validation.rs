use crate::config::types::{ClientConfig, Config, LoggingConfig, PolitenessConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_client_config(&config.client)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_politeness_config(&config.politeness)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::Validation(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

fn validate_politeness_config(config: &PolitenessConfig) -> Result<(), ConfigError> {
    if config.minimum_delay_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "minimum_delay_ms must be >= 100ms, got {}ms",
            config.minimum_delay_ms
        )));
    }

    if config.max_parallelism < 1 || config.max_parallelism > 8 {
        return Err(ConfigError::Validation(format!(
            "max_parallelism must be between 1 and 8, got {}",
            config.max_parallelism
        )));
    }

    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if !LOG_LEVELS.contains(&config.level.as_str()) {
        return Err(ConfigError::Validation(format!(
            "logging level must be one of {}, got '{}'",
            LOG_LEVELS.join(", "),
            config.level
        )));
    }
    Ok(())
}
