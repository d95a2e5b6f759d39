use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Environment overrides are applied before validation.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&content)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    validate(&config)?;

    Ok(config)
}

/// Loads the file when a path is given, otherwise starts from defaults
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = Config::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Applies `HTTP_TIMEOUT` (seconds, optional `s` suffix) and `LOG_LEVEL`
///
/// The lookup is injected so tests don't have to touch the process environment.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup("HTTP_TIMEOUT").filter(|v| !v.trim().is_empty()) {
        let trimmed = raw.trim();
        let digits = trimmed.strip_suffix('s').unwrap_or(trimmed);
        let secs = digits.parse::<u64>().map_err(|_| {
            ConfigError::Validation(format!("HTTP_TIMEOUT must be a number of seconds, got '{raw}'"))
        })?;
        config.client.request_timeout_secs = secs;
    }

    if let Some(level) = lookup("LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
        config.logging.level = level.trim().to_lowercase();
    }

    Ok(())
}
