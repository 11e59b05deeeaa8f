use crate::config::types::{ClientConfig, CrawlConfig, Settings};
use crate::url::parse_seed;
use crate::ConfigError;

/// Validates a crawl configuration
///
/// Checks that the seed parses into scheme + authority, the page budget is
/// at least one, and both delays are finite and non-negative.
pub fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    parse_seed(&config.seed_url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

    validate_max_pages(config.max_pages)?;
    validate_seconds("delay_seconds", config.delay_seconds)?;
    validate_seconds("jitter_seconds", config.jitter_seconds)?;

    Ok(())
}

/// Validates HTTP client configuration
pub fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "timeout_seconds must be >= 1".to_string(),
        ));
    }

    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user_agents cannot be empty".to_string(),
        ));
    }

    if config.user_agents.iter().any(|ua| ua.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "user_agents cannot contain blank entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates the values present in a settings file
pub(crate) fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if let Some(max_pages) = settings.crawler.max_pages {
        validate_max_pages(max_pages)?;
    }
    if let Some(delay) = settings.crawler.delay_seconds {
        validate_seconds("delay-seconds", delay)?;
    }
    if let Some(jitter) = settings.crawler.jitter_seconds {
        validate_seconds("jitter-seconds", jitter)?;
    }
    if settings.client.timeout_seconds == Some(0) {
        return Err(ConfigError::Validation(
            "timeout-seconds must be >= 1".to_string(),
        ));
    }
    if let Some(agents) = &settings.client.user_agents {
        if agents.is_empty() || agents.iter().any(|ua| ua.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "user-agents must list at least one non-blank entry".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_max_pages(max_pages: u32) -> Result<(), ConfigError> {
    if max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            max_pages
        )));
    }
    Ok(())
}

fn validate_seconds(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Validation(format!(
            "{} must be a finite number >= 0, got {}",
            name, value
        )));
    }
    Ok(())
}
