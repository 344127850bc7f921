use crate::config::types::SeekerConfig;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &SeekerConfig) -> Result<(), ConfigError> {
    validate_retry_config(config)?;
    validate_search_attrs(&config.search_attrs)?;
    validate_agent(&config.agent)?;
    Ok(())
}

/// Validates retry and timeout settings
fn validate_retry_config(config: &SeekerConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1 second, got {}",
            config.timeout
        )));
    }

    Ok(())
}

/// Validates the attribute names scanned for links
fn validate_search_attrs(attrs: &[String]) -> Result<(), ConfigError> {
    if attrs.is_empty() {
        return Err(ConfigError::Validation(
            "search_attrs must name at least one attribute".to_string(),
        ));
    }

    for attr in attrs {
        let valid = !attr.is_empty()
            && attr
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
            && !attr.starts_with(|c: char| c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(ConfigError::InvalidAttribute(attr.clone()));
        }
    }

    Ok(())
}

/// Validates the User-Agent string
fn validate_agent(agent: &str) -> Result<(), ConfigError> {
    if agent.trim().is_empty() {
        return Err(ConfigError::Validation("agent cannot be empty".to_string()));
    }

    if agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "agent cannot contain control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates the seed addresses of a run
///
/// At least one seed is required and each must be an absolute `http` or
/// `https` URL.
pub fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one website URL must be provided".to_string(),
        ));
    }

    for seed in seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Seed URL '{}' must use http or https",
                seed
            )));
        }

        if url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "Seed URL '{}' has no host",
                seed
            )));
        }
    }

    Ok(())
}
