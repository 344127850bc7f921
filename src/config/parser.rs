use crate::config::types::{defaults, SeekerConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(SeekerConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use dead_seeker::config::load_config;
///
/// let config = load_config(Path::new("dead-seeker.toml")).unwrap();
/// println!("Max retries: {}", config.max_retries);
/// ```
pub fn load_config(path: &Path) -> Result<SeekerConfig, ConfigError> {
    let config = read_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Reads a configuration file without validating it
///
/// Used when more inputs are layered on top before the final validation.
pub fn read_config(path: &Path) -> Result<SeekerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    deserialize_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<SeekerConfig, ConfigError> {
    let config = deserialize_config(content)?;
    validate(&config)?;
    Ok(config)
}

/// Deserializes TOML text; `exclude-prefix` adds to the default prefixes
fn deserialize_config(content: &str) -> Result<SeekerConfig, ConfigError> {
    let mut config: SeekerConfig = toml::from_str(content)?;
    let listed = std::mem::replace(
        &mut config.exclude_prefix,
        defaults::EXCLUDE_PREFIX.iter().map(|s| s.to_string()).collect(),
    );
    config.add_exclude_prefix(listed);
    Ok(config)
}

/// Splits a comma-separated input into trimmed, non-empty items
///
/// This is the list format of the action's environment inputs
/// (e.g. `INPUT_EXCLUDE_URL_PREFIX=mailto:,/private`).
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a truthy flag value (`t`, `true`, `y`, `yes`, `on`)
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "t" | "true" | "y" | "yes" | "on"
    )
}
