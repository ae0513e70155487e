use std::fs;
use std::path::Path;

use tracing::debug;

use super::error::ConfigError;
use crate::types::CumConfig;

/// Environment variables that override config file values.
pub const ENV_API_TOKEN: &str = "CLICKUP_API_TOKEN";
pub const ENV_API_TOKEN_FALLBACK: &str = "CUM_API_TOKEN";
pub const ENV_TEAM_ID: &str = "CUM_TEAM_ID";
pub const ENV_BASE_URL: &str = "CUM_BASE_URL";

pub const ENV_OVERRIDES: [&str; 4] = [
    ENV_API_TOKEN,
    ENV_API_TOKEN_FALLBACK,
    ENV_TEAM_ID,
    ENV_BASE_URL,
];

pub fn config_exists(config_path: &str) -> bool {
    Path::new(config_path).exists()
}

/// Read and parse the YAML config file without applying overrides.
pub fn read_config(config_path: &str) -> Result<CumConfig, ConfigError> {
    let path = Path::new(config_path);
    if !path.exists() {
        return Err(ConfigError::NotFound(config_path.to_string()));
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(CumConfig::default());
    }
    let config: CumConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Read the config file, falling back to defaults when it does not exist,
/// then apply environment overrides and validate.
pub fn read_config_with_env(config_path: &str) -> Result<CumConfig, ConfigError> {
    let config = match read_config(config_path) {
        Ok(config) => config,
        Err(ConfigError::NotFound(_)) => {
            debug!("No config at {config_path}, using defaults");
            CumConfig::default()
        }
        Err(e) => return Err(e),
    };
    let config = apply_env_overrides(config, |var| std::env::var(var).ok())?;
    validate_config(&config)?;
    Ok(config)
}

/// Apply overrides from `lookup` (normally the process environment).
pub fn apply_env_overrides<F>(mut config: CumConfig, lookup: F) -> Result<CumConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(token) = non_empty(ENV_API_TOKEN).or_else(|| non_empty(ENV_API_TOKEN_FALLBACK)) {
        config.api_token = Some(token.trim().to_string());
    }

    if let Some(team_id) = non_empty(ENV_TEAM_ID) {
        let team_id = team_id.trim().to_string();
        if !team_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidOverride {
                var: ENV_TEAM_ID.to_string(),
                message: format!("expected a numeric team id, got '{team_id}'"),
            });
        }
        config.team_id = Some(team_id);
    }

    if let Some(base_url) = non_empty(ENV_BASE_URL) {
        config.base_url = base_url.trim().to_string();
    }

    Ok(config)
}

/// Validate a config, collecting every problem.
pub fn validate_config(config: &CumConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.base_url.trim().is_empty() {
        errors.push("base_url must not be empty".to_string());
    }

    if let Some(ref team_id) = config.team_id {
        if team_id.is_empty() || !team_id.chars().all(|c| c.is_ascii_digit()) {
            errors.push(format!("team_id must be numeric, got '{team_id}'"));
        }
    }

    if let Some(ref token) = config.api_token {
        if token.trim().is_empty() {
            errors.push("api_token must not be empty when set".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors))
    }
}

/// Write the config as YAML, creating parent directories.
pub fn write_config(config_path: &str, config: &CumConfig) -> Result<(), ConfigError> {
    let path = Path::new(config_path);
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    let yaml = serde_yaml::to_string(config)?;
    fs::write(path, yaml)?;
    Ok(())
}
