use std::fmt;

/// Errors raised while reading, writing, or validating the cum config
#[derive(Debug)]
pub enum ConfigError {
    /// No config file at the resolved path
    NotFound(String),
    /// YAML could not be parsed into the config schema
    ParseError(String),
    /// Reading or writing the config file failed
    IoError(std::io::Error),
    /// One or more settings are invalid
    ValidationError(Vec<String>),
    /// An environment override holds a value that cannot be used
    InvalidOverride { var: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::ParseError(msg) => write!(f, "Config parse error: {msg}"),
            ConfigError::IoError(err) => write!(f, "Config IO error: {err}"),
            ConfigError::ValidationError(errors) => {
                writeln!(f, "Config validation failed:")?;
                for err in errors {
                    writeln!(f, "  - {err}")?;
                }
                Ok(())
            }
            ConfigError::InvalidOverride { var, message } => {
                write!(f, "Invalid value in {var}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound("/home/me/.config/cum/config.yaml".to_string());
        assert!(err.to_string().contains("/home/me/.config/cum/config.yaml"));

        let err = ConfigError::ValidationError(vec![
            "base_url must not be empty".to_string(),
            "team_id must be numeric".to_string(),
        ]);
        let display = err.to_string();
        assert!(display.contains("base_url must not be empty"));
        assert!(display.contains("team_id must be numeric"));

        let err = ConfigError::InvalidOverride {
            var: "CUM_TEAM_ID".to_string(),
            message: "must be numeric".to_string(),
        };
        assert!(err.to_string().contains("CUM_TEAM_ID"));
    }

    #[test]
    fn test_config_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<crate::types::CumConfig>("assigned: [")
            .expect_err("malformed YAML");
        let err: ConfigError = yaml_err.into();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_config_error_source() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ConfigError = io_err.into();
        assert!(err.source().is_some());
        assert!(ConfigError::NotFound("x".to_string()).source().is_none());
    }
}
