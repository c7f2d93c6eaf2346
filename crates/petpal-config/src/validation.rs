//! Configuration validation module.
//!
//! Checks every section and reports all problems at once instead of
//! stopping at the first one.

use crate::AppConfig;
use petpal_core::rules;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// A required text value is empty.
    EmptyValue { name: String },
    /// Timeout or interval must be positive.
    NonPositiveDuration { name: String },
    /// Timeout or interval exceeds the allowed maximum.
    DurationTooLong { name: String, max_secs: u64 },
    /// Default subreddit is not a valid subreddit name.
    InvalidSubreddit { value: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {name}: {value} (must be 1-65535)")
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {url_type} URL: {message}")
            }
            Self::EmptyValue { name } => write!(f, "'{name}' cannot be empty"),
            Self::NonPositiveDuration { name } => {
                write!(f, "'{name}' must be positive")
            }
            Self::DurationTooLong { name, max_secs } => {
                write!(f, "'{name}' must be at most {max_secs} seconds")
            }
            Self::InvalidSubreddit { value } => {
                write!(f, "Invalid default subreddit: '{value}'")
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{value}' (valid: trace, debug, info, warn, error)"
                )
            }
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{value}' (valid: pretty, json)")
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    /// Valid log formats.
    const VALID_LOG_FORMATS: &'static [&'static str] = &["pretty", "json"];
    /// Upper bound for every configured duration: one day.
    const MAX_DURATION_SECS: u64 = 86_400;

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(&config.server, &mut errors);
        Self::validate_reddit(&config.reddit, &mut errors);
        Self::validate_cache(&config.cache, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &crate::ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }
        if config.host.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyValue {
                name: "server.host".to_string(),
            });
        }
    }

    fn validate_reddit(config: &crate::RedditConfig, errors: &mut Vec<ConfigValidationError>) {
        match Url::parse(&config.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "reddit.base_url".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "reddit.base_url".to_string(),
                message: e.to_string(),
            }),
        }

        if config.user_agent.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyValue {
                name: "reddit.user_agent".to_string(),
            });
        }

        Self::validate_duration(
            "reddit.request_timeout_secs",
            config.request_timeout_secs,
            errors,
        );

        if !rules::subreddit_name(&config.default_subreddit) {
            errors.push(ConfigValidationError::InvalidSubreddit {
                value: config.default_subreddit.clone(),
            });
        }
    }

    fn validate_cache(config: &crate::CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        Self::validate_duration("cache.ttl_secs", config.ttl_secs, errors);
        Self::validate_duration("cache.sweep_interval_secs", config.sweep_interval_secs, errors);
    }

    fn validate_duration(name: &str, secs: u64, errors: &mut Vec<ConfigValidationError>) {
        if secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: name.to_string(),
            });
        } else if secs > Self::MAX_DURATION_SECS {
            errors.push(ConfigValidationError::DurationTooLong {
                name: name.to_string(),
                max_secs: Self::MAX_DURATION_SECS,
            });
        }
    }

    fn validate_observability(
        config: &crate::ObservabilityConfig,
        errors: &mut Vec<ConfigValidationError>,
    ) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        let format = config.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config_passes() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidPort { .. })));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = AppConfig::default();
        config.reddit.base_url = "not a url".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidUrl { .. })));
    }

    #[test]
    fn test_base_url_must_be_http() {
        let mut config = AppConfig::default();
        config.reddit.base_url = "ftp://reddit.com".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("ftp"));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = AppConfig::default();
        config.cache.ttl_secs = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::NonPositiveDuration {
                name: "cache.ttl_secs".to_string()
            }]
        );
    }

    #[test]
    fn test_durations_longer_than_a_day_rejected() {
        let mut config = AppConfig::default();
        config.cache.ttl_secs = u64::MAX;
        config.cache.sweep_interval_secs = 86_401;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ConfigValidationError::DurationTooLong {
                    name: "cache.ttl_secs".to_string(),
                    max_secs: 86_400,
                },
                ConfigValidationError::DurationTooLong {
                    name: "cache.sweep_interval_secs".to_string(),
                    max_secs: 86_400,
                },
            ]
        );
        assert!(errors[0].to_string().contains("at most 86400 seconds"));
    }

    #[test]
    fn test_one_day_durations_accepted() {
        let mut config = AppConfig::default();
        config.cache.ttl_secs = 86_400;
        config.cache.sweep_interval_secs = 86_400;
        config.reddit.request_timeout_secs = 86_400;

        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_default_subreddit() {
        let mut config = AppConfig::default();
        config.reddit.default_subreddit = "../pets".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidSubreddit { .. })));
    }

    #[test]
    fn test_invalid_log_settings() {
        let mut config = AppConfig::default();
        config.observability.log_level = "verbose".to_string();
        config.observability.log_format = "xml".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_multiple_errors() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.reddit.user_agent = "  ".to_string();
        config.reddit.request_timeout_secs = 0;
        config.cache.sweep_interval_secs = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_format_validation_errors() {
        let errors = vec![
            ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: 0,
            },
            ConfigValidationError::EmptyValue {
                name: "reddit.user_agent".to_string(),
            },
        ];
        let output = format_validation_errors(&errors);
        assert!(output.contains("1. Invalid port for server.port"));
        assert!(output.contains("2. 'reddit.user_agent' cannot be empty"));
    }
}
