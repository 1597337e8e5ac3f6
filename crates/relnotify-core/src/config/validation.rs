//! Configuration validation

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_repository(config)?;
    validate_changelog(config)?;
    validate_categories(config)?;
    validate_slack(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_repository(config: &Config) -> Result<()> {
    if !config.repository.console_url.contains("{repository}") {
        return Err(ConfigError::InvalidValue {
            field: "repository.console_url".to_string(),
            message: "must contain {repository} placeholder".to_string(),
        });
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    let patterns = [
        ("changelog.commit_parser", &config.changelog.commit_parser),
        ("changelog.changelog_pattern", &config.changelog.changelog_pattern),
    ];
    for (field, pattern) in patterns {
        if let Some(pattern) = pattern {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidValue {
                field: field.to_string(),
                message: e.to_string(),
            })?;
        }
    }

    if let Some(path) = &config.changelog.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "changelog.path".to_string(),
                message: "path cannot be empty".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_categories(config: &Config) -> Result<()> {
    let names = [
        ("categories.feature", &config.categories.feature),
        ("categories.fix", &config.categories.fix),
        ("categories.performance", &config.categories.performance),
        ("categories.breaking", &config.categories.breaking),
        ("categories.undefined", &config.categories.undefined),
    ];
    for (field, name) in names {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "display name cannot be empty".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_slack(config: &Config) -> Result<()> {
    url::Url::parse(&config.slack.api_url).map_err(|e| ConfigError::InvalidValue {
        field: "slack.api_url".to_string(),
        message: e.to_string(),
    })?;

    Ok(())
}
