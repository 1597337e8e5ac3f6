//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults;

/// Main configuration for relnotify
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository presentation settings
    pub repository: RepositoryConfig,

    /// Changelog parsing configuration
    pub changelog: ChangelogConfig,

    /// Category display names
    pub categories: CategoryConfig,

    /// Slack delivery configuration
    pub slack: SlackConfig,
}

/// Repository presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository name shown in notifications (defaults to the directory name)
    pub name: Option<String>,

    /// Account identifier shown in the notification header
    pub account_id: Option<String>,

    /// Region shown in the header and appended to console links
    pub region: Option<String>,

    /// Console URL template, must contain `{repository}`
    pub console_url: String,

    /// Full reference name used for changelog browse links
    pub reference: Option<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            name: None,
            account_id: None,
            region: None,
            console_url: defaults::DEFAULT_CONSOLE_URL.to_string(),
            reference: None,
        }
    }
}

/// Changelog parsing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Path of the changelog document inside the repository.
    /// When unset, notifications are built from commit history only.
    pub path: Option<PathBuf>,

    /// Explicit version label for the commit-history pass
    pub unreleased_version: Option<String>,

    /// Attach commit authors to entries parsed from history
    pub attribute_authors: bool,

    /// Override for the commit header grammar
    pub commit_parser: Option<String>,

    /// Override for the pattern deciding which commits are considered
    pub changelog_pattern: Option<String>,
}

/// Display names for each rendered category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Display name for features
    pub feature: String,
    /// Display name for fixes
    pub fix: String,
    /// Display name for performance improvements
    pub performance: String,
    /// Display name for breaking changes
    pub breaking: String,
    /// Display name for everything else
    pub undefined: String,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            feature: defaults::FEATURE_DISPLAY_NAME.to_string(),
            fix: defaults::FIX_DISPLAY_NAME.to_string(),
            performance: defaults::PERFORMANCE_DISPLAY_NAME.to_string(),
            breaking: defaults::BREAKING_DISPLAY_NAME.to_string(),
            undefined: defaults::UNDEFINED_DISPLAY_NAME.to_string(),
        }
    }
}

/// Slack delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Channel name, with or without the leading `#`
    pub channel: Option<String>,

    /// Bot token; usually supplied through `SLACK_TOKEN`
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// Username the message is posted as
    pub username: String,

    /// Emoji used as the message icon
    pub icon_emoji: String,

    /// `chat.postMessage` endpoint
    pub api_url: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            channel: None,
            token: None,
            username: defaults::DEFAULT_USERNAME.to_string(),
            icon_emoji: defaults::DEFAULT_ICON_EMOJI.to_string(),
            api_url: defaults::DEFAULT_SLACK_API_URL.to_string(),
        }
    }
}

impl SlackConfig {
    /// Channel name normalized to a single leading `#`
    pub fn channel_ref(&self) -> Option<String> {
        self.channel
            .as_deref()
            .map(|c| format!("#{}", c.trim_start_matches('#')))
    }
}
