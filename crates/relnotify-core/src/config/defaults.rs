//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "relnotify.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "relnotify.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".relnotify.yaml";

pub const FEATURE_DISPLAY_NAME: &str = "New Features";
pub const FIX_DISPLAY_NAME: &str = "Bugs Fixed";
pub const PERFORMANCE_DISPLAY_NAME: &str = "Performance Improvement";
pub const BREAKING_DISPLAY_NAME: &str = "BREAKING CHANGES";
pub const UNDEFINED_DISPLAY_NAME: &str = "Others";

/// CodeCommit console page for a repository
pub const DEFAULT_CONSOLE_URL: &str =
    "https://console.aws.amazon.com/codesuite/codecommit/repositories/{repository}/";

pub const DEFAULT_USERNAME: &str = "Amazon CodeCommit";
pub const DEFAULT_ICON_EMOJI: &str = ":codecommit:";
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api/chat.postMessage";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".relnotify.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# relnotify configuration

repository:
  # name: my-service
  # account_id: "123456789012"
  # region: us-east-1
  console_url: "https://console.aws.amazon.com/codesuite/codecommit/repositories/{repository}/"

changelog:
  # Leave unset to build notifications from commit history only
  # path: CHANGELOG.md
  attribute_authors: false

categories:
  feature: New Features
  fix: Bugs Fixed
  performance: Performance Improvement
  breaking: BREAKING CHANGES
  undefined: Others

slack:
  # channel: releases
  # token is read from SLACK_TOKEN
  username: Amazon CodeCommit
  icon_emoji: ":codecommit:"
  api_url: https://slack.com/api/chat.postMessage
"#;
