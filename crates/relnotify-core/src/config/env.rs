//! Environment variable overrides

use std::path::PathBuf;

use tracing::debug;

use super::types::Config;

pub const FEATURE_TYPE_DISPLAY_NAME: &str = "FEATURE_TYPE_DISPLAY_NAME";
pub const FIX_TYPE_DISPLAY_NAME: &str = "FIX_TYPE_DISPLAY_NAME";
pub const PERFORMANCE_TYPE_DISPLAY_NAME: &str = "PERFORMANCE_TYPE_DISPLAY_NAME";
pub const BREAKING_CHANGE_TYPE_DISPLAY_NAME: &str = "BREAKING_CHANGE_TYPE_DISPLAY_NAME";
pub const UNDEFINED_TYPE_DISPLAY_NAME: &str = "UNDEFINED_TYPE_DISPLAY_NAME";
pub const CHANGELOG_PATH: &str = "CHANGELOG_PATH";
pub const CHANNEL_NAME: &str = "CHANNEL_NAME";
pub const SLACK_TOKEN: &str = "SLACK_TOKEN";

/// Apply overrides from an arbitrary lookup. Empty values are ignored.
pub fn apply_overrides_with<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let display_names = [
        (FEATURE_TYPE_DISPLAY_NAME, &mut config.categories.feature),
        (FIX_TYPE_DISPLAY_NAME, &mut config.categories.fix),
        (PERFORMANCE_TYPE_DISPLAY_NAME, &mut config.categories.performance),
        (BREAKING_CHANGE_TYPE_DISPLAY_NAME, &mut config.categories.breaking),
        (UNDEFINED_TYPE_DISPLAY_NAME, &mut config.categories.undefined),
    ];
    for (key, slot) in display_names {
        if let Some(value) = get(key) {
            debug!(key, "display name overridden from environment");
            *slot = value;
        }
    }

    if let Some(path) = get(CHANGELOG_PATH) {
        config.changelog.path = Some(PathBuf::from(path));
    }
    if let Some(channel) = get(CHANNEL_NAME) {
        config.slack.channel = Some(channel);
    }
    if let Some(token) = get(SLACK_TOKEN) {
        config.slack.token = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_display_names() {
        let mut config = Config::default();
        apply_overrides_with(
            &mut config,
            lookup(&[(FIX_TYPE_DISPLAY_NAME, "Fixes"), (UNDEFINED_TYPE_DISPLAY_NAME, "Misc")]),
        );
        assert_eq!(config.categories.fix, "Fixes");
        assert_eq!(config.categories.undefined, "Misc");
        assert_eq!(config.categories.feature, "New Features");
    }

    #[test]
    fn test_empty_values_ignored() {
        let mut config = Config::default();
        apply_overrides_with(
            &mut config,
            lookup(&[(FEATURE_TYPE_DISPLAY_NAME, ""), (CHANGELOG_PATH, "  ")]),
        );
        assert_eq!(config.categories.feature, "New Features");
        assert!(config.changelog.path.is_none());
    }

    #[test]
    fn test_overrides_changelog_and_slack() {
        let mut config = Config::default();
        apply_overrides_with(
            &mut config,
            lookup(&[
                (CHANGELOG_PATH, "CHANGELOG.md"),
                (CHANNEL_NAME, "deploys"),
                (SLACK_TOKEN, "xoxb-1"),
            ]),
        );
        assert_eq!(config.changelog.path, Some(PathBuf::from("CHANGELOG.md")));
        assert_eq!(config.slack.channel.as_deref(), Some("deploys"));
        assert_eq!(config.slack.token.as_deref(), Some("xoxb-1"));
    }
}
