//! Change-type classification and display categories

use serde::{Deserialize, Serialize};

use relnotify_core::config::CategoryConfig;
use relnotify_core::error::ChangelogError;

/// Canonical change type produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Fix,
    Breaking,
    Feat,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
}

/// Substring patterns in priority order. The first pattern found anywhere
/// in the lower-cased token wins.
const CLASSIFICATION_ORDER: [(&str, ChangeType); 9] = [
    ("fix", ChangeType::Fix),
    ("breaking", ChangeType::Breaking),
    ("feat", ChangeType::Feat),
    ("refactor", ChangeType::Refactor),
    ("perf", ChangeType::Perf),
    ("test", ChangeType::Test),
    ("build", ChangeType::Build),
    ("ci", ChangeType::Ci),
    ("chore", ChangeType::Chore),
];

/// Classify a raw change-type token.
///
/// Fails with [`ChangelogError::UnrecognizedCategory`] when no pattern
/// matches; callers fall back to [`Category::Others`].
pub fn classify(token: &str) -> Result<ChangeType, ChangelogError> {
    let lowered = token.to_lowercase();
    CLASSIFICATION_ORDER
        .iter()
        .find(|(pattern, _)| lowered.contains(*pattern))
        .map(|(_, change_type)| *change_type)
        .ok_or_else(|| ChangelogError::UnrecognizedCategory(token.to_string()))
}

/// Display bucket. Declaration order is render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "BREAKING CHANGES")]
    Breaking,
    #[serde(rename = "feat")]
    Feat,
    #[serde(rename = "fix")]
    Fix,
    #[serde(rename = "perf")]
    Perf,
    #[serde(rename = "others")]
    Others,
}

impl Category {
    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::Breaking => "BREAKING CHANGES",
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Perf => "perf",
            Self::Others => "others",
        }
    }

    /// Slack emoji shown before the category title
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Breaking => ":bangbang:",
            Self::Feat => ":heavy_plus_sign:",
            Self::Fix => ":wrench:",
            Self::Perf => ":rocket:",
            Self::Others => ":gear:",
        }
    }

    /// Configured display name
    pub fn display_name<'a>(&self, names: &'a CategoryConfig) -> &'a str {
        match self {
            Self::Breaking => &names.breaking,
            Self::Feat => &names.feature,
            Self::Fix => &names.fix,
            Self::Perf => &names.performance,
            Self::Others => &names.undefined,
        }
    }
}

impl From<ChangeType> for Category {
    fn from(change_type: ChangeType) -> Self {
        match change_type {
            ChangeType::Breaking => Category::Breaking,
            ChangeType::Feat => Category::Feat,
            ChangeType::Fix => Category::Fix,
            ChangeType::Perf => Category::Perf,
            ChangeType::Refactor
            | ChangeType::Test
            | ChangeType::Build
            | ChangeType::Ci
            | ChangeType::Chore => Category::Others,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic_tokens() {
        assert_eq!(classify("feat").unwrap(), ChangeType::Feat);
        assert_eq!(classify("fix").unwrap(), ChangeType::Fix);
        assert_eq!(classify("perf").unwrap(), ChangeType::Perf);
        assert_eq!(classify("BREAKING CHANGE").unwrap(), ChangeType::Breaking);
        assert_eq!(classify("chore").unwrap(), ChangeType::Chore);
    }

    #[test]
    fn test_classify_priority_order() {
        assert_eq!(classify("fix-perf").unwrap(), ChangeType::Fix);
        assert_eq!(classify("perf-fix").unwrap(), ChangeType::Fix);
        assert_eq!(classify("breaking feat").unwrap(), ChangeType::Breaking);
    }

    #[test]
    fn test_classify_is_substring_search() {
        assert_eq!(classify("### Bugs Fixed").unwrap(), ChangeType::Fix);
        assert_eq!(classify("### New Features").unwrap(), ChangeType::Feat);
        assert_eq!(classify("### Performance Improvement").unwrap(), ChangeType::Perf);
        assert_eq!(classify("hotfixes").unwrap(), ChangeType::Fix);
    }

    #[test]
    fn test_classify_unrecognized() {
        let err = classify("docs").unwrap_err();
        assert!(matches!(err, ChangelogError::UnrecognizedCategory(ref t) if t == "docs"));
        assert!(classify("### others").is_err());
    }

    #[test]
    fn test_non_display_types_map_to_others() {
        assert_eq!(Category::from(classify("feat").unwrap()), Category::Feat);
        assert_eq!(Category::from(classify("refactor").unwrap()), Category::Others);
        assert_eq!(Category::from(classify("chore").unwrap()), Category::Others);
    }

    #[test]
    fn test_render_order() {
        let mut shuffled = vec![
            Category::Others,
            Category::Fix,
            Category::Breaking,
            Category::Perf,
            Category::Feat,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                Category::Breaking,
                Category::Feat,
                Category::Fix,
                Category::Perf,
                Category::Others,
            ]
        );
    }

    #[test]
    fn test_display_names_and_icons() {
        let names = CategoryConfig::default();
        assert_eq!(Category::Feat.display_name(&names), "New Features");
        assert_eq!(Category::Others.display_name(&names), "Others");
        assert_eq!(Category::Fix.icon(), ":wrench:");
        assert_eq!(Category::Breaking.to_string(), "BREAKING CHANGES");
    }
}
