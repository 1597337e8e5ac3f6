//! Source selection: changelog document first, commit history as fallback

use serde::Serialize;
use tracing::{info, instrument, warn};

use relnotify_core::config::ChangelogConfig;
use relnotify_core::error::ChangelogError;
use relnotify_git::{ChangelogSource, CommitSource};

use crate::document::DocumentParser;
use crate::grammar::Grammar;
use crate::history::{attribute_author, HistoryParser};
use crate::types::ReleaseTree;

/// Where a release tree came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeOrigin {
    /// Parsed from the committed changelog document
    Changelog,
    /// Parsed from commit messages
    Commits,
}

/// A release tree together with its origin
#[derive(Debug)]
pub struct Collected {
    pub tree: ReleaseTree,
    pub origin: TreeOrigin,
}

/// Builds release trees for a commit window according to configuration
pub struct ReleaseCollector<'a> {
    config: &'a ChangelogConfig,
    grammar: Grammar,
}

impl<'a> ReleaseCollector<'a> {
    /// Create a collector, compiling any grammar overrides
    pub fn new(config: &'a ChangelogConfig) -> Result<Self, ChangelogError> {
        Ok(Self {
            config,
            grammar: Grammar::from_config(config)?,
        })
    }

    /// History parser configured with version label and hooks
    pub fn history_parser(&self) -> HistoryParser {
        let mut parser = HistoryParser::new().with_grammar(self.grammar.clone());
        if let Some(version) = &self.config.unreleased_version {
            parser = parser.with_version(version.clone());
        }
        if self.config.attribute_authors {
            parser = parser.with_hook(attribute_author);
        }
        parser
    }

    /// Parse the changelog document, if configured and changed in the window
    #[instrument(skip(self, source))]
    pub fn changelog_tree<C>(
        &self,
        source: &C,
        newest: &str,
        last: Option<&str>,
    ) -> relnotify_git::Result<ReleaseTree>
    where
        C: ChangelogSource + ?Sized,
    {
        let Some(path) = &self.config.path else {
            return Ok(ReleaseTree::empty());
        };

        match source.changelog_content(path, newest, last)? {
            Some(content) => Ok(DocumentParser::new().parse(&content)),
            None => {
                info!(path = %path.display(), "no changelog blob in window");
                Ok(ReleaseTree::empty())
            }
        }
    }

    /// Parse the commit window
    #[instrument(skip(self, source))]
    pub fn commit_tree<S>(
        &self,
        source: &S,
        newest: &str,
        last: Option<&str>,
    ) -> relnotify_git::Result<ReleaseTree>
    where
        S: CommitSource + ?Sized,
    {
        self.history_parser().parse_window(source, newest, last)
    }

    /// Prefer the changelog document; fall back to commit history when it
    /// is not configured, not found, unreadable, or yields no entries.
    pub fn collect<R>(
        &self,
        repo: &R,
        newest: &str,
        last: Option<&str>,
    ) -> relnotify_git::Result<Collected>
    where
        R: ChangelogSource + CommitSource + ?Sized,
    {
        match self.changelog_tree(repo, newest, last) {
            Ok(tree) if tree.has_changes() => {
                return Ok(Collected {
                    tree,
                    origin: TreeOrigin::Changelog,
                });
            }
            Ok(_) => {
                if self.config.path.is_some() {
                    warn!("changelog produced no entries, falling back to commits");
                }
            }
            Err(err) => warn!(%err, "changelog lookup failed, falling back to commits"),
        }

        Ok(Collected {
            tree: self.commit_tree(repo, newest, last)?,
            origin: TreeOrigin::Commits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;
    use crate::types::UNRELEASED;
    use relnotify_core::error::GitError;
    use relnotify_git::CommitRecord;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    struct FakeRepo {
        commits: HashMap<String, CommitRecord>,
        changelog: Option<String>,
        fail_changelog: bool,
    }

    impl FakeRepo {
        fn new(changelog: Option<&str>) -> Self {
            let mut commits = HashMap::new();
            commits.insert(
                "r0".to_string(),
                CommitRecord::new("r0", "chore: init", "A", "a@b"),
            );
            commits.insert(
                "r1".to_string(),
                CommitRecord::new("r1", "feat(ui): dark mode", "Ada", "ada@b").with_parents(["r0"]),
            );
            Self {
                commits,
                changelog: changelog.map(str::to_string),
                fail_changelog: false,
            }
        }
    }

    impl CommitSource for FakeRepo {
        fn fetch_commit(&self, rev: &str) -> relnotify_git::Result<CommitRecord> {
            self.commits.fetch_commit(rev)
        }
    }

    impl ChangelogSource for FakeRepo {
        fn changelog_content(
            &self,
            _path: &Path,
            _newest: &str,
            _last: Option<&str>,
        ) -> relnotify_git::Result<Option<String>> {
            if self.fail_changelog {
                return Err(GitError::UnknownRevision("r1".to_string()));
            }
            Ok(self.changelog.clone())
        }
    }

    fn config(path: Option<&str>) -> ChangelogConfig {
        ChangelogConfig {
            path: path.map(PathBuf::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_prefers_changelog() {
        let repo = FakeRepo::new(Some("## 1.4.0\n### fix\n- **db**: leak\n"));
        let config = config(Some("CHANGELOG.md"));
        let collected = ReleaseCollector::new(&config)
            .unwrap()
            .collect(&repo, "r1", Some("r0"))
            .unwrap();

        assert_eq!(collected.origin, TreeOrigin::Changelog);
        let release = collected.tree.peek().unwrap();
        assert_eq!(release.label(), "v1.4.0");
        assert_eq!(release.entries(Category::Fix).len(), 1);
    }

    #[test]
    fn test_falls_back_when_not_configured() {
        let repo = FakeRepo::new(Some("## 1.4.0\n### fix\n- leak\n"));
        let config = config(None);
        let collected = ReleaseCollector::new(&config)
            .unwrap()
            .collect(&repo, "r1", Some("r0"))
            .unwrap();

        assert_eq!(collected.origin, TreeOrigin::Commits);
        let release = collected.tree.peek().unwrap();
        assert_eq!(release.label(), UNRELEASED);
        assert_eq!(release.entries(Category::Feat).len(), 1);
    }

    #[test]
    fn test_falls_back_when_blob_missing() {
        let repo = FakeRepo::new(None);
        let config = config(Some("CHANGELOG.md"));
        let collected = ReleaseCollector::new(&config)
            .unwrap()
            .collect(&repo, "r1", Some("r0"))
            .unwrap();
        assert_eq!(collected.origin, TreeOrigin::Commits);
    }

    #[test]
    fn test_falls_back_when_changelog_empty() {
        let repo = FakeRepo::new(Some("## [Unreleased]\n### fix\n- wip\n"));
        let config = config(Some("CHANGELOG.md"));
        let collected = ReleaseCollector::new(&config)
            .unwrap()
            .collect(&repo, "r1", Some("r0"))
            .unwrap();
        assert_eq!(collected.origin, TreeOrigin::Commits);
    }

    #[test]
    fn test_falls_back_on_changelog_error() {
        let mut repo = FakeRepo::new(Some("## 1.0.0\n### fix\n- a\n"));
        repo.fail_changelog = true;
        let config = config(Some("CHANGELOG.md"));
        let collected = ReleaseCollector::new(&config)
            .unwrap()
            .collect(&repo, "r1", Some("r0"))
            .unwrap();
        assert_eq!(collected.origin, TreeOrigin::Commits);
    }

    #[test]
    fn test_changelog_tree_without_path_is_empty() {
        let repo = FakeRepo::new(Some("## 1.0.0\n### fix\n- a\n"));
        let config = config(None);
        let tree = ReleaseCollector::new(&config)
            .unwrap()
            .changelog_tree(&repo, "r1", None)
            .unwrap();
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_history_parser_honors_config() {
        let repo = FakeRepo::new(None);
        let config = ChangelogConfig {
            unreleased_version: Some("v3.0.0".to_string()),
            attribute_authors: true,
            ..Default::default()
        };
        let release = ReleaseCollector::new(&config)
            .unwrap()
            .commit_tree(&repo, "r1", None)
            .unwrap()
            .next()
            .unwrap();

        assert_eq!(release.label(), "v3.0.0");
        assert!(release.date.is_some());
        assert_eq!(
            release.entries(Category::Feat)[0].author.as_deref(),
            Some("Ada")
        );
    }

    #[test]
    fn test_invalid_override_rejected() {
        let config = ChangelogConfig {
            commit_parser: Some("(".to_string()),
            ..Default::default()
        };
        assert!(ReleaseCollector::new(&config).is_err());
    }
}
