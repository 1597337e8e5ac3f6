//! Commit-history parser
//!
//! Turns a window of commits into a single release. Commits whose message
//! does not start with a recognized change type are skipped. The title and
//! body are matched against the header grammar, and the footer is matched
//! independently, so one commit can contribute up to two entries.

use chrono::Local;
use tracing::{debug, info, instrument, trace};

use relnotify_git::{walk_first_parent, Commit, CommitSource};

use crate::classifier::{classify, Category};
use crate::grammar::{Grammar, HeaderMatch};
use crate::types::{ChangeEntry, Release, ReleaseTree, UNRELEASED};

/// Transforms each parsed entry before it is stored
pub type EntryHook = Box<dyn Fn(ChangeEntry, &Commit) -> ChangeEntry + Send + Sync>;

/// Hook attaching the commit author to each entry
pub fn attribute_author(mut entry: ChangeEntry, commit: &Commit) -> ChangeEntry {
    if !commit.author.is_empty() {
        entry.author = Some(commit.author.clone());
    }
    entry
}

/// Builds a release from commit history
pub struct HistoryParser {
    grammar: Grammar,
    version: Option<String>,
    hook: Option<EntryHook>,
}

impl HistoryParser {
    /// Create a parser with the default grammar
    pub fn new() -> Self {
        Self {
            grammar: Grammar::default(),
            version: None,
            hook: None,
        }
    }

    /// Use a custom grammar
    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Label the release explicitly instead of [`UNRELEASED`].
    /// An explicit label also stamps the release with today's date.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Transform every entry before it is appended
    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(ChangeEntry, &Commit) -> ChangeEntry + Send + Sync + 'static,
    {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Parse an already collected window of commits
    #[instrument(skip(self, commits))]
    pub fn parse<'a, I>(&self, commits: I) -> ReleaseTree
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let mut release = match &self.version {
            Some(version) => Release::new(version.clone()).with_date(Local::now().date_naive()),
            None => Release::new(UNRELEASED),
        };

        let mut visited = 0usize;
        let mut matched = 0usize;
        for commit in commits {
            visited += 1;
            let message = commit.message();
            if !self.grammar.accepts(&message) {
                trace!(rev = %commit.rev, "skipping non-conventional commit");
                continue;
            }
            matched += 1;

            if let Some(header) = self.grammar.parse_header(&message) {
                self.append(&mut release, header, commit);
            }
            if let Some(footer) = self.grammar.parse_header(&commit.footer) {
                self.append(&mut release, footer, commit);
            }
        }

        info!(
            version = release.label(),
            visited,
            matched,
            entries = release.len(),
            "parsed commit history"
        );
        ReleaseTree::new(release)
    }

    /// Walk the window from `newest` back to `stop` and parse it
    pub fn parse_window<S>(
        &self,
        source: &S,
        newest: &str,
        stop: Option<&str>,
    ) -> relnotify_git::Result<ReleaseTree>
    where
        S: CommitSource + ?Sized,
    {
        let commits = walk_first_parent(source, newest, stop)?;
        Ok(self.parse(&commits))
    }

    fn append(&self, release: &mut Release, header: HeaderMatch, commit: &Commit) {
        let category = categorize(header.change_type.as_deref());
        let mut entry = ChangeEntry::new(header.scope, header.message).with_breaking(header.breaking);
        if let Some(hook) = &self.hook {
            entry = hook(entry, commit);
        }
        debug!(rev = %commit.short_rev(), %category, "appending entry");
        release.push(category, entry);
    }
}

impl Default for HistoryParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a captured type token to its bucket. A grammar without a type group
/// and unrecognized tokens both land in `Others`.
fn categorize(change_type: Option<&str>) -> Category {
    match change_type.map(classify) {
        Some(Ok(change_type)) => change_type.into(),
        Some(Err(err)) => {
            debug!(%err, "unrecognized change type");
            Category::Others
        }
        None => Category::Others,
    }
}
