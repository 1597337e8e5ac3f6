//! Release tree types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classifier::Category;

/// Version label for the commit window when no explicit version is given
pub const UNRELEASED: &str = "Unreleased";

/// One categorized line item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    /// Scope, if the source had one
    pub scope: Option<String>,
    /// Message text
    pub message: Option<String>,
    /// Breaking marker (`!`) was present
    pub breaking: bool,
    /// Attribution injected by an entry hook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ChangeEntry {
    /// Create a new entry
    pub fn new(scope: Option<String>, message: Option<String>) -> Self {
        Self {
            scope,
            message,
            ..Default::default()
        }
    }

    /// Set the breaking marker
    pub fn with_breaking(mut self, breaking: bool) -> Self {
        self.breaking = breaking;
        self
    }

    /// Entries with neither scope nor message render as nothing
    pub fn is_blank(&self) -> bool {
        self.scope.as_deref().map_or(true, str::is_empty)
            && self.message.as_deref().map_or(true, str::is_empty)
    }
}

/// One versioned (or unreleased) grouping of changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// `v<semver>`, [`UNRELEASED`], or an explicit label
    pub version: Option<String>,
    /// Release date
    pub date: Option<NaiveDate>,
    /// Entries per category, each in parse order
    pub changes: BTreeMap<Category, Vec<ChangeEntry>>,
}

impl Release {
    /// Create an empty release with a version label
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Default::default()
        }
    }

    /// Set the date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Append an entry under a category
    pub fn push(&mut self, category: Category, entry: ChangeEntry) {
        self.changes.entry(category).or_default().push(entry);
    }

    /// Entries for a category, in parse order
    pub fn entries(&self, category: Category) -> &[ChangeEntry] {
        self.changes
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Non-empty categories in render order
    pub fn sections(&self) -> impl Iterator<Item = (Category, &[ChangeEntry])> {
        self.changes
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(category, entries)| (*category, entries.as_slice()))
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.changes.values().map(Vec::len).sum()
    }

    /// Check if every category is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Version label for display
    pub fn label(&self) -> &str {
        self.version.as_deref().unwrap_or(UNRELEASED)
    }
}

/// Single-pass sequence of releases produced by a parser.
///
/// Holds at most one release and yields it exactly once.
#[derive(Debug, Clone, Default)]
pub struct ReleaseTree {
    release: Option<Release>,
}

impl ReleaseTree {
    /// Tree holding one release
    pub fn new(release: Release) -> Self {
        Self {
            release: Some(release),
        }
    }

    /// Tree with nothing to render
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Inspect the pending release without consuming it
    pub fn peek(&self) -> Option<&Release> {
        self.release.as_ref()
    }

    /// True when a pending release holds at least one entry
    pub fn has_changes(&self) -> bool {
        self.release.as_ref().is_some_and(|r| !r.is_empty())
    }
}

impl Iterator for ReleaseTree {
    type Item = Release;

    fn next(&mut self) -> Option<Release> {
        self.release.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.release.is_some());
        (n, Some(n))
    }
}

impl ExactSizeIterator for ReleaseTree {}
