//! Changelog-document parser
//!
//! Reconstructs the most recent release from a rendered markdown changelog.
//! Scanning is a small state machine over trimmed, lower-cased lines:
//! it stops at an unreleased heading or at the second version heading, so
//! only one completed release is ever read.

use tracing::{debug, info, instrument, trace};

use crate::classifier::{classify, Category};
use crate::grammar::{heading_level, is_section_header, parse_bullet, parse_version};
use crate::types::{ChangeEntry, Release, ReleaseTree};

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No section header seen yet
    Scanning,
    /// Bullets are filed under this category
    InSection(Category),
    /// Terminal; further lines are ignored
    Done,
}

/// Line-by-line scanner building one release
#[derive(Debug, Clone)]
pub struct DocumentScanner {
    state: ScanState,
    release: Release,
}

impl DocumentScanner {
    /// Create a scanner in the `Scanning` state
    pub fn new() -> Self {
        Self {
            state: ScanState::Scanning,
            release: Release::default(),
        }
    }

    /// Current state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Consume one raw line and return the resulting state
    pub fn feed(&mut self, raw: &str) -> ScanState {
        if self.state == ScanState::Done {
            return self.state;
        }

        let line = raw.trim().to_lowercase();

        if line.contains("unreleased") && heading_level(&line).is_some() {
            debug!("unreleased heading, stopping");
            self.state = ScanState::Done;
            return self.state;
        }

        if let Some(version) = parse_version(&line) {
            if self.release.version.is_some() {
                debug!(version, "previous release boundary, stopping");
                self.state = ScanState::Done;
            } else {
                debug!(version, "release boundary");
                self.release.version = Some(format!("v{}", version));
            }
            return self.state;
        }

        if line.is_empty() {
            return self.state;
        }

        if is_section_header(&line) {
            match classify(&line) {
                Ok(change_type) => {
                    let category = Category::from(change_type);
                    trace!(%category, "entering section");
                    self.state = ScanState::InSection(category);
                    return self.state;
                }
                // Not a known section; fall through and treat as a plain line
                Err(err) => trace!(%err, "unclassified section header"),
            }
        }

        if let Some(bullet) = parse_bullet(&line) {
            match self.state {
                ScanState::InSection(category) => {
                    self.release
                        .push(category, ChangeEntry::new(bullet.scope, bullet.message));
                }
                _ => trace!("bullet outside of a section"),
            }
        }

        self.state
    }

    /// Finish scanning and return the release
    pub fn finish(self) -> Release {
        self.release
    }
}

impl Default for DocumentScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses rendered changelog documents
#[derive(Debug, Clone, Default)]
pub struct DocumentParser;

impl DocumentParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse document content into a single-release tree
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub fn parse(&self, content: &str) -> ReleaseTree {
        let mut scanner = DocumentScanner::new();
        for line in content.split('\n') {
            if scanner.feed(line) == ScanState::Done {
                break;
            }
        }

        let release = scanner.finish();
        info!(
            version = release.version.as_deref().unwrap_or(""),
            entries = release.len(),
            "parsed changelog document"
        );
        ReleaseTree::new(release)
    }
}
