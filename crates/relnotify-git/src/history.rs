//! Commit history traversal

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument, warn};

use crate::repository::{GitRepo, Result};
use crate::types::{Commit, CommitRecord};
use relnotify_core::error::GitError;

/// Supplies commits by revision id
pub trait CommitSource {
    /// Fetch a single commit with its parent linkage
    fn fetch_commit(&self, rev: &str) -> Result<CommitRecord>;
}

impl CommitSource for GitRepo {
    fn fetch_commit(&self, rev: &str) -> Result<CommitRecord> {
        let commit = self.find_commit(rev)?;
        let author = commit.author();

        Ok(CommitRecord {
            rev: commit.id().to_string(),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            author: author.name().unwrap_or("Unknown").to_string(),
            author_email: author.email().unwrap_or("unknown@example.com").to_string(),
            parents: commit.parent_ids().map(|id| id.to_string()).collect(),
        })
    }
}

impl CommitSource for HashMap<String, CommitRecord> {
    fn fetch_commit(&self, rev: &str) -> Result<CommitRecord> {
        self.get(rev)
            .cloned()
            .ok_or_else(|| GitError::UnknownRevision(rev.to_string()))
    }
}

/// Walk first-parent linkage from `newest` back to `stop`.
///
/// Returns commits newest first, excluding `stop` itself. The walk ends at
/// the root commit when `stop` is never reached, and never visits a
/// revision twice.
#[instrument(skip(source))]
pub fn walk_first_parent<S>(source: &S, newest: &str, stop: Option<&str>) -> Result<Vec<Commit>>
where
    S: CommitSource + ?Sized,
{
    let mut commits = Vec::new();
    let mut seen = HashSet::new();
    let mut current = newest.to_string();

    while stop != Some(current.as_str()) {
        if !seen.insert(current.clone()) {
            warn!(rev = %current, "revision visited twice, stopping walk");
            break;
        }

        let record = source.fetch_commit(&current)?;
        commits.push(Commit::from(&record));

        match record.parents.into_iter().next() {
            Some(parent) => current = parent,
            None => {
                debug!(rev = %record.rev, "reached root commit");
                break;
            }
        }
    }

    debug!(count = commits.len(), "commit walk finished");
    Ok(commits)
}
