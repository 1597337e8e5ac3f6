//! Changelog document lookup

use std::path::Path;

use git2::DiffOptions;
use tracing::{debug, info, instrument};

use crate::repository::{GitRepo, Result};
use relnotify_core::error::GitError;

/// Supplies the text of a committed changelog document
pub trait ChangelogSource {
    /// Return the changelog content at `newest` if `path` changed since
    /// `last`. `Ok(None)` means no matching blob, which is not an error.
    fn changelog_content(&self, path: &Path, newest: &str, last: Option<&str>)
        -> Result<Option<String>>;
}

impl ChangelogSource for GitRepo {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn changelog_content(
        &self,
        path: &Path,
        newest: &str,
        last: Option<&str>,
    ) -> Result<Option<String>> {
        let new_tree = self.find_commit(newest)?.tree()?;
        let old_tree = match last {
            Some(rev) => Some(self.find_commit(rev)?.tree()?),
            None => None,
        };

        let mut opts = DiffOptions::new();
        opts.pathspec(path);
        let diff = self
            .repo
            .diff_tree_to_tree(old_tree.as_ref(), Some(&new_tree), Some(&mut opts))?;

        for delta in diff.deltas() {
            // Prefer the newest side; a deleted file only has the old one
            let file = if delta.new_file().id().is_zero() {
                delta.old_file()
            } else {
                delta.new_file()
            };
            if file.path() != Some(path) {
                continue;
            }

            let blob = self.repo.find_blob(file.id())?;
            let content = std::str::from_utf8(blob.content())
                .map_err(|_| GitError::InvalidBlob(file.id().to_string()))?;
            info!(blob = %file.id(), bytes = content.len(), "found changelog blob");
            return Ok(Some(content.to_string()));
        }

        debug!("changelog unchanged in window");
        Ok(None)
    }
}
