//! CLI commands

mod init;
mod notify;
mod tree;

pub use init::InitCommand;
pub use notify::NotifyCommand;
pub use tree::{SourceArg, TreeCommand};

use clap::Args;
use tracing::warn;

use relnotify_core::error::GitError;
use relnotify_git::GitRepo;

/// Commit window shared by commands that read history
#[derive(Debug, Clone, Args)]
pub struct WindowArgs {
    /// Last revision already announced (exclusive); walk to the root when omitted
    #[arg(long, value_name = "REV")]
    pub from: Option<String>,

    /// Newest revision in the window
    #[arg(long, value_name = "REV", default_value = "HEAD")]
    pub to: String,
}

/// A window resolved to full commit ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub newest: String,
    pub last: Option<String>,
}

impl WindowArgs {
    /// Resolve both ends against the repository
    pub fn resolve(&self, repo: &GitRepo) -> anyhow::Result<ResolvedWindow> {
        let newest = repo.resolve_revision(&self.to)?;
        let last = self
            .from
            .as_deref()
            .map(|rev| resolve_boundary(repo, rev))
            .transpose()?;
        Ok(ResolvedWindow { newest, last })
    }
}

/// Resolve the last announced revision. A boundary missing from the local
/// history (force-push, shallow clone) is kept as given so the walk runs
/// to the root commit.
pub fn resolve_boundary(repo: &GitRepo, rev: &str) -> anyhow::Result<String> {
    match repo.resolve_revision(rev) {
        Ok(id) => Ok(id),
        Err(GitError::UnknownRevision(_)) => {
            warn!(rev, "boundary revision not found, walking to the root commit");
            Ok(rev.to_string())
        }
        Err(err) => Err(err.into()),
    }
}
