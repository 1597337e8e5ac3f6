//! relnotify Git - commit and changelog sources
//!
//! This crate provides the commit model consumed by the changelog parsers,
//! the collaborator traits that supply commits and changelog documents, and
//! a `git2`-backed repository implementing both.

mod blob;
mod history;
mod repository;
pub mod types;

pub use blob::ChangelogSource;
pub use history::{walk_first_parent, CommitSource};
pub use repository::{GitRepo, Result};
pub use types::{Commit, CommitRecord};
