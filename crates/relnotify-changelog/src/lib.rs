//! relnotify Changelog - release tree extraction
//!
//! This crate turns either a window of conventional commits or an already
//! rendered markdown changelog into a single categorized [`Release`].

pub mod classifier;
pub mod collect;
pub mod document;
pub mod grammar;
pub mod history;
pub mod types;

pub use classifier::{classify, Category, ChangeType};
pub use collect::{Collected, ReleaseCollector, TreeOrigin};
pub use document::{DocumentParser, DocumentScanner, ScanState};
pub use grammar::{Grammar, HeaderMatch};
pub use history::{attribute_author, HistoryParser};
pub use types::{ChangeEntry, Release, ReleaseTree, UNRELEASED};
