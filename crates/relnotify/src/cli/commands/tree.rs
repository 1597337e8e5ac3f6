//! Tree command

use clap::{Args, ValueEnum};
use console::style;
use serde::Serialize;
use tracing::info;

use relnotify_changelog::{Release, ReleaseCollector, TreeOrigin};
use relnotify_core::config::{resolve_config, CategoryConfig};
use relnotify_git::GitRepo;

use super::WindowArgs;
use crate::cli::{output, Cli, OutputFormat};

/// Which parser produces the tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Changelog document, falling back to commits
    #[default]
    Auto,
    /// Changelog document only
    Changelog,
    /// Commit history only
    Commits,
}

/// Show the release tree for a commit window
#[derive(Debug, Args)]
pub struct TreeCommand {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Source to parse
    #[arg(long, value_enum, default_value = "auto")]
    pub source: SourceArg,

    /// Version label for commit-derived releases
    #[arg(long = "for-version", value_name = "VERSION")]
    pub for_version: Option<String>,
}

#[derive(Debug, Serialize)]
struct TreeOutput {
    origin: TreeOrigin,
    releases: Vec<Release>,
}

impl TreeCommand {
    /// Execute the tree command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(source = ?self.source, for_version = ?self.for_version, "executing tree command");
        let cwd = std::env::current_dir()?;
        let (mut config, _) = resolve_config(&cwd)?;
        if let Some(version) = &self.for_version {
            config.changelog.unreleased_version = Some(version.clone());
        }

        let repo = GitRepo::discover(&cwd)?;
        let window = self.window.resolve(&repo)?;
        let last = window.last.as_deref();

        let collector = ReleaseCollector::new(&config.changelog)?;
        let (tree, origin) = match self.source {
            SourceArg::Auto => {
                let collected = collector.collect(&repo, &window.newest, last)?;
                (collected.tree, collected.origin)
            }
            SourceArg::Changelog => (
                collector.changelog_tree(&repo, &window.newest, last)?,
                TreeOrigin::Changelog,
            ),
            SourceArg::Commits => (
                collector.commit_tree(&repo, &window.newest, last)?,
                TreeOrigin::Commits,
            ),
        };

        let releases: Vec<Release> = tree.collect();

        match cli.format {
            OutputFormat::Json => {
                let out = TreeOutput { origin, releases };
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                if releases.iter().all(Release::is_empty) {
                    if !cli.quiet {
                        println!("{}", style("No changes found in window.").yellow());
                    }
                    return Ok(());
                }
                if cli.verbose {
                    println!("{}", output::key_value("Source", &format!("{:?}", origin)));
                    println!();
                }
                for release in &releases {
                    print!("{}", format_release(release, &config.categories));
                }
            }
        }

        Ok(())
    }
}

/// Plain-text rendering of one release
fn format_release(release: &Release, names: &CategoryConfig) -> String {
    let mut out = String::new();

    let title = match release.date {
        Some(date) => format!("{} ({})", release.label(), date),
        None => release.label().to_string(),
    };
    out.push_str(&output::header(&title));
    out.push('\n');

    for (category, entries) in release.sections() {
        out.push('\n');
        out.push_str(&format!("{}\n", category.display_name(names)));
        for entry in entries.iter().filter(|e| !e.is_blank()) {
            let message = entry.message.as_deref().unwrap_or("");
            let line = match entry.scope.as_deref() {
                Some(scope) if !scope.is_empty() => format!("  - {}: {}", scope, message),
                _ => format!("  - {}", message),
            };
            out.push_str(&line);
            if entry.breaking {
                out.push_str(" [breaking]");
            }
            if let Some(author) = &entry.author {
                out.push_str(&format!(" ({})", author));
            }
            out.push('\n');
        }
    }

    out
}
