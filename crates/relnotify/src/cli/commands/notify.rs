//! Notify command

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use relnotify_changelog::{ReleaseCollector, TreeOrigin};
use relnotify_core::config::{resolve_config, Config};
use relnotify_git::GitRepo;
use relnotify_slack::{render_message, ReleaseLink, RenderParams, SlackClient};

use super::{resolve_boundary, ResolvedWindow, WindowArgs};
use crate::cli::{output, Cli, OutputFormat};

/// Render the release tree and post it to Slack
#[derive(Debug, Args)]
pub struct NotifyCommand {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Reference-update event JSON; its ids override --from/--to
    #[arg(long, value_name = "FILE")]
    pub event: Option<PathBuf>,

    /// Print the Slack payload instead of posting it
    #[arg(long)]
    pub dry_run: bool,
}

/// Repository reference-update event
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub detail: PushDetail,
}

/// Event detail naming the updated reference and commit window
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushDetail {
    pub reference_full_name: Option<String>,
    pub repository_name: Option<String>,
    pub commit_id: String,
    #[serde(default)]
    pub old_commit_id: Option<String>,
}

impl PushEvent {
    /// Read an event from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event {}", path.display()))?;
        let event = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse event {}", path.display()))?;
        Ok(event)
    }
}

#[derive(Debug, Serialize)]
struct NotifyOutput {
    posted: bool,
    origin: Option<TreeOrigin>,
    blocks: usize,
    ts: Option<String>,
}

impl NotifyCommand {
    /// Execute the notify command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(event = ?self.event, dry_run = self.dry_run, "executing notify command");
        let cwd = std::env::current_dir()?;
        let (config, _) = resolve_config(&cwd)?;
        let event = self.event.as_deref().map(PushEvent::load).transpose()?;

        let repo = GitRepo::discover(&cwd)?;
        let window = match &event {
            Some(event) => ResolvedWindow {
                newest: repo.resolve_revision(&event.detail.commit_id)?,
                last: event
                    .detail
                    .old_commit_id
                    .as_deref()
                    .map(|rev| resolve_boundary(&repo, rev))
                    .transpose()?,
            },
            None => self.window.resolve(&repo)?,
        };

        let collector = ReleaseCollector::new(&config.changelog)?;
        let collected = collector.collect(&repo, &window.newest, window.last.as_deref())?;

        if !collected.tree.has_changes() {
            info!("nothing to announce");
            self.report(cli, None, 0, None)?;
            return Ok(());
        }

        let params = render_params(&config, &repo, event.as_ref(), &window, collected.origin)?;
        let message = render_message(
            collected.tree,
            &params,
            &config.categories,
            &config.slack,
        )?;

        if self.dry_run {
            println!("{}", serde_json::to_string_pretty(&message)?);
            return Ok(());
        }

        let client = SlackClient::new(&config.slack)?;
        let runtime = tokio::runtime::Runtime::new()?;
        let ts = runtime.block_on(client.post(&message))?;

        self.report(cli, Some(collected.origin), message.blocks.len(), ts)
    }

    fn report(
        &self,
        cli: &Cli,
        origin: Option<TreeOrigin>,
        blocks: usize,
        ts: Option<String>,
    ) -> anyhow::Result<()> {
        let posted = origin.is_some();
        match cli.format {
            OutputFormat::Json => {
                let out = NotifyOutput {
                    posted,
                    origin,
                    blocks,
                    ts,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text if cli.quiet => {}
            OutputFormat::Text => {
                if posted {
                    output::success(&format!("Posted release notification ({} blocks)", blocks));
                } else {
                    output::info("No changes to announce");
                }
            }
        }
        Ok(())
    }
}

/// Presentation parameters, preferring event fields over configuration
fn render_params(
    config: &Config,
    repo: &GitRepo,
    event: Option<&PushEvent>,
    window: &ResolvedWindow,
    origin: TreeOrigin,
) -> anyhow::Result<RenderParams> {
    let repository = event
        .and_then(|e| e.detail.repository_name.clone())
        .or_else(|| config.repository.name.clone())
        .or_else(|| repo.name())
        .context("repository name is not configured")?;

    let account_id = event
        .and_then(|e| e.account.clone())
        .or_else(|| config.repository.account_id.clone())
        .unwrap_or_default();

    let region = event
        .and_then(|e| e.region.clone())
        .or_else(|| config.repository.region.clone())
        .unwrap_or_else(|| {
            warn!("region is not configured");
            String::new()
        });

    let link = match (origin, &config.changelog.path) {
        (TreeOrigin::Changelog, Some(path)) => {
            let reference = match event.and_then(|e| e.detail.reference_full_name.clone()) {
                Some(reference) => reference,
                None => match config.repository.reference.clone() {
                    Some(reference) => reference,
                    None => repo
                        .head_reference_name()?
                        .unwrap_or_else(|| window.newest.clone()),
                },
            };
            ReleaseLink::Changelog {
                reference,
                path: path.to_string_lossy().into_owned(),
            }
        }
        _ => compare_link(window),
    };

    Ok(RenderParams {
        repository,
        account_id,
        region,
        console_url: config.repository.console_url.clone(),
        link,
    })
}

/// Compare link for a commit window; a window reaching the root compares
/// the newest commit with itself
fn compare_link(window: &ResolvedWindow) -> ReleaseLink {
    ReleaseLink::Compare {
        old: window.last.clone().unwrap_or_else(|| window.newest.clone()),
        new: window.newest.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EVENT: &str = r#"{
        "account": "123456789012",
        "region": "eu-west-1",
        "detail-type": "CodeCommit Repository State Change",
        "detail": {
            "event": "referenceUpdated",
            "referenceFullName": "refs/heads/main",
            "repositoryName": "billing",
            "commitId": "bbbb",
            "oldCommitId": "aaaa"
        }
    }"#;

    #[test]
    fn test_event_parses() {
        let event: PushEvent = serde_json::from_str(EVENT).unwrap();
        assert_eq!(event.account.as_deref(), Some("123456789012"));
        assert_eq!(event.region.as_deref(), Some("eu-west-1"));
        assert_eq!(event.detail.reference_full_name.as_deref(), Some("refs/heads/main"));
        assert_eq!(event.detail.repository_name.as_deref(), Some("billing"));
        assert_eq!(event.detail.commit_id, "bbbb");
        assert_eq!(event.detail.old_commit_id.as_deref(), Some("aaaa"));
    }

    #[test]
    fn test_event_without_old_commit() {
        let event: PushEvent =
            serde_json::from_str(r#"{"detail": {"commitId": "bbbb"}}"#).unwrap();
        assert!(event.detail.old_commit_id.is_none());
        assert!(event.account.is_none());
    }

    #[test]
    fn test_event_load_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(PushEvent::load(&temp.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_compare_link() {
        let window = ResolvedWindow {
            newest: "bbbb".to_string(),
            last: Some("aaaa".to_string()),
        };
        assert_eq!(
            compare_link(&window),
            ReleaseLink::Compare {
                old: "aaaa".to_string(),
                new: "bbbb".to_string()
            }
        );

        let root = ResolvedWindow {
            newest: "bbbb".to_string(),
            last: None,
        };
        assert_eq!(
            compare_link(&root),
            ReleaseLink::Compare {
                old: "bbbb".to_string(),
                new: "bbbb".to_string()
            }
        );
    }

    #[test]
    fn test_render_params_prefer_event() {
        let temp = TempDir::new().unwrap();
        git2::Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();

        let mut config = Config::default();
        config.repository.name = Some("configured".to_string());
        config.repository.region = Some("us-east-1".to_string());
        config.changelog.path = Some(PathBuf::from("CHANGELOG.md"));

        let event: PushEvent = serde_json::from_str(EVENT).unwrap();
        let window = ResolvedWindow {
            newest: "bbbb".to_string(),
            last: Some("aaaa".to_string()),
        };

        let params =
            render_params(&config, &repo, Some(&event), &window, TreeOrigin::Changelog).unwrap();
        assert_eq!(params.repository, "billing");
        assert_eq!(params.region, "eu-west-1");
        assert_eq!(params.account_id, "123456789012");
        assert_eq!(
            params.link,
            ReleaseLink::Changelog {
                reference: "refs/heads/main".to_string(),
                path: "CHANGELOG.md".to_string()
            }
        );

        let params = render_params(&config, &repo, None, &window, TreeOrigin::Commits).unwrap();
        assert_eq!(params.repository, "configured");
        assert_eq!(params.region, "us-east-1");
        assert!(matches!(params.link, ReleaseLink::Compare { .. }));
    }
}
