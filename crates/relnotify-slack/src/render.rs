//! Release tree to Slack blocks

use tracing::{debug, instrument};
use url::Url;

use relnotify_changelog::{ChangeEntry, Release};
use relnotify_core::config::{CategoryConfig, SlackConfig};

use crate::error::Result;
use crate::types::{Block, SlackMessage, Text};

/// Slack rejects messages with more blocks than this
const MAX_BLOCKS: usize = 50;

/// Section text limit, leaving room for the ellipsis
const MAX_SECTION_CHARS: usize = 3001 - 4;

/// Where the "release notes" link points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseLink {
    /// Browse the changelog document at a reference
    Changelog { reference: String, path: String },
    /// Compare two revisions
    Compare { old: String, new: String },
}

/// Presentation parameters for one notification
#[derive(Debug, Clone)]
pub struct RenderParams {
    pub repository: String,
    pub account_id: String,
    pub region: String,
    /// Console URL template containing `{repository}`
    pub console_url: String,
    pub link: ReleaseLink,
}

impl RenderParams {
    /// Link to the release notes for this notification
    pub fn release_url(&self) -> Result<Url> {
        let base = self.console_url.replace("{repository}", &self.repository);
        let base = if base.ends_with('/') {
            base
        } else {
            format!("{}/", base)
        };

        let relative = match &self.link {
            ReleaseLink::Changelog { reference, path } => {
                format!("browse/{}/--/{}", reference, path)
            }
            ReleaseLink::Compare { old, new } => format!("compare/{}/.../{}", old, new),
        };

        let mut url = Url::parse(&base)?.join(&relative)?;
        url.query_pairs_mut().append_pair("region", &self.region);
        Ok(url)
    }
}

/// Render releases into a `chat.postMessage` payload.
///
/// Bullets under each category are sorted alphabetically; this ordering is
/// a presentation step and does not change the parsed release.
#[instrument(skip_all, fields(repository = %params.repository))]
pub fn render_message<I>(
    releases: I,
    params: &RenderParams,
    names: &CategoryConfig,
    slack: &SlackConfig,
) -> Result<SlackMessage>
where
    I: IntoIterator<Item = Release>,
{
    let mut blocks = Vec::new();

    for release in releases {
        blocks.push(header(format!(
            "New Version Bumped Notification - {} | {} | Account: {}",
            params.repository, params.region, params.account_id
        )));

        let url = params.release_url()?;
        blocks.push(section(format!(
            "<{}| {} release notes>",
            url,
            release.label()
        )));
        blocks.push(Block::Divider);

        for (category, entries) in release.sections() {
            let mut bullets: Vec<String> = entries.iter().filter_map(bullet_line).collect();
            if bullets.is_empty() {
                continue;
            }
            bullets.sort();

            let mut lines = Vec::with_capacity(bullets.len() + 1);
            lines.push(format!(
                "{} *{}*",
                category.icon(),
                category.display_name(names)
            ));
            lines.extend(bullets);

            blocks.push(section(lines.join("\n")));
            blocks.push(Block::Divider);
        }
    }

    blocks.pop();
    if blocks.len() > MAX_BLOCKS {
        debug!(count = blocks.len(), "truncating blocks");
        blocks.truncate(MAX_BLOCKS - 1);
    }

    debug!(blocks = blocks.len(), "message rendered");
    Ok(SlackMessage {
        channel: slack.channel_ref(),
        text: format!("New Version Bumped Notification - {}", params.repository),
        icon_emoji: slack.icon_emoji.clone(),
        username: slack.username.clone(),
        blocks,
    })
}

fn bullet_line(entry: &ChangeEntry) -> Option<String> {
    let message = entry.message.as_deref().unwrap_or("");
    let mut line = match entry.scope.as_deref() {
        Some(scope) if !scope.is_empty() => format!("• *{}*: {}", scope, message),
        _ if !message.is_empty() => format!("• {}", message),
        _ => return None,
    };
    if let Some(author) = &entry.author {
        line.push_str(&format!(" ({})", author));
    }
    Some(line)
}

fn header(text: String) -> Block {
    Block::Header {
        text: Text::PlainText { text, emoji: true },
    }
}

fn section(text: String) -> Block {
    let text = if text.chars().count() >= MAX_SECTION_CHARS {
        let mut truncated: String = text.chars().take(MAX_SECTION_CHARS).collect();
        truncated.push_str("...");
        truncated
    } else {
        text
    };
    Block::Section {
        text: Text::Mrkdwn { text },
    }
}
