//! Regular grammars for commit messages and changelog lines
//!
//! Commit messages and rendered changelogs are matched by independent
//! pattern families. A rendered changelog is a lossy projection of the
//! history, so the two never share a parser.

use regex::Regex;
use std::sync::LazyLock;

use relnotify_core::config::ChangelogConfig;
use relnotify_core::error::ChangelogError;

/// Default header/footer grammar: `<type>[(<scope>)][!]: <message>`
pub const DEFAULT_COMMIT_PARSER: &str = r"^(?P<change_type>feat|fix|refactor|perf|BREAKING CHANGE)(?:\((?P<scope>[^()\r\n]*)\)|\()?(?P<breaking>!)?:\s(?P<message>.*)?";

/// Default pattern deciding whether a commit is considered at all
pub const DEFAULT_CHANGELOG_PATTERN: &str = r"^(BREAKING[\- ]CHANGE|feat|fix|refactor|perf)(\(.+\))?(!)?";

static DEFAULT_GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::new(DEFAULT_COMMIT_PARSER, DEFAULT_CHANGELOG_PATTERN)
        .expect("Invalid default grammar")
});

/// `MAJOR.MINOR.PATCH[-pre][+build]`
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<version>([0-9]+)\.([0-9]+)\.([0-9]+)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+[0-9A-Za-z-]+)?)",
    )
    .expect("Invalid regex")
});

/// Leading run of `#`
static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<title>#+)").expect("Invalid regex"));

/// `- [**<scope>**: ]<message>`
static BULLET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- (\*\*(?P<scope>.*)\*\*: )?(?P<message>.*)$").expect("Invalid regex")
});

/// Captures of a successful header/footer match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Raw change-type token, absent when the grammar has no type group
    pub change_type: Option<String>,
    /// Parenthesized scope
    pub scope: Option<String>,
    /// `!` marker present
    pub breaking: bool,
    /// Remainder of the line
    pub message: Option<String>,
}

/// A bullet line from a rendered changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bullet {
    pub scope: Option<String>,
    pub message: Option<String>,
}

/// Compiled commit-message grammar
#[derive(Debug, Clone)]
pub struct Grammar {
    header: Regex,
    acceptance: Regex,
}

impl Grammar {
    /// Compile a grammar from a header pattern and an acceptance pattern.
    ///
    /// The header pattern is compiled in multi-line mode. Recognized named
    /// groups are `change_type`, `scope`, `breaking` and `message`.
    pub fn new(commit_parser: &str, changelog_pattern: &str) -> Result<Self, ChangelogError> {
        let header = Regex::new(&format!("(?m){}", commit_parser)).map_err(|e| {
            ChangelogError::InvalidPattern {
                name: "commit_parser".to_string(),
                message: e.to_string(),
            }
        })?;
        let acceptance =
            Regex::new(changelog_pattern).map_err(|e| ChangelogError::InvalidPattern {
                name: "changelog_pattern".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { header, acceptance })
    }

    /// Build the grammar from configuration, falling back to the defaults
    /// for any pattern not overridden.
    pub fn from_config(config: &ChangelogConfig) -> Result<Self, ChangelogError> {
        if config.commit_parser.is_none() && config.changelog_pattern.is_none() {
            return Ok(Self::default());
        }
        Self::new(
            config.commit_parser.as_deref().unwrap_or(DEFAULT_COMMIT_PARSER),
            config
                .changelog_pattern
                .as_deref()
                .unwrap_or(DEFAULT_CHANGELOG_PATTERN),
        )
    }

    /// Whether a commit message is considered for the changelog.
    /// The match must start at the beginning of the text.
    pub fn accepts(&self, message: &str) -> bool {
        self.acceptance
            .find(message)
            .is_some_and(|m| m.start() == 0)
    }

    /// Match the header grammar at the start of `text`
    pub fn parse_header(&self, text: &str) -> Option<HeaderMatch> {
        let caps = self.header.captures(text)?;
        if caps.get(0)?.start() != 0 {
            return None;
        }

        let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        Some(HeaderMatch {
            change_type: group("change_type"),
            scope: group("scope"),
            breaking: caps.name("breaking").is_some(),
            message: group("message"),
        })
    }
}

impl Default for Grammar {
    fn default() -> Self {
        DEFAULT_GRAMMAR.clone()
    }
}

/// Extract the version literal from a heading line
pub fn parse_version(line: &str) -> Option<&str> {
    if !line.starts_with('#') {
        return None;
    }
    VERSION_REGEX
        .captures(line)
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str())
}

/// Length of the leading `#` run, if any
pub fn heading_level(line: &str) -> Option<usize> {
    HEADING_REGEX
        .captures(line)
        .and_then(|caps| caps.name("title"))
        .map(|m| m.as_str().len())
}

/// A section header has a `#` run of exactly three
pub fn is_section_header(line: &str) -> bool {
    heading_level(line) == Some(3)
}

/// Parse a `- [**scope**: ]message` bullet
pub fn parse_bullet(line: &str) -> Option<Bullet> {
    let caps = BULLET_REGEX.captures(line)?;
    Some(Bullet {
        scope: caps.name("scope").map(|m| m.as_str().to_string()),
        message: caps.name("message").map(|m| m.as_str().to_string()),
    })
}
