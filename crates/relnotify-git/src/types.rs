//! Git types

use serde::{Deserialize, Serialize};

/// A commit as returned by a commit source, before message splitting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Revision id
    pub rev: String,
    /// Full raw commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Parent revision ids, first parent first
    pub parents: Vec<String>,
}

impl CommitRecord {
    /// Create a new record with no parents
    pub fn new(
        rev: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
    ) -> Self {
        Self {
            rev: rev.into(),
            message: message.into(),
            author: author.into(),
            author_email: author_email.into(),
            parents: Vec::new(),
        }
    }

    /// Set the parent revisions
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }
}

/// One historical change record, split into title, body and footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Revision id
    pub rev: String,
    /// First paragraph of the message
    pub title: String,
    /// Paragraphs between the title and the footer
    pub body: String,
    /// Last paragraph, only when the message has at least three paragraphs
    pub footer: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
}

impl Commit {
    /// Create a new Commit, trimming every field
    pub fn new(
        rev: &str,
        title: &str,
        body: &str,
        footer: &str,
        author: &str,
        author_email: &str,
    ) -> Self {
        Self {
            rev: rev.trim().to_string(),
            title: title.trim().to_string(),
            body: body.trim().to_string(),
            footer: footer.trim().to_string(),
            author: author.trim().to_string(),
            author_email: author_email.trim().to_string(),
        }
    }

    /// Split a raw message into title, body and footer.
    ///
    /// Paragraphs are separated by a blank line. The footer is only split
    /// off when there are at least three paragraphs.
    pub fn from_message(rev: &str, raw: &str, author: &str, author_email: &str) -> Self {
        let mut paragraphs = raw.split("\n\n");
        let title = paragraphs.next().unwrap_or_default();
        let mut rest: Vec<&str> = paragraphs.collect();

        let footer = if rest.len() >= 2 { rest.pop() } else { None };

        Self::new(
            rev,
            title,
            &rest.join("\n\n"),
            footer.unwrap_or_default(),
            author,
            author_email,
        )
    }

    /// Title and body joined by a blank line, trimmed. The footer is not included.
    pub fn message(&self) -> String {
        format!("{}\n\n{}", self.title, self.body).trim().to_string()
    }

    /// Short revision (first 7 characters)
    pub fn short_rev(&self) -> &str {
        let end = self
            .rev
            .char_indices()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(self.rev.len());
        &self.rev[..end]
    }
}

impl From<&CommitRecord> for Commit {
    fn from(record: &CommitRecord) -> Self {
        Commit::from_message(
            &record.rev,
            &record.message,
            &record.author,
            &record.author_email,
        )
    }
}

impl std::fmt::Display for Commit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.rev)
    }
}
