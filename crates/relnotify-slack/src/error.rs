//! Notification error types

use thiserror::Error;

/// Result type for notification operations
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Slack rendering and delivery errors
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Bot token not configured
    #[error("Slack token is not configured (set SLACK_TOKEN)")]
    MissingToken,

    /// Channel not configured
    #[error("Slack channel is not configured (set CHANNEL_NAME)")]
    MissingChannel,

    /// A link could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP-level failure
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Slack accepted the request but reported a failure
    #[error("Slack rejected the message: {0}")]
    Rejected(String),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
