//! Slack Web API client

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use relnotify_core::config::SlackConfig;

use crate::error::{NotifyError, Result};
use crate::types::SlackMessage;

/// `chat.postMessage` client
pub struct SlackClient {
    client: Client,
    api_url: String,
    token: String,
}

/// Slack wraps every response in an `ok` envelope
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

impl SlackClient {
    /// Create a client from configuration; the token is required
    pub fn new(config: &SlackConfig) -> Result<Self> {
        let token = config
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(NotifyError::MissingToken)?;

        Ok(Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            token,
        })
    }

    /// Post a message, returning the message timestamp when Slack reports one
    #[instrument(skip_all, fields(channel = ?message.channel))]
    pub async fn post(&self, message: &SlackMessage) -> Result<Option<String>> {
        if message.channel.is_none() {
            return Err(NotifyError::MissingChannel);
        }

        debug!("Slack API request: POST {}", self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(message)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NotifyError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: ApiResponse = response.json().await?;
        if !body.ok {
            return Err(NotifyError::Rejected(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        info!(blocks = message.blocks.len(), "Posted release notification");
        Ok(body.ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Block, Text};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn config(api_url: String) -> SlackConfig {
        SlackConfig {
            channel: Some("releases".to_string()),
            token: Some("xoxb-test".to_string()),
            api_url,
            ..Default::default()
        }
    }

    fn message() -> SlackMessage {
        SlackMessage {
            channel: Some("#releases".to_string()),
            text: "New Version Bumped Notification - billing".to_string(),
            icon_emoji: ":codecommit:".to_string(),
            username: "Amazon CodeCommit".to_string(),
            blocks: vec![Block::Section {
                text: Text::Mrkdwn {
                    text: "hello".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_missing_token() {
        let config = SlackConfig {
            token: None,
            ..Default::default()
        };
        assert!(matches!(
            SlackClient::new(&config),
            Err(NotifyError::MissingToken)
        ));
    }

    #[tokio::test]
    async fn test_post_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat.postMessage")
            .match_header("authorization", "Bearer xoxb-test")
            .match_body(Matcher::PartialJson(json!({
                "channel": "#releases",
                "username": "Amazon CodeCommit",
                "blocks": [{"type": "section", "text": {"type": "mrkdwn", "text": "hello"}}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "ts": "1700000000.000100"}"#)
            .create_async()
            .await;

        let client =
            SlackClient::new(&config(format!("{}/api/chat.postMessage", server.url()))).unwrap();
        let ts = client.post(&message()).await.unwrap();

        assert_eq!(ts.as_deref(), Some("1700000000.000100"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_rejected() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/chat.postMessage")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false, "error": "channel_not_found"}"#)
            .create_async()
            .await;

        let client =
            SlackClient::new(&config(format!("{}/api/chat.postMessage", server.url()))).unwrap();
        let err = client.post(&message()).await.unwrap_err();

        assert!(matches!(err, NotifyError::Rejected(ref e) if e == "channel_not_found"));
    }

    #[tokio::test]
    async fn test_post_http_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/chat.postMessage")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client =
            SlackClient::new(&config(format!("{}/api/chat.postMessage", server.url()))).unwrap();
        let err = client.post(&message()).await.unwrap_err();

        assert!(matches!(err, NotifyError::ApiError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_post_requires_channel() {
        let client = SlackClient::new(&config("http://127.0.0.1:9/".to_string())).unwrap();
        let mut msg = message();
        msg.channel = None;

        assert!(matches!(
            client.post(&msg).await,
            Err(NotifyError::MissingChannel)
        ));
    }
}
