//! Slack Web API client.
//!
//! Read-only consumer of `conversations.list` and `conversations.history`,
//! authenticated with a bearer user token.

use crate::config::SlackConfig;
use anyhow::{anyhow, Result};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;

/// Slack client for the two conversation endpoints the poller needs.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    config: SlackConfig,
}

/// A channel entry from `conversations.list`. IM channels usually carry no
/// name.
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_im: bool,
}

/// A message from `conversations.history`. Attachment-only messages have no
/// text.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConversationsListResponse {
    ok: bool,
    #[serde(default)]
    channels: Vec<Conversation>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConversationsHistoryResponse {
    ok: bool,
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    error: Option<String>,
}

impl SlackClient {
    /// Create a new Slack client.
    pub fn new(config: SlackConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Check if a user token is set.
    pub fn is_configured(&self) -> bool {
        !self.config.user_token.expose_secret().is_empty()
    }

    /// Fetch the full conversation list visible to the token.
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        let url = format!("{}/conversations.list", self.config.api_base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.config.user_token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, "Slack conversations.list response");

        if !status.is_success() {
            return Err(anyhow!("Slack conversations.list failed: {}", body));
        }

        let parsed: ConversationsListResponse = serde_json::from_str(&body)?;
        if !parsed.ok {
            return Err(anyhow!(
                "Slack conversations.list error: {}",
                parsed.error.unwrap_or_else(|| "unknown_error".to_string())
            ));
        }

        Ok(parsed.channels)
    }

    /// Fetch up to `limit` most recent messages of a conversation.
    pub async fn conversation_history(&self, channel: &str, limit: u32) -> Result<Vec<Message>> {
        let url = format!("{}/conversations.history", self.config.api_base_url);
        let limit = limit.to_string();

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.config.user_token.expose_secret())
            .query(&[("channel", channel), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, channel = %channel, "Slack conversations.history response");

        if !status.is_success() {
            return Err(anyhow!("Slack conversations.history failed: {}", body));
        }

        let parsed: ConversationsHistoryResponse = serde_json::from_str(&body)?;
        if !parsed.ok {
            return Err(anyhow!(
                "Slack conversations.history error: {}",
                parsed.error.unwrap_or_else(|| "unknown_error".to_string())
            ));
        }

        Ok(parsed.messages)
    }
}
