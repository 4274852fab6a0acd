//! Discord webhook client.

use std::time::Duration;

use async_trait::async_trait;
use hookcord_core::error::{ErrorCode, RelayError, RelayResult};
use hookcord_core::{DeliveryClient, WebhookMessage};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

const DISCORD_API_URL: &str = "https://discord.com/api/v10";

/// Where and how to execute the Discord webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// Webhook id (the numeric path segment of the webhook URL).
    pub webhook_id: String,
    /// Webhook token (the last path segment of the webhook URL).
    pub webhook_token: SecretString,
    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DISCORD_API_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

impl DiscordConfig {
    pub fn new(webhook_id: impl Into<String>, webhook_token: impl Into<String>) -> Self {
        Self {
            webhook_id: webhook_id.into(),
            webhook_token: SecretString::new(webhook_token.into()),
            api_base: default_api_base(),
            timeout_secs: default_timeout(),
        }
    }

    /// Builder: point at another API base (tests, proxies).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Create a config from environment variables.
    pub fn from_env() -> RelayResult<Self> {
        let webhook_id = std::env::var("DISCORD_WEBHOOK_ID")
            .map_err(|_| RelayError::missing("DISCORD_WEBHOOK_ID"))?;
        let webhook_token = std::env::var("DISCORD_WEBHOOK_TOKEN")
            .map_err(|_| RelayError::missing("DISCORD_WEBHOOK_TOKEN"))?;

        let mut config = Self::new(webhook_id, webhook_token);
        if let Ok(api_base) = std::env::var("DISCORD_API_BASE") {
            config.api_base = api_base;
        }
        if let Ok(timeout) = std::env::var("DISCORD_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .parse()
                .map_err(|_| RelayError::config("DISCORD_TIMEOUT_SECS must be a number"))?;
        }
        Ok(config)
    }
}

/// Executes a Discord webhook once per message.
pub struct DiscordWebhookClient {
    client: Client,
    config: DiscordConfig,
}

impl DiscordWebhookClient {
    /// Create a new client.
    pub fn new(config: DiscordConfig) -> RelayResult<Self> {
        if config.webhook_id.is_empty() || config.webhook_token.expose_secret().is_empty() {
            return Err(RelayError::config("Discord webhook id and token are required"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("hookcord/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> RelayResult<Self> {
        Self::new(DiscordConfig::from_env()?)
    }

    /// Execute URL for a message, `{base}/webhooks/{id}/{token}`.
    pub fn endpoint(&self, message: &WebhookMessage) -> RelayResult<Url> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| RelayError::config(format!("Invalid Discord API base: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| RelayError::config("Discord API base cannot hold a path"))?
            .pop_if_empty()
            .extend([
                "webhooks",
                self.config.webhook_id.as_str(),
                self.config.webhook_token.expose_secret().as_str(),
            ]);

        if message.with_components {
            url.query_pairs_mut().append_pair("with_components", "true");
        }

        Ok(url)
    }

    pub fn config(&self) -> &DiscordConfig {
        &self.config
    }
}

#[async_trait]
impl DeliveryClient for DiscordWebhookClient {
    async fn deliver(&self, message: &WebhookMessage) -> RelayResult<()> {
        let url = self.endpoint(message)?;

        let response = self
            .client
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                let code = if e.is_timeout() {
                    ErrorCode::NetTimeout
                } else {
                    ErrorCode::NetConnectionFailed
                };
                // without_url keeps the webhook token out of the message
                RelayError::network("Failed to execute Discord webhook", code, e.without_url())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                webhook_id = %self.config.webhook_id,
                status = %status.as_u16(),
                "Discord rejected webhook execution"
            );
            return Err(RelayError::from_http_status(status.as_u16(), &body));
        }

        tracing::debug!(webhook_id = %self.config.webhook_id, "Delivered message to Discord");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookcord_core::Component;

    #[test]
    fn test_endpoint_for_components() {
        let client = DiscordWebhookClient::new(DiscordConfig::new("123", "tok-en")).unwrap();
        let url = client
            .endpoint(&WebhookMessage::components(vec![Component::text("x")]))
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://discord.com/api/v10/webhooks/123/tok-en?with_components=true"
        );
    }

    #[test]
    fn test_endpoint_for_text_and_trailing_slash() {
        let config = DiscordConfig::new("123", "tok").with_api_base("http://localhost:9999/api/");
        let client = DiscordWebhookClient::new(config).unwrap();
        let url = client.endpoint(&WebhookMessage::text("Ping!")).unwrap();

        assert_eq!(url.as_str(), "http://localhost:9999/api/webhooks/123/tok");
    }

    #[test]
    fn test_missing_credentials() {
        assert!(DiscordWebhookClient::new(DiscordConfig::new("", "tok")).is_err());
        assert!(DiscordWebhookClient::new(DiscordConfig::new("123", "")).is_err());
    }

    #[test]
    fn test_debug_hides_token() {
        let config = DiscordConfig::new("123", "very-secret-token");
        assert!(!format!("{:?}", config).contains("very-secret-token"));
    }
}
