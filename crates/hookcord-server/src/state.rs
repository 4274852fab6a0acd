//! Server state management.

use std::sync::Arc;

use hookcord_core::error::RelayResult;
use hookcord_core::{DeliveryClient, RelayConfig};
use hookcord_discord::DiscordWebhookClient;

use crate::config::AppConfig;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub delivery: Arc<dyn DeliveryClient>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: RelayConfig, delivery: impl DeliveryClient + 'static) -> Self {
        Self {
            config: Arc::new(config),
            delivery: Arc::new(delivery),
        }
    }

    /// Build the state with a Discord client for the configured webhook.
    pub fn from_config(config: &AppConfig) -> RelayResult<Self> {
        let delivery = DiscordWebhookClient::new(config.discord.clone())?;
        Ok(Self::new(config.relay.clone(), delivery))
    }
}
