//! hookcord-discord - Discord webhook delivery for hookcord.
//!
//! Executes a Discord webhook with the messages rendered by `hookcord-core`.
//!
//! # Example
//!
//! ```ignore
//! use hookcord_core::{DeliveryClient, WebhookMessage};
//! use hookcord_discord::{DiscordConfig, DiscordWebhookClient};
//!
//! let client = DiscordWebhookClient::new(DiscordConfig::new("1234567890", "webhook-token"))?;
//! client.deliver(&WebhookMessage::text("Ping!")).await?;
//! ```

mod client;

pub use client::{DiscordConfig, DiscordWebhookClient};
