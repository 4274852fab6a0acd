//! hookcord-core - Core library for hookcord.
//!
//! This crate verifies GitHub webhook deliveries, decides which of them are
//! worth relaying, and renders them as Discord component messages. It holds no
//! HTTP server or client; the delivery side is reached through the
//! [`DeliveryClient`] trait.
//!
//! # Example
//!
//! ```ignore
//! use hookcord_core::{dispatch, InboundRequest, RelayConfig};
//!
//! let config = RelayConfig::new("webhook-secret");
//! let request = InboundRequest::new("POST", body)
//!     .with_header("X-GitHub-Event", "push")
//!     .with_header("X-Hub-Signature-256", signature);
//!
//! let outcome = dispatch(&request, &config, &discord_client).await?;
//! assert_eq!(outcome.status_code(), 204);
//! ```

pub mod config;
pub mod delivery;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod format;
pub mod message;
pub mod signature;

// Re-export commonly used types
pub use config::RelayConfig;
pub use delivery::DeliveryClient;
pub use dispatch::{dispatch, InboundRequest, Outcome, Rejection};
pub use error::{ErrorCode, RelayError, RelayResult};
pub use events::{Disposition, EventKind, GitHubEvent, SuppressReason};
pub use message::{Component, WebhookMessage};
pub use signature::{verify_signature, SignatureError};
