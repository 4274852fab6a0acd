//! Delivery client trait.

use async_trait::async_trait;

use crate::error::RelayResult;
use crate::message::WebhookMessage;

/// Sends a built message to the destination channel.
///
/// Implementations make exactly one attempt per call and report failure as
/// an error; retrying is left to whoever sent the original event.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Deliver one message.
    async fn deliver(&self, message: &WebhookMessage) -> RelayResult<()>;
}
