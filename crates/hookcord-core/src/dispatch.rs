//! Request dispatch: verification, classification, formatting and delivery.
//!
//! [`dispatch`] is a stateless function; everything it needs is passed in.
//! Expected rejections (wrong method, bad signature) and policy suppressions
//! come back as an [`Outcome`]. Faults such as a payload that does not fit
//! its event or a failed delivery come back as `Err` so the caller can
//! surface them.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::delivery::DeliveryClient;
use crate::error::{RelayError, RelayResult};
use crate::events::{classify, Disposition, EventKind, SuppressReason};
use crate::format::{fallback_components, format_event};
use crate::message::WebhookMessage;
use crate::signature::{verify_signature, SignatureError};

/// Header carrying the event label.
pub const EVENT_HEADER: &str = "x-github-event";
/// Header carrying the HMAC-SHA256 signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
/// Header carrying GitHub's unique delivery id.
pub const DELIVERY_HEADER: &str = "x-github-delivery";

/// Method GitHub delivers webhooks with.
pub const DELIVERY_METHOD: &str = "POST";

/// Message sent in answer to a ping.
pub const PING_ACKNOWLEDGEMENT: &str = "Ping!";

/// An inbound webhook request with its body already read.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: String,
    headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl InboundRequest {
    pub fn new(method: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: method.into(),
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Builder: add a header. Names are case-insensitive.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert_header(name, value);
        self
    }

    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn event(&self) -> Option<&str> {
        self.header(EVENT_HEADER).filter(|e| !e.trim().is_empty())
    }

    pub fn signature(&self) -> Option<&str> {
        self.header(SIGNATURE_HEADER)
    }

    pub fn delivery_id(&self) -> Option<&str> {
        self.header(DELIVERY_HEADER)
    }
}

/// Why a request was turned away before any processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MethodNotAllowed,
    MissingEvent,
    Unauthorized(SignatureError),
}

/// Terminal state of a handled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Ping answered with the acknowledgement message.
    Acknowledged,
    /// A formatted message was delivered.
    Delivered,
    /// Nothing to send.
    Suppressed(SuppressReason),
    Rejected(Rejection),
}

impl Outcome {
    /// HTTP status code to answer with. Bodies are always empty.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Acknowledged | Self::Delivered | Self::Suppressed(_) => 204,
            Self::Rejected(Rejection::MethodNotAllowed) => 405,
            Self::Rejected(Rejection::MissingEvent) => 400,
            Self::Rejected(Rejection::Unauthorized(_)) => 401,
        }
    }
}

/// Handle one webhook request end to end.
pub async fn dispatch<D>(
    request: &InboundRequest,
    config: &RelayConfig,
    delivery: &D,
) -> RelayResult<Outcome>
where
    D: DeliveryClient + ?Sized,
{
    if !request.method.eq_ignore_ascii_case(DELIVERY_METHOD) {
        return Ok(Outcome::Rejected(Rejection::MethodNotAllowed));
    }

    let Some(label) = request.event() else {
        return Ok(Outcome::Rejected(Rejection::MissingEvent));
    };
    let kind = EventKind::from_label(label);
    let delivery_id = request.delivery_id().unwrap_or("-");

    // Pings carry nothing worth forging, so they skip verification.
    if kind.is_handshake() {
        return acknowledge(delivery).await;
    }

    if let Err(err) = verify_signature(&request.body, request.signature(), config.secret_bytes()) {
        warn!(event = %kind, delivery = %delivery_id, error = %err, "Rejected webhook signature");
        return Ok(Outcome::Rejected(Rejection::Unauthorized(err)));
    }

    let payload: Value = serde_json::from_slice(&request.body).map_err(RelayError::invalid_json)?;

    let components = match classify(kind, payload, config)? {
        Disposition::Suppress(reason) => {
            debug!(event = %label, delivery = %delivery_id, reason = %reason, "Suppressed webhook");
            return Ok(Outcome::Suppressed(reason));
        }
        Disposition::Format(event) => format_event(&event),
        Disposition::Unrecognized { kind, payload } => {
            if config.strict {
                return Err(RelayError::unhandled_event(kind.as_str()));
            }
            fallback_components(kind.as_str(), &payload, config.fallback_preview_chars)
        }
    };

    let message = WebhookMessage::components(components);
    message.validate()?;
    delivery.deliver(&message).await?;

    info!(event = %label, delivery = %delivery_id, "Relayed webhook");
    Ok(Outcome::Delivered)
}

async fn acknowledge<D>(delivery: &D) -> RelayResult<Outcome>
where
    D: DeliveryClient + ?Sized,
{
    delivery
        .deliver(&WebhookMessage::text(PING_ACKNOWLEDGEMENT))
        .await?;
    info!("Acknowledged ping");
    Ok(Outcome::Acknowledged)
}
