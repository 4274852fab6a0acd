//! Outbound message body for Discord's webhook execute endpoint.

mod component;

pub use component::{
    Component, ComponentType, Container, Section, Separator, SeparatorSpacing, TextDisplay,
    Thumbnail, UnfurledMedia,
};

use serde::Serialize;

use crate::error::{ErrorCode, RelayError, RelayResult};

/// Most components a single message may carry, nested ones included.
pub const MAX_COMPONENTS: usize = 40;

/// Most characters allowed across all text blocks of a message.
pub const MAX_TEXT_CHARS: usize = 4000;

/// Discord message flags bitfield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageFlags(u32);

impl MessageFlags {
    /// Layout is described entirely by components; `content` is not allowed.
    pub const IS_COMPONENTS_V2: Self = Self(1 << 15);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Mention types Discord may resolve into pings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
}

impl AllowedMentions {
    /// Allow nothing, so relayed text can never ping anyone.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Body of one webhook execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "MessageFlags::is_empty")]
    pub flags: MessageFlags,
    pub allowed_mentions: AllowedMentions,
    /// Sent as the `with_components` query parameter, not in the body.
    #[serde(skip)]
    pub with_components: bool,
}

impl WebhookMessage {
    /// Plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            components: Vec::new(),
            flags: MessageFlags::empty(),
            allowed_mentions: AllowedMentions::none(),
            with_components: false,
        }
    }

    /// Components v2 message.
    pub fn components(components: Vec<Component>) -> Self {
        Self {
            content: None,
            components,
            flags: MessageFlags::IS_COMPONENTS_V2,
            allowed_mentions: AllowedMentions::none(),
            with_components: true,
        }
    }

    /// Total number of components, nested ones included.
    pub fn component_count(&self) -> usize {
        self.components.iter().map(Component::count).sum()
    }

    /// Characters across all text blocks.
    pub fn text_chars(&self) -> usize {
        self.components
            .iter()
            .flat_map(Component::texts)
            .map(|t| t.chars().count())
            .sum()
    }

    /// Check the message against Discord's size limits.
    pub fn validate(&self) -> RelayResult<()> {
        let count = self.component_count();
        if count > MAX_COMPONENTS {
            return Err(RelayError::validation(
                ErrorCode::ValTooManyComponents,
                format!("message has {} components, limit is {}", count, MAX_COMPONENTS),
            ));
        }

        let chars = self.text_chars() + self.content.as_deref().map_or(0, |c| c.chars().count());
        if chars > MAX_TEXT_CHARS {
            return Err(RelayError::validation(
                ErrorCode::ValTextTooLong,
                format!("message has {} characters of text, limit is {}", chars, MAX_TEXT_CHARS),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_wire_format() {
        assert_eq!(
            serde_json::to_value(WebhookMessage::text("Ping!")).unwrap(),
            json!({ "content": "Ping!", "allowed_mentions": { "parse": [] } })
        );
    }

    #[test]
    fn test_components_message_wire_format() {
        let message = WebhookMessage::components(vec![Component::text("hi")]);
        assert!(message.with_components);
        assert!(message.flags.contains(MessageFlags::IS_COMPONENTS_V2));
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "components": [{ "type": 10, "content": "hi" }],
                "flags": 32768,
                "allowed_mentions": { "parse": [] }
            })
        );
    }

    #[test]
    fn test_validate_limits() {
        let too_many = WebhookMessage::components(
            (0..=MAX_COMPONENTS).map(|i| Component::text(i.to_string())).collect(),
        );
        assert_eq!(
            too_many.validate().unwrap_err().code(),
            ErrorCode::ValTooManyComponents
        );

        let too_long = WebhookMessage::components(vec![Component::text("é".repeat(4001))]);
        assert_eq!(too_long.validate().unwrap_err().code(), ErrorCode::ValTextTooLong);

        let ok = WebhookMessage::components(vec![Component::text("é".repeat(4000))]);
        assert!(ok.validate().is_ok());
    }
}
