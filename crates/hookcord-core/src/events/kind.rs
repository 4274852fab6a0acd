//! Event labels carried in the `X-GitHub-Event` header.

use std::fmt;
use std::str::FromStr;

use strum::EnumString;

/// The declared kind of a GitHub delivery.
///
/// Only kinds with dedicated handling get their own variant; every other
/// label is kept verbatim in [`EventKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    /// Connectivity check sent when a hook is created.
    Ping,
    Push,
    Create,
    Delete,
    Star,
    #[strum(default)]
    Other(String),
}

impl EventKind {
    /// Parse a header value into a kind. Never fails.
    pub fn from_label(label: &str) -> Self {
        match Self::from_str(label.trim()) {
            Ok(kind) => kind,
            Err(_) => Self::Other(label.trim().to_string()),
        }
    }

    /// The label as GitHub spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ping => "ping",
            Self::Push => "push",
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Star => "star",
            Self::Other(label) => label,
        }
    }

    /// Whether this is the handshake event that needs no verification.
    pub fn is_handshake(&self) -> bool {
        matches!(self, Self::Ping)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
