//! Decide what to do with a verified delivery.

use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{Display, IntoStaticStr};

use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};
use crate::events::{EventKind, GitHubEvent, StarAction};

/// Why a delivery produced no message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SuppressReason {
    /// The repository is private.
    PrivateRepository,
    /// The event label is not in the configured event filter.
    Filtered,
    /// A push without commits that was not forced. GitHub sends these for
    /// branch or tag deletion, which the delete event already reports.
    EmptyPush,
    /// Someone removed their star.
    Unstarred,
}

/// Processing decision for one delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// Respond with success and send nothing.
    Suppress(SuppressReason),
    /// Render with the dedicated formatter.
    Format(GitHubEvent),
    /// No dedicated formatter exists for this kind.
    Unrecognized { kind: EventKind, payload: Value },
}

/// Classify a parsed payload by its declared kind.
///
/// Pings are answered by the dispatcher and never reach this point. The
/// private-repository check runs first and applies to every kind. The
/// payload is then narrowed into the typed event for its label; a payload
/// that does not fit its label is an error rather than a fallback.
pub fn classify(
    kind: EventKind,
    payload: Value,
    config: &RelayConfig,
) -> RelayResult<Disposition> {
    if is_private_repository(&payload) {
        return Ok(Disposition::Suppress(SuppressReason::PrivateRepository));
    }

    if !config.should_relay(kind.as_str()) {
        return Ok(Disposition::Suppress(SuppressReason::Filtered));
    }

    let event = match &kind {
        EventKind::Push => GitHubEvent::Push(narrow(&kind, payload)?),
        EventKind::Create => GitHubEvent::Create(narrow(&kind, payload)?),
        EventKind::Delete => GitHubEvent::Delete(narrow(&kind, payload)?),
        EventKind::Star => GitHubEvent::Star(narrow(&kind, payload)?),
        EventKind::Ping | EventKind::Other(_) => {
            return Ok(Disposition::Unrecognized { kind, payload });
        }
    };

    Ok(match event {
        GitHubEvent::Push(ref push) if push.commits.is_empty() && !push.forced => {
            Disposition::Suppress(SuppressReason::EmptyPush)
        }
        GitHubEvent::Star(ref star) if star.action == StarAction::Deleted => {
            Disposition::Suppress(SuppressReason::Unstarred)
        }
        event => Disposition::Format(event),
    })
}

/// Whether the payload's `repository.private` flag is set.
pub fn is_private_repository(payload: &Value) -> bool {
    payload
        .get("repository")
        .and_then(|repo| repo.get("private"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn narrow<T: DeserializeOwned>(kind: &EventKind, payload: Value) -> RelayResult<T> {
    serde_json::from_value(payload).map_err(|e| RelayError::shape_mismatch(kind.as_str(), e))
}
