use serde_json::Value;

use crate::message::{Component, MAX_TEXT_CHARS};

const FENCE_OPEN: &str = "```json\n";
const FENCE_CLOSE: &str = "\n```";

/// Largest preview that still fits a message once fenced.
pub const MAX_FALLBACK_PREVIEW_CHARS: usize = MAX_TEXT_CHARS - FENCE_OPEN.len() - FENCE_CLOSE.len();

/// Stands in for backticks so the preview cannot close its own fence.
const BACKTICK_REPLACEMENT: char = '\u{02CB}';

/// Preview of an event that has no dedicated formatter.
///
/// Renders `{"eventType": <label>, ...payload}` as JSON, keeps the first
/// `budget` characters, and wraps them in a code block. The payload shape is
/// never inspected.
pub fn fallback_components(event: &str, payload: &Value, budget: usize) -> Vec<Component> {
    let preview: String = envelope_json(event, payload)
        .chars()
        .take(budget)
        .map(|c| if c == '`' { BACKTICK_REPLACEMENT } else { c })
        .collect();
    vec![Component::text(format!("{}{}{}", FENCE_OPEN, preview, FENCE_CLOSE))]
}

fn envelope_json(event: &str, payload: &Value) -> String {
    let label = Value::String(event.to_string());
    match payload {
        Value::Object(map) if map.is_empty() => format!("{{\"eventType\":{}}}", label),
        Value::Object(_) => {
            // "{...}" -> "{"eventType":"x",...}"
            let body = payload.to_string();
            format!("{{\"eventType\":{},{}", label, &body[1..])
        }
        other => format!("{{\"eventType\":{},\"payload\":{}}}", label, other),
    }
}
