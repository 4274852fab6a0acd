//! Relay configuration.

use std::collections::HashSet;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{RelayError, RelayResult};
use crate::format::MAX_FALLBACK_PREVIEW_CHARS;

/// Default number of characters shown by the fallback preview.
pub const DEFAULT_FALLBACK_PREVIEW_CHARS: usize = 50;

/// Settings for the verification and routing pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Shared secret GitHub signs deliveries with.
    pub webhook_secret: SecretString,
    /// Treat events without a dedicated formatter as a configuration error
    /// instead of rendering the fallback preview.
    #[serde(default)]
    pub strict: bool,
    /// Event labels to relay. Empty means all events.
    #[serde(default)]
    pub events: HashSet<String>,
    /// Character budget of the fallback preview.
    #[serde(default = "default_preview_chars")]
    pub fallback_preview_chars: usize,
}

fn default_preview_chars() -> usize {
    DEFAULT_FALLBACK_PREVIEW_CHARS
}

impl RelayConfig {
    /// Create a config with the given secret and default options.
    pub fn new(webhook_secret: impl Into<String>) -> Self {
        Self {
            webhook_secret: SecretString::new(webhook_secret.into()),
            strict: false,
            events: HashSet::new(),
            fallback_preview_chars: DEFAULT_FALLBACK_PREVIEW_CHARS,
        }
    }

    /// Builder: toggle strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builder: relay only the given event labels.
    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the fallback preview budget.
    pub fn with_fallback_preview_chars(mut self, chars: usize) -> Self {
        self.fallback_preview_chars = chars;
        self
    }

    /// Secret bytes used for HMAC verification.
    pub fn secret_bytes(&self) -> &[u8] {
        self.webhook_secret.expose_secret().as_bytes()
    }

    /// Check if the given event label passes the event filter.
    pub fn should_relay(&self, event: &str) -> bool {
        self.events.is_empty() || self.events.contains(event)
    }

    /// Load configuration from environment variables.
    ///
    /// `GITHUB_WEBHOOK_SECRET` is required; the misspelled
    /// `GITHUB_WEBHOOK_SERCET` used by older deployments is accepted too.
    pub fn from_env() -> RelayResult<Self> {
        let secret = std::env::var("GITHUB_WEBHOOK_SECRET")
            .or_else(|_| std::env::var("GITHUB_WEBHOOK_SERCET"))
            .map_err(|_| RelayError::missing("GITHUB_WEBHOOK_SECRET"))?;

        let mut config = Self::new(secret);

        if let Ok(strict) = std::env::var("HOOKCORD_STRICT") {
            config.strict = parse_flag(&strict);
        }
        if let Ok(events) = std::env::var("HOOKCORD_EVENTS") {
            config.events = parse_list(&events);
        }
        if let Ok(chars) = std::env::var("HOOKCORD_FALLBACK_PREVIEW_CHARS") {
            config.fallback_preview_chars = chars.parse().map_err(|_| {
                RelayError::config("HOOKCORD_FALLBACK_PREVIEW_CHARS must be a number")
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the relay cannot work with.
    pub fn validate(&self) -> RelayResult<()> {
        if self.webhook_secret.expose_secret().is_empty() {
            return Err(RelayError::config("webhook secret must not be empty"));
        }
        if self.fallback_preview_chars == 0 {
            return Err(RelayError::config(
                "fallback preview must show at least one character",
            ));
        }
        if self.fallback_preview_chars > MAX_FALLBACK_PREVIEW_CHARS {
            return Err(RelayError::config(format!(
                "fallback preview of {} characters exceeds the limit of {}",
                self.fallback_preview_chars, MAX_FALLBACK_PREVIEW_CHARS
            )));
        }
        Ok(())
    }
}

/// Interpret an environment flag such as `1`, `true` or `yes`.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Split a comma separated list, dropping blanks.
pub fn parse_list(value: &str) -> HashSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Load a configuration file (TOML, JSON, or YAML) into `T`.
pub fn load_config_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> RelayResult<T> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let ext = path.as_ref().extension().and_then(|e| e.to_str());

    match ext {
        Some("toml") => toml::from_str(&content).map_err(|e| RelayError::config(e.to_string())),
        Some("json") => {
            serde_json::from_str(&content).map_err(|e| RelayError::config(e.to_string()))
        }
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&content).map_err(|e| RelayError::config(e.to_string()))
        }
        _ => Err(RelayError::config(
            "Unsupported config file format. Use .toml, .json, or .yaml",
        )),
    }
}
