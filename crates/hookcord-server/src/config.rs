//! Server configuration.

use std::path::Path;

use hookcord_core::config::load_config_file;
use hookcord_core::error::{RelayError, RelayResult};
use hookcord_core::RelayConfig;
use hookcord_discord::DiscordConfig;
use serde::Deserialize;

/// GitHub refuses to send payloads above 25 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> RelayResult<Self> {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("HOOKCORD_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("HOOKCORD_PORT") {
            config.port = port
                .parse()
                .map_err(|_| RelayError::config("HOOKCORD_PORT must be a valid port number"))?;
        }
        if let Ok(limit) = std::env::var("HOOKCORD_MAX_BODY_BYTES") {
            config.max_body_bytes = limit
                .parse()
                .map_err(|_| RelayError::config("HOOKCORD_MAX_BODY_BYTES must be a number"))?;
        }
        Ok(config)
    }

    /// `host:port` to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Everything the binary needs to start.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub relay: RelayConfig,
    pub discord: DiscordConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> RelayResult<Self> {
        Ok(Self {
            relay: RelayConfig::from_env()?,
            discord: DiscordConfig::from_env()?,
            server: ServerConfig::from_env()?,
        })
    }

    /// Load from a TOML, JSON, or YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> RelayResult<Self> {
        let config: Self = load_config_file(path)?;
        config.relay.validate()?;
        Ok(config)
    }

    /// Read the file named by `HOOKCORD_CONFIG`, or fall back to the environment.
    pub fn load() -> RelayResult<Self> {
        match std::env::var("HOOKCORD_CONFIG") {
            Ok(path) => Self::from_file(path),
            Err(_) => Self::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[relay]
webhook_secret = "s3cret"
events = ["push", "star"]

[discord]
webhook_id = "123"
webhook_token = "tok"

[server]
port = 9000
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.relay.secret_bytes(), b"s3cret");
        assert!(config.relay.should_relay("star"));
        assert!(!config.relay.should_relay("issues"));
        assert_eq!(config.discord.webhook_id, "123");
        assert_eq!(config.discord.timeout_secs, 10);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_from_yaml_file_without_server_section() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "relay:\n  webhook_secret: s3cret\n  strict: true\ndiscord:\n  webhook_id: \"123\"\n  webhook_token: tok\n"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert!(config.relay.strict);
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"relay": {{"webhook_secret": ""}}, "discord": {{"webhook_id": "1", "webhook_token": "t"}}}}"#
        )
        .unwrap();

        assert!(AppConfig::from_file(file.path()).is_err());
    }
}
