//! Error types for hookcord operations.
//!
//! Authentication failures and policy suppressions are not errors here: the
//! dispatcher turns them into an [`crate::dispatch::Outcome`]. What remains
//! are faults that should be visible to the hosting environment, such as a
//! payload that does not match its declared event or a failed delivery.

use thiserror::Error;

/// Result type alias for hookcord operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Main error type for all hookcord operations.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {message}")]
    Configuration { message: String, code: ErrorCode },

    /// A payload could not be parsed as the event it was declared to be.
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        code: ErrorCode,
        /// Event label the payload was declared as, when known.
        event: Option<String>,
    },

    /// A built message breaks the destination platform's limits.
    #[error("Validation error: {message}")]
    Validation { message: String, code: ErrorCode },

    /// The destination rejected the delivery.
    #[error("Delivery error: {message}")]
    Delivery {
        message: String,
        code: ErrorCode,
        status: Option<u16>,
    },

    /// The delivery request never produced a response.
    #[error("Network error: {message}")]
    Network {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Configuration (CFG_xxx)
    CfgMissingValue,
    CfgInvalidValue,
    CfgUnhandledEvent,

    // Parse (PARSE_xxx)
    ParseInvalidJson,
    ParseShapeMismatch,

    // Validation (VAL_xxx)
    ValTooManyComponents,
    ValTextTooLong,

    // Delivery (DLV_xxx)
    DlvRejected,
    DlvUnauthorized,
    DlvNotFound,
    DlvRateLimited,
    DlvServerError,

    // Network (NET_xxx)
    NetTimeout,
    NetConnectionFailed,

    // IO
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::CfgMissingValue => "CFG_001",
            ErrorCode::CfgInvalidValue => "CFG_002",
            ErrorCode::CfgUnhandledEvent => "CFG_003",
            ErrorCode::ParseInvalidJson => "PARSE_001",
            ErrorCode::ParseShapeMismatch => "PARSE_002",
            ErrorCode::ValTooManyComponents => "VAL_001",
            ErrorCode::ValTextTooLong => "VAL_002",
            ErrorCode::DlvRejected => "DLV_001",
            ErrorCode::DlvUnauthorized => "DLV_002",
            ErrorCode::DlvNotFound => "DLV_003",
            ErrorCode::DlvRateLimited => "DLV_004",
            ErrorCode::DlvServerError => "DLV_005",
            ErrorCode::NetTimeout => "NET_001",
            ErrorCode::NetConnectionFailed => "NET_002",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl RelayError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            code: ErrorCode::CfgInvalidValue,
        }
    }

    /// Create a configuration error for a required setting that is absent.
    pub fn missing(setting: &str) -> Self {
        Self::Configuration {
            message: format!("{} not set", setting),
            code: ErrorCode::CfgMissingValue,
        }
    }

    /// Create the strict-mode error for an event kind without a formatter.
    pub fn unhandled_event(event: impl Into<String>) -> Self {
        Self::Configuration {
            message: format!(
                "no formatter for '{}' events and strict mode is on",
                event.into()
            ),
            code: ErrorCode::CfgUnhandledEvent,
        }
    }

    /// Create a parse error for a body that is not JSON at all.
    pub fn invalid_json(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
            code: ErrorCode::ParseInvalidJson,
            event: None,
        }
    }

    /// Create a parse error for a payload that does not match its event label.
    pub fn shape_mismatch(event: impl Into<String>, err: serde_json::Error) -> Self {
        let event = event.into();
        Self::Parse {
            message: format!("payload does not match '{}' event: {}", event, err),
            code: ErrorCode::ParseShapeMismatch,
            event: Some(event),
        }
    }

    /// Create a validation error.
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code,
        }
    }

    /// Create a network error.
    pub fn network(
        message: impl Into<String>,
        code: ErrorCode,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: message.into(),
            code,
            source: Some(Box::new(source)),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration { code, .. } => *code,
            Self::Parse { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::Delivery { code, .. } => *code,
            Self::Network { code, .. } => *code,
            Self::Io(_) => ErrorCode::Internal,
        }
    }

    /// Get a suggestion for resolving the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Configuration {
                code: ErrorCode::CfgUnhandledEvent,
                ..
            } => Some("Unset HOOKCORD_STRICT or narrow HOOKCORD_EVENTS"),
            Self::Configuration { .. } => Some("Check the hookcord environment variables or config file"),
            Self::Delivery {
                code: ErrorCode::DlvUnauthorized | ErrorCode::DlvNotFound,
                ..
            } => Some("Check DISCORD_WEBHOOK_ID and DISCORD_WEBHOOK_TOKEN"),
            Self::Delivery {
                code: ErrorCode::DlvRateLimited,
                ..
            } => Some("Discord is rate limiting this webhook; GitHub will redeliver"),
            _ => None,
        }
    }

    /// Convert from an HTTP status code returned by the delivery endpoint.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let code = match status {
            401 | 403 => ErrorCode::DlvUnauthorized,
            404 => ErrorCode::DlvNotFound,
            429 => ErrorCode::DlvRateLimited,
            500..=599 => ErrorCode::DlvServerError,
            _ => ErrorCode::DlvRejected,
        };

        Self::Delivery {
            message: format!("HTTP {}: {}", status, body),
            code,
            status: Some(status),
        }
    }
}
