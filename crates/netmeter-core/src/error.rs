// ── Core error types ──
//
// Consumer-facing errors from netmeter-core. These are NOT API-specific --
// consumers never see reqwest errors or JSON parse failures directly.
// The `From<netmeter_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach measurement API: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netmeter_api::Error> for CoreError {
    fn from(err: netmeter_api::Error) -> Self {
        match err {
            netmeter_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            netmeter_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            netmeter_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            netmeter_api::Error::Http { status: 404, message } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            netmeter_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            netmeter_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
