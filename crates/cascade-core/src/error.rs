//! Error types for the cascade core
//!
//! Only configuration-time problems surface as errors: building a catalog
//! from bad input (`Config`) or mutating an entry that does not exist
//! (`NotFound`). Anything that goes wrong while the fallback walk is running
//! is captured as an [`AttemptOutcome`](crate::outcome::AttemptOutcome) and
//! never thrown past the executor boundary.

use thiserror::Error;

/// Result type alias for cascade operations
pub type CascadeResult<T> = Result<T, CascadeError>;

/// Error type for cascade operations
#[derive(Error, Debug, Clone)]
pub enum CascadeError {
    /// Malformed or inconsistent catalog input
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// A mutation referenced an unknown entry
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A transport call failed (network error, non-2xx status, bad body)
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        provider: Option<String>,
        status_code: Option<u16>,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {message}")]
    Json { message: String },
}

impl CascadeError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            provider: None,
            status_code: None,
        }
    }

    /// Create a transport error attributed to a provider
    pub fn transport_with_provider(
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            provider: Some(provider.into()),
            status_code: None,
        }
    }

    /// Create a transport error carrying an HTTP status code
    pub fn transport_with_status(
        message: impl Into<String>,
        provider: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            provider: Some(provider.into()),
            status_code: Some(status_code),
        }
    }
}

impl From<serde_json::Error> for CascadeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}
