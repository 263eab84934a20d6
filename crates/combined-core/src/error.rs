//! Error types for the combined DDNS dispatcher
//!
//! Three families of failure exist: configuration errors (parse time,
//! fatal to startup), routing errors (zone matched no rule, no provider
//! was invoked), and delegated errors (returned by an upstream provider
//! and passed through unmodified).

use thiserror::Error;

/// Result type alias for dispatcher operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the combined DDNS dispatcher
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (unrecognized option, argument count,
    /// duplicate or missing credential, unknown provider type)
    #[error("configuration error: {0}")]
    Config(String),

    /// Zone matched no routing rule; no provider was invoked
    #[error("unsupported zone {zone}")]
    UnsupportedZone {
        /// The offending zone, as the caller passed it
        zone: String,
    },

    /// HTTP transport errors (from provider APIs)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Record or zone not found upstream
    #[error("not found: {0}")]
    NotFound(String),

    /// Provider-specific error
    #[error("provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unsupported-zone routing error
    pub fn unsupported_zone(zone: impl Into<String>) -> Self {
        Self::UnsupportedZone { zone: zone.into() }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
