//! Error types for the migration engine
//!
//! This module defines all error types used throughout the crate, plus the
//! fatal/retryable classification consumed by the retry policy.

use thiserror::Error;

/// Result type alias for migration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the migration engine
#[derive(Error, Debug)]
pub enum Error {
    /// Registrar-side errors
    #[error("Registrar error ({registrar}): {message}")]
    Registrar {
        /// Registrar name
        registrar: String,
        /// Error message
        message: String,
    },

    /// DNS provider-side errors
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Domain store-related errors
    #[error("Domain store error: {0}")]
    DomainStore(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP-level errors from adapter APIs (5xx, malformed responses)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors (fatal, never retried)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors (429; retried with backoff)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Domain, zone, or record not found (fatal)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input (fatal; malformed domain, bad TLS mode, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A retried adapter call ran out of attempts
    #[error("Retries exhausted for {operation} after {attempts} attempts: {message}")]
    RetryExhausted {
        /// The operation that was retried
        operation: String,
        /// Number of attempts made
        attempts: usize,
        /// Message of the last failure
        message: String,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a registrar error
    pub fn registrar(registrar: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registrar {
            registrar: registrar.into(),
            message: message.into(),
        }
    }

    /// Create a provider error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a domain store error
    pub fn domain_store(msg: impl Into<String>) -> Self {
        Self::DomainStore(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
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

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Classify an error as retryable or fatal
    ///
    /// Authentication, not-found, and validation failures are fatal and
    /// propagate immediately. Network faults, HTTP 5xx, and rate limiting
    /// go back through the retry policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(_) | Error::Http(_) | Error::RateLimited(_) => true,
            // Adapters classify their own failures before wrapping; a bare
            // Registrar/Provider message means the adapter saw a transient
            // condition it could not map more precisely.
            Error::Registrar { .. } | Error::Provider { .. } => true,
            Error::Authentication(_)
            | Error::NotFound(_)
            | Error::InvalidInput(_)
            | Error::Config(_)
            | Error::Json(_)
            | Error::DomainStore(_)
            | Error::RetryExhausted { .. }
            | Error::Other(_) => false,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
