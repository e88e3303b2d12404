//! Error types for the REST access layer.
//!
//! Every variant is a flavour of the same outcome, a failed call whose
//! result is dropped. The split only exists so logs and the awaitable
//! fetch can say what went wrong.

use projects_types::TypesError;

/// Errors that can occur while talking to the middleware.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The middleware answered with a non-success status.
    #[error("{url} returned {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// The body could not be turned into project records.
    #[error("payload error: {0}")]
    Payload(#[from] TypesError),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}
