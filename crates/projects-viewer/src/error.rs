//! Error types for the viewer.

use projects_client::ClientError;

/// Errors that can surface while the component runs.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// A fetch failed in the access layer.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A fetch task panicked or was aborted before it finished.
    #[error("fetch task failed: {0}")]
    Task(String),
}
