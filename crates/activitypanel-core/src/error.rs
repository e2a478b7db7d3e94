/// Error types for ActivityPanel.
///
/// Formatting and parsing problems fail fast as `InvalidArgument`;
/// navigation fetches that go wrong are `RequestFailure` and end up as an
/// inline notice on the panel rather than propagating further.
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ActivityPanel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors that can occur in ActivityPanel.
#[derive(Debug, Error)]
pub enum PanelError {
    /// A caller passed a value outside an operation's domain
    /// (empty palette, unknown format kind, negative byte count, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A page fetch failed in transport, returned a non-success status,
    /// or returned a body that could not be used.
    #[error("Request to {url} failed: {message}")]
    RequestFailure { url: String, message: String },

    /// The config file could not be read or parsed.
    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl PanelError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a RequestFailure error.
    pub fn request_failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RequestFailure {
            url: url.into(),
            message: message.into(),
        }
    }
}
