//! Error types for loading availability and mounting the map.
//!
//! None of these escape to the host page as panics: the engine turns load
//! errors into a visible message overlay, and the host logs mount errors and
//! leaves the map inert.

use thiserror::Error;

/// Fallback text shown when a failed load carries no server message.
pub const FALLBACK_LOAD_MESSAGE: &str = "Unable to load available tables. Please try again.";

/// Why an availability load failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The request could not be sent, returned a non-2xx status, or the body did not decode.
    #[error("availability request failed: {0}")]
    Transport(String),
    /// The server answered with `success: false`.
    #[error("availability rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
}

impl LoadError {
    /// Message to show the user: the server's own text when it sent one.
    #[must_use]
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::Rejected { message: Some(message) } if !message.trim().is_empty() => message,
            _ => fallback,
        }
    }
}

/// Why the map could not be mounted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    /// No live element carries the container id.
    #[error("table map container `#{id}` not found")]
    ContainerMissing { id: String },
    /// There is no browser window or document to mount into.
    #[error("no browser document available")]
    NoDocument,
    /// A DOM call failed while building the canvas or overlays.
    #[error("dom operation failed: {0}")]
    Dom(String),
}
