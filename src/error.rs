//! Error types for the export pipeline

use serde::Serialize;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the rendering and export pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// The rendering handle could not be captured (never painted or gone)
    #[error("Capture failed: {0}")]
    Capture(String),

    /// A platform capability required by the operation is absent
    #[error("Operation not supported: {0}")]
    Unsupported(String),

    /// Serialization or save initiation failed during a download
    #[error("Download failed: {0}")]
    Download(String),

    /// The platform rejected the clipboard write
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    /// The encoding engine could not produce a symbol
    #[error("Symbol encoding failed: {0}")]
    Encode(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// The reason attached to a `Failure` outcome.
///
/// Every error an export operation can hit folds into one of these kinds
/// before it reaches the feedback channel; nothing propagates as an
/// unhandled fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// Rendering handle was not ready to be captured
    Capture,
    /// Platform capability absent or the platform refused the operation
    Unsupported,
    /// Serialization or file-save initiation failed
    Download,
    /// Clipboard write was rejected
    Clipboard,
}

impl Error {
    /// Fold this error into the outcome kind reported to the feedback channel.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::Capture(_) | Error::Encode(_) | Error::Config(_) => FailureKind::Capture,
            Error::Unsupported(_) => FailureKind::Unsupported,
            Error::Download(_) => FailureKind::Download,
            Error::Clipboard(_) => FailureKind::Clipboard,
        }
    }
}
