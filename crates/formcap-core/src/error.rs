#![forbid(unsafe_code)]

//! Error types for form capture.
//!
//! Two seams can fail: wiring a controller together ([`ConfigError`]) and
//! delivering a committed value ([`SinkError`]). [`CaptureError`] is the
//! umbrella used by code that crosses both seams, such as the trigger
//! dispatch loop.
//!
//! # Failure Modes
//! - Construction with a missing collaborator fails fast with
//!   [`ConfigError`]; no half-wired controller is ever returned.
//! - Delivery failures carry the sink's own description and, when one
//!   exists, the underlying error as a source.

use thiserror::Error;

/// Crate-wide result alias over [`CaptureError`].
pub type Result<T> = std::result::Result<T, CaptureError>;

/// A controller was assembled without one of its required collaborators.
///
/// Raised by [`FormCaptureBuilder::build`](crate::FormCaptureBuilder::build)
/// before any trigger is processed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("form capture requires a text surface, but none was bound")]
    MissingSurface,

    #[error("form capture requires a commit sink, but none was bound")]
    MissingSink,
}

/// A sink refused or failed to accept a committed value.
///
/// The controller does not interpret sink failures; it surfaces them
/// unchanged to the caller that requested the commit.
#[derive(Debug, Error)]
#[error("commit sink failed: {message}")]
pub struct SinkError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SinkError {
    /// A failure described only by a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// A failure wrapping an underlying error as its source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The sink's own description of the failure.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source("write failed", err)
    }
}

/// Umbrella error for capture operations.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl CaptureError {
    /// Whether this error came from the delivery seam.
    #[must_use]
    pub const fn is_sink(&self) -> bool {
        matches!(self, Self::Sink(_))
    }
}
