#![forbid(unsafe_code)]

//! The capture controller: commit and reset over one surface and one sink.
//!
//! [`FormCapture`] binds a [`TextSurface`] to a [`CommitSink`] and gives the
//! pair exactly two behaviors. Commit reads the surface and forwards the
//! value unchanged; reset clears the surface to the empty string. Nothing
//! here validates, trims, or otherwise interprets the text.
//!
//! # Invariants
//!
//! 1. Commit forwards the surface value byte-for-byte; the surface is not
//!    modified by a commit, successful or failed.
//! 2. Reset always leaves the surface holding `""`, never errors, and is
//!    idempotent.
//! 3. A sink failure propagates to the caller unchanged; the controller
//!    neither retries nor buffers the value.
//! 4. Operations run synchronously on the caller's thread, in call order.
//!
//! # Failure Modes
//!
//! Construction through the builder fails with [`ConfigError`] when a
//! collaborator is missing. After construction the only fallible operation
//! is commit, which fails exactly when the sink does.

use crate::error::{ConfigError, SinkError};
use crate::sink::CommitSink;
use crate::surface::TextSurface;
use crate::trigger::Trigger;

/// Outcome of a successfully handled trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// A commit was delivered; `bytes` is the forwarded value's length.
    Committed { bytes: usize },
    /// The surface was reset; `was_empty` reports whether it already held
    /// the empty string.
    Cleared { was_empty: bool },
}

/// Operation counters for one controller.
///
/// `commits` counts delivered values only; a failed delivery increments
/// `sink_errors` instead. `resets` counts every reset, including resets of
/// an already-empty surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    pub commits: u64,
    pub resets: u64,
    pub sink_errors: u64,
}

/// Controller that owns a surface/sink pair and runs commit and reset
/// against them.
///
/// # Example
///
/// ```
/// use formcap_core::{FormCapture, MemorySink, TextBuffer, Trigger};
///
/// let surface = TextBuffer::with_value("hello world");
/// let mut capture = FormCapture::new(surface, MemorySink::new());
///
/// capture.handle(Trigger::Commit)?;
/// capture.handle(Trigger::Reset)?;
///
/// assert_eq!(capture.sink().records(), ["hello world"]);
/// assert!(capture.surface().is_empty());
/// # Ok::<(), formcap_core::SinkError>(())
/// ```
#[derive(Debug)]
pub struct FormCapture<S, K> {
    surface: S,
    sink: K,
    stats: CaptureStats,
}

impl<S, K> FormCapture<S, K>
where
    S: TextSurface,
    K: CommitSink,
{
    /// Bind a surface and a sink directly.
    #[must_use]
    pub fn new(surface: S, sink: K) -> Self {
        Self {
            surface,
            sink,
            stats: CaptureStats::default(),
        }
    }

    /// Start building a controller from optional parts.
    #[must_use]
    pub fn builder() -> FormCaptureBuilder<S, K> {
        FormCaptureBuilder::new()
    }

    /// Forward the surface's current value to the sink.
    ///
    /// The value is passed byte-for-byte, empty string included. On failure
    /// the error is the sink's own; the surface still holds the value and
    /// the caller decides what happens next.
    pub fn commit(&mut self) -> Result<(), SinkError> {
        self.commit_value().map(|_| ())
    }

    /// Clear the surface to the empty string.
    ///
    /// Never fails and never notifies the sink. Resetting an already-empty
    /// surface is a no-op apart from the counter.
    pub fn reset(&mut self) {
        #[cfg(feature = "tracing")]
        let was_empty = self.surface.is_empty();
        self.surface.clear();
        self.stats.resets += 1;
        #[cfg(feature = "tracing")]
        Self::log_reset(was_empty);
    }

    /// Run one trigger against the pair.
    pub fn handle(&mut self, trigger: Trigger) -> Result<Handled, SinkError> {
        match trigger {
            Trigger::Commit => {
                let bytes = self.commit_value()?;
                Ok(Handled::Committed { bytes })
            }
            Trigger::Reset => {
                let was_empty = self.surface.is_empty();
                self.reset();
                Ok(Handled::Cleared { was_empty })
            }
        }
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> CaptureStats {
        self.stats
    }

    /// Borrow the bound surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the bound surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Borrow the bound sink.
    #[must_use]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Mutably borrow the bound sink.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Unbind, yielding the surface and sink.
    #[must_use]
    pub fn into_parts(self) -> (S, K) {
        (self.surface, self.sink)
    }

    fn commit_value(&mut self) -> Result<usize, SinkError> {
        let value = self.surface.value();
        match self.sink.accept(&value) {
            Ok(()) => {
                self.stats.commits += 1;
                #[cfg(feature = "tracing")]
                Self::log_commit(value.len());
                Ok(value.len())
            }
            Err(err) => {
                self.stats.sink_errors += 1;
                #[cfg(feature = "tracing")]
                Self::log_sink_error(err.description());
                Err(err)
            }
        }
    }

    #[cfg(feature = "tracing")]
    fn log_commit(bytes: usize) {
        tracing::debug!(message = "capture.commit", bytes);
    }

    #[cfg(feature = "tracing")]
    fn log_reset(was_empty: bool) {
        tracing::debug!(message = "capture.reset", was_empty);
    }

    #[cfg(feature = "tracing")]
    fn log_sink_error(description: &str) {
        tracing::warn!(message = "capture.sink_error", description);
    }
}

/// Builder for [`FormCapture`] with fail-fast validation.
///
/// Both collaborators are required. [`build`](Self::build) reports the
/// first missing one as a [`ConfigError`] instead of handing back a
/// half-wired controller.
#[derive(Debug)]
pub struct FormCaptureBuilder<S, K> {
    surface: Option<S>,
    sink: Option<K>,
}

impl<S, K> FormCaptureBuilder<S, K>
where
    S: TextSurface,
    K: CommitSink,
{
    /// Start with nothing bound.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: None,
            sink: None,
        }
    }

    /// Bind the surface (builder).
    #[must_use]
    pub fn with_surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Bind the sink (builder).
    #[must_use]
    pub fn with_sink(mut self, sink: K) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate the wiring and produce the controller.
    pub fn build(self) -> Result<FormCapture<S, K>, ConfigError> {
        let surface = self.surface.ok_or(ConfigError::MissingSurface)?;
        let sink = self.sink.ok_or(ConfigError::MissingSink)?;
        Ok(FormCapture::new(surface, sink))
    }
}

impl<S, K> Default for FormCaptureBuilder<S, K>
where
    S: TextSurface,
    K: CommitSink,
{
    fn default() -> Self {
        Self::new()
    }
}
