#![forbid(unsafe_code)]

//! Commit sinks: where captured values go.
//!
//! A sink receives each committed value exactly as the surface held it. The
//! controller never retries, buffers, or rewrites; a sink that fails simply
//! surfaces its [`SinkError`] to whoever requested the commit.
//!
//! Shipped sinks cover the common wirings: [`MemorySink`] keeps an ordered
//! in-process record, [`FnSink`] adapts a closure, and [`WriterSink`] writes
//! lines to any [`std::io::Write`] destination (with [`WriterSink::stderr`]
//! as the classic log-to-console hookup).

use std::io::{self, Write};

use crate::error::SinkError;

/// Consumer of committed values.
pub trait CommitSink {
    /// Accept one committed value.
    ///
    /// Errors propagate unchanged to the commit caller; the controller does
    /// not interpret them.
    fn accept(&mut self, value: &str) -> Result<(), SinkError>;
}

/// Sink that records every committed value in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    records: Vec<String>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All values accepted so far, oldest first.
    #[must_use]
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// The most recently accepted value, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.records.last().map(String::as_str)
    }

    /// Number of values accepted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the sink, yielding the recorded values.
    #[must_use]
    pub fn into_records(self) -> Vec<String> {
        self.records
    }
}

impl CommitSink for MemorySink {
    fn accept(&mut self, value: &str) -> Result<(), SinkError> {
        self.records.push(value.to_owned());
        Ok(())
    }
}

/// Sink that forwards each committed value to a closure.
#[derive(Debug)]
pub struct FnSink<F> {
    handler: F,
}

impl<F> FnSink<F>
where
    F: FnMut(&str) -> Result<(), SinkError>,
{
    /// Wrap a fallible handler.
    #[must_use]
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F> CommitSink for FnSink<F>
where
    F: FnMut(&str) -> Result<(), SinkError>,
{
    fn accept(&mut self, value: &str) -> Result<(), SinkError> {
        (self.handler)(value)
    }
}

/// Sink that writes each committed value as one line to a writer.
///
/// Output is flushed after every value so interactive destinations (stderr,
/// pipes) observe commits immediately. I/O failures surface as [`SinkError`]
/// with the `io::Error` attached as source.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    label: Option<String>,
}

impl WriterSink<io::Stderr> {
    /// Write committed values to standard error.
    ///
    /// The default wiring for interactive use: the capture stream stays
    /// visible without contaminating stdout.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> WriterSink<W> {
    /// Write committed values to `writer`, one per line.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            label: None,
        }
    }

    /// Prefix each line with `label: ` (builder).
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Consume the sink, yielding the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommitSink for WriterSink<W> {
    fn accept(&mut self, value: &str) -> Result<(), SinkError> {
        match &self.label {
            Some(label) => writeln!(self.writer, "{label}: {value}")?,
            None => writeln!(self.writer, "{value}")?,
        }
        self.writer.flush()?;
        Ok(())
    }
}
