#![forbid(unsafe_code)]

//! Form capture: one text surface, two triggers, one sink.
//!
//! A [`FormCapture`] controller binds a [`TextSurface`] to a [`CommitSink`].
//! Commit forwards the surface's current value unchanged; reset clears the
//! surface to the empty string. Everything else (editing, rendering, what a
//! sink does with accepted values) belongs to the embedding.

pub mod controller;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod sink;
pub mod surface;
pub mod trigger;

pub use controller::{CaptureStats, FormCapture, FormCaptureBuilder, Handled};
pub use dispatch::{DrainSummary, drain};
pub use error::{CaptureError, ConfigError, Result, SinkError};
pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use sink::{CommitSink, FnSink, MemorySink, WriterSink};
pub use surface::{BufferSnapshot, SharedBuffer, TextBuffer, TextSurface};
pub use trigger::{KeyBindings, QueuedTriggers, Trigger, TriggerSource};
