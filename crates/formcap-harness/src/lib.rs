#![forbid(unsafe_code)]

//! Test harness and reference fixtures for form capture.

pub mod recording;
pub mod script;

pub use recording::RecordingSink;
pub use script::{Script, ScriptReport, ScriptedTriggers, Step, StepOutcome, TranscriptEntry};
