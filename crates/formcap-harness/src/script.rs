#![forbid(unsafe_code)]

//! Scripted capture sessions with transcript evidence.
//!
//! A [`Script`] is a fixed sequence of session steps (type, commit, reset)
//! that runs against any controller and produces a [`ScriptReport`]: one
//! transcript entry per executed step plus JSONL evidence lines for
//! postmortem analysis. Runs are deterministic, so a failing script can be
//! replayed byte-for-byte.
//!
//! [`ScriptedTriggers`] is the companion trigger source: a pre-scripted
//! sequence for drain-style tests, with a seeded storm generator for
//! high-volume runs.

use std::collections::VecDeque;

use formcap_core::{CommitSink, FormCapture, Handled, TextSurface, Trigger, TriggerSource};

/// Pre-scripted trigger sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedTriggers {
    remaining: VecDeque<Trigger>,
    total: usize,
}

impl ScriptedTriggers {
    /// Script an explicit sequence.
    #[must_use]
    pub fn new(triggers: impl IntoIterator<Item = Trigger>) -> Self {
        let remaining: VecDeque<Trigger> = triggers.into_iter().collect();
        let total = remaining.len();
        Self { remaining, total }
    }

    /// A seeded commit/reset storm of `count` triggers.
    ///
    /// Roughly one trigger in four is a reset. The same seed always yields
    /// the same sequence.
    #[must_use]
    pub fn storm(count: usize, seed: u64) -> Self {
        let mut state = seed;
        Self::new((0..count).map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            if (state >> 33) & 3 == 0 {
                Trigger::Reset
            } else {
                Trigger::Commit
            }
        }))
    }

    /// Triggers not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Length of the full scripted sequence.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }
}

impl TriggerSource for ScriptedTriggers {
    fn next_trigger(&mut self) -> Option<Trigger> {
        self.remaining.pop_front()
    }
}

/// One step of a scripted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Replace the surface value, as if the user retyped the field.
    Type(String),
    /// Fire the commit trigger.
    Commit,
    /// Fire the reset trigger.
    Reset,
}

impl Step {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Type(_) => "type",
            Self::Commit => "commit",
            Self::Reset => "reset",
        }
    }
}

/// What one executed step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The surface now holds a value of `bytes` bytes.
    Typed { bytes: usize },
    /// A value of `bytes` bytes was delivered to the sink.
    Committed { bytes: usize },
    /// The surface was cleared; it already held `""` if `was_empty`.
    Cleared { was_empty: bool },
    /// The sink refused the value; the script aborted here.
    SinkFailed { description: String },
}

/// Transcript line: step index, what happened, and the surface afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub step: usize,
    pub outcome: StepOutcome,
    pub surface_after: String,
}

/// Everything a script run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    entries: Vec<TranscriptEntry>,
    aborted: bool,
}

impl ScriptReport {
    /// Transcript entries in execution order.
    #[must_use]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Whether the run stopped early on a sink failure.
    #[must_use]
    pub const fn aborted(&self) -> bool {
        self.aborted
    }

    /// Number of delivered commits in this run.
    #[must_use]
    pub fn commits(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, StepOutcome::Committed { .. }))
            .count()
    }

    /// JSONL evidence: one line per step plus a closing summary line.
    #[must_use]
    pub fn jsonl(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|entry| {
                let line = match &entry.outcome {
                    StepOutcome::Typed { bytes } => serde_json::json!({
                        "event": "script_step",
                        "step": entry.step,
                        "outcome": "type",
                        "bytes": bytes,
                        "surface": entry.surface_after,
                    }),
                    StepOutcome::Committed { bytes } => serde_json::json!({
                        "event": "script_step",
                        "step": entry.step,
                        "outcome": "commit",
                        "bytes": bytes,
                        "surface": entry.surface_after,
                    }),
                    StepOutcome::Cleared { was_empty } => serde_json::json!({
                        "event": "script_step",
                        "step": entry.step,
                        "outcome": "reset",
                        "was_empty": was_empty,
                        "surface": entry.surface_after,
                    }),
                    StepOutcome::SinkFailed { description } => serde_json::json!({
                        "event": "script_step",
                        "step": entry.step,
                        "outcome": "sink_error",
                        "error": description,
                        "surface": entry.surface_after,
                    }),
                };
                line.to_string()
            })
            .collect();

        lines.push(
            serde_json::json!({
                "event": "script_complete",
                "steps": self.entries.len(),
                "commits": self.commits(),
                "aborted": self.aborted,
            })
            .to_string(),
        );
        lines
    }
}

/// A fixed session: steps applied in order against one controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    /// An empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a typing step (builder).
    #[must_use]
    pub fn type_text(mut self, text: impl Into<String>) -> Self {
        self.steps.push(Step::Type(text.into()));
        self
    }

    /// Append a commit step (builder).
    #[must_use]
    pub fn commit(mut self) -> Self {
        self.steps.push(Step::Commit);
        self
    }

    /// Append a reset step (builder).
    #[must_use]
    pub fn reset(mut self) -> Self {
        self.steps.push(Step::Reset);
        self
    }

    /// The scripted steps.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of scripted steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step against `capture`, stopping at the first sink
    /// failure.
    ///
    /// The report always covers every step that executed, the failing one
    /// included.
    pub fn run<S, K>(&self, capture: &mut FormCapture<S, K>) -> ScriptReport
    where
        S: TextSurface,
        K: CommitSink,
    {
        let mut report = ScriptReport::default();

        for (step, action) in self.steps.iter().enumerate() {
            tracing::debug!(message = "script.step", step, kind = action.kind());

            let outcome = match action {
                Step::Type(text) => {
                    capture.surface_mut().set_value(text);
                    StepOutcome::Typed { bytes: text.len() }
                }
                Step::Commit | Step::Reset => {
                    let trigger = if matches!(action, Step::Commit) {
                        Trigger::Commit
                    } else {
                        Trigger::Reset
                    };
                    match capture.handle(trigger) {
                        Ok(Handled::Committed { bytes }) => StepOutcome::Committed { bytes },
                        Ok(Handled::Cleared { was_empty }) => StepOutcome::Cleared { was_empty },
                        Err(err) => StepOutcome::SinkFailed {
                            description: err.description().to_owned(),
                        },
                    }
                }
            };

            let failed = matches!(outcome, StepOutcome::SinkFailed { .. });
            report.entries.push(TranscriptEntry {
                step,
                outcome,
                surface_after: capture.surface().value(),
            });
            if failed {
                report.aborted = true;
                break;
            }
        }

        tracing::debug!(
            message = "script.complete",
            steps = report.entries.len(),
            aborted = report.aborted
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingSink;
    use formcap_core::TextBuffer;

    fn fresh_capture() -> FormCapture<TextBuffer, RecordingSink> {
        FormCapture::new(TextBuffer::new(), RecordingSink::new())
    }

    #[test]
    fn test_script_runs_steps_in_order() {
        let script = Script::new().type_text("hello").commit().reset().commit();
        let mut capture = fresh_capture();
        let report = script.run(&mut capture);

        assert!(!report.aborted());
        assert_eq!(report.entries().len(), 4);
        assert_eq!(report.commits(), 2);
        assert_eq!(capture.sink().records(), ["hello", ""]);
    }

    #[test]
    fn test_transcript_tracks_surface_after_each_step() {
        let script = Script::new().type_text("draft").reset();
        let mut capture = fresh_capture();
        let report = script.run(&mut capture);

        assert_eq!(report.entries()[0].surface_after, "draft");
        assert_eq!(report.entries()[1].surface_after, "");
        assert_eq!(
            report.entries()[1].outcome,
            StepOutcome::Cleared { was_empty: false }
        );
    }

    #[test]
    fn test_script_aborts_on_sink_failure() {
        let script = Script::new().type_text("x").commit().commit().reset();
        let mut capture = FormCapture::new(TextBuffer::new(), RecordingSink::failing_after(1));
        let report = script.run(&mut capture);

        assert!(report.aborted());
        // type, first commit, failing commit; the reset never ran.
        assert_eq!(report.entries().len(), 3);
        assert!(matches!(
            report.entries()[2].outcome,
            StepOutcome::SinkFailed { .. }
        ));
        assert_eq!(capture.surface().as_str(), "x");
    }

    #[test]
    fn test_jsonl_lines_parse_and_close_with_summary() {
        let script = Script::new().type_text("hi").commit();
        let mut capture = fresh_capture();
        let lines = script.run(&mut capture).jsonl();

        assert_eq!(lines.len(), 3);
        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["event"].is_string());
        }
        let summary: serde_json::Value = serde_json::from_str(lines.last().unwrap()).unwrap();
        assert_eq!(summary["event"], "script_complete");
        assert_eq!(summary["steps"], 2);
        assert_eq!(summary["commits"], 1);
        assert_eq!(summary["aborted"], false);
    }

    #[test]
    fn test_storm_is_deterministic_per_seed() {
        let mut first = ScriptedTriggers::storm(500, 42);
        let mut second = ScriptedTriggers::storm(500, 42);
        assert_eq!(first.total(), 500);

        let collect = |source: &mut ScriptedTriggers| {
            std::iter::from_fn(|| source.next_trigger()).collect::<Vec<_>>()
        };
        let same_seed_a = collect(&mut first);
        let same_seed_b = collect(&mut second);
        assert_eq!(same_seed_a, same_seed_b);

        let mut other_seed = ScriptedTriggers::storm(500, 43);
        assert_ne!(same_seed_a, collect(&mut other_seed));
    }

    #[test]
    fn test_storm_mixes_both_triggers() {
        let mut storm = ScriptedTriggers::storm(200, 7);
        let triggers: Vec<Trigger> = std::iter::from_fn(|| storm.next_trigger()).collect();
        assert!(triggers.contains(&Trigger::Commit));
        assert!(triggers.contains(&Trigger::Reset));
        assert_eq!(storm.remaining(), 0);
    }
}
