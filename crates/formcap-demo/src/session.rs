#![forbid(unsafe_code)]

//! Line-oriented capture session.
//!
//! Owns the draft buffer and its capture controller. Each input line is
//! either a `:command` or text appended to the draft; submitting forwards
//! the draft verbatim and leaves it in place, clearing resets it to empty.
//! Kept free of real I/O so tests can drive whole sessions from string
//! fixtures.

use formcap_core::{
    CaptureStats, CommitSink, ConfigError, FormCapture, Handled, SharedBuffer, SinkError,
    TextSurface, Trigger,
};

/// What the caller should do after feeding one line.
#[derive(Debug, PartialEq, Eq)]
pub enum Feed {
    /// Keep reading; print the feedback line if non-empty.
    Continue(String),
    /// Stop reading and print the session summary.
    Quit(String),
}

/// One interactive capture session: a shared draft plus its controller.
pub struct Session<K: CommitSink> {
    editor: SharedBuffer,
    capture: FormCapture<SharedBuffer, K>,
}

impl<K: CommitSink> Session<K> {
    /// Build a session around `sink`, optionally pre-filling the draft.
    pub fn new(prefill: &str, sink: K) -> Result<Self, ConfigError> {
        let editor = if prefill.is_empty() {
            SharedBuffer::new()
        } else {
            SharedBuffer::with_value(prefill)
        };
        let capture = FormCapture::builder()
            .with_surface(editor.clone())
            .with_sink(sink)
            .build()?;
        Ok(Self { editor, capture })
    }

    /// Feed one input line to the session.
    ///
    /// Commands start with `:`; anything else extends the draft. A sink
    /// failure during `:submit` is returned to the caller, with the draft
    /// still intact for a retry.
    pub fn feed(&mut self, line: &str) -> Result<Feed, SinkError> {
        match line.trim_end() {
            ":quit" | ":q" => {
                tracing::debug!(message = "session.quit");
                Ok(Feed::Quit(self.summary()))
            }
            ":submit" => match self.capture.handle(Trigger::Commit)? {
                Handled::Committed { bytes } => {
                    Ok(Feed::Continue(format!("submitted {bytes} bytes")))
                }
                Handled::Cleared { .. } => unreachable!("commit trigger cannot clear"),
            },
            ":clear" => match self.capture.handle(Trigger::Reset)? {
                Handled::Cleared { was_empty: true } => {
                    Ok(Feed::Continue("draft already empty".into()))
                }
                Handled::Cleared { was_empty: false } => Ok(Feed::Continue("cleared".into())),
                Handled::Committed { .. } => unreachable!("reset trigger cannot commit"),
            },
            ":show" => {
                let value = self.editor.value();
                Ok(Feed::Continue(format!(
                    "draft: {value:?} ({} graphemes, {} cells, revision {})",
                    self.editor.grapheme_count(),
                    self.editor.display_width(),
                    self.editor.revision(),
                )))
            }
            command if command.starts_with(':') => {
                Ok(Feed::Continue(format!("unknown command: {command}")))
            }
            text => {
                self.append_line(text);
                Ok(Feed::Continue(String::new()))
            }
        }
    }

    /// Current draft contents.
    pub fn draft(&self) -> String {
        self.editor.value()
    }

    /// Counters from the underlying controller.
    pub fn stats(&self) -> CaptureStats {
        self.capture.stats()
    }

    /// One-line session summary, also printed on EOF.
    pub fn summary(&self) -> String {
        let stats = self.capture.stats();
        format!(
            "session: {} submitted, {} cleared, {} sink errors",
            stats.commits, stats.resets, stats.sink_errors,
        )
    }

    fn append_line(&mut self, text: &str) {
        let current = self.editor.value();
        if current.is_empty() {
            self.editor.set_value(text);
        } else {
            let mut grown = current;
            grown.push('\n');
            grown.push_str(text);
            self.editor.set_value(&grown);
        }
    }
}
