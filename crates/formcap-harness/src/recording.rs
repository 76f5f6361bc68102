#![forbid(unsafe_code)]

//! Recording sink with deterministic fault injection.
//!
//! [`RecordingSink`] is the reference sink for tests: it keeps every
//! accepted value in order, counts every attempt, and can be told to start
//! failing after a fixed number of accepts. Failures are deterministic so
//! a failing sequence replays identically.

use formcap_core::{CommitSink, SinkError};

/// Sink that records accepted values and can inject failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    accepted: Vec<String>,
    fail_after: Option<usize>,
    attempts: usize,
    failures: usize,
}

impl RecordingSink {
    /// A sink that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that accepts `quota` values, then fails every further
    /// attempt.
    ///
    /// `failing_after(0)` fails from the first attempt onward.
    #[must_use]
    pub fn failing_after(quota: usize) -> Self {
        Self {
            fail_after: Some(quota),
            ..Self::default()
        }
    }

    /// Values accepted so far, oldest first.
    #[must_use]
    pub fn records(&self) -> &[String] {
        &self.accepted
    }

    /// The most recently accepted value, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.accepted.last().map(String::as_str)
    }

    /// Number of accepted values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    /// Whether nothing has been accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Total accept attempts, failed ones included.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Number of injected failures so far.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.failures
    }

    /// Consume the sink, yielding the accepted values.
    #[must_use]
    pub fn into_records(self) -> Vec<String> {
        self.accepted
    }
}

impl CommitSink for RecordingSink {
    fn accept(&mut self, value: &str) -> Result<(), SinkError> {
        self.attempts += 1;
        if let Some(quota) = self.fail_after
            && self.accepted.len() >= quota
        {
            self.failures += 1;
            return Err(SinkError::message(format!(
                "injected failure after {quota} accepted"
            )));
        }
        self.accepted.push(value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reliable_sink_accepts_everything() {
        let mut sink = RecordingSink::new();
        sink.accept("one").unwrap();
        sink.accept("two").unwrap();
        assert_eq!(sink.records(), ["one", "two"]);
        assert_eq!(sink.attempts(), 2);
        assert_eq!(sink.failures(), 0);
    }

    #[test]
    fn test_quota_sink_fails_after_quota() {
        let mut sink = RecordingSink::failing_after(2);
        sink.accept("a").unwrap();
        sink.accept("b").unwrap();
        let err = sink.accept("c").unwrap_err();
        assert_eq!(err.description(), "injected failure after 2 accepted");
        assert_eq!(sink.records(), ["a", "b"]);
        assert_eq!(sink.attempts(), 3);
        assert_eq!(sink.failures(), 1);
    }

    #[test]
    fn test_quota_zero_fails_immediately() {
        let mut sink = RecordingSink::failing_after(0);
        assert!(sink.accept("never").is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_failures_are_deterministic_across_replays() {
        let run = |values: &[&str]| {
            let mut sink = RecordingSink::failing_after(1);
            let outcomes: Vec<bool> = values.iter().map(|v| sink.accept(v).is_ok()).collect();
            (outcomes, sink.into_records())
        };

        let first = run(&["x", "y", "z"]);
        let second = run(&["x", "y", "z"]);
        assert_eq!(first, second);
    }
}
