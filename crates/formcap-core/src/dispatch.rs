#![forbid(unsafe_code)]

//! Run-to-completion trigger dispatch.
//!
//! [`drain`] pulls triggers from a [`TriggerSource`] and runs each against
//! a controller, on the caller's thread, in source order. Each trigger
//! finishes before the next is pulled; there is no queueing inside the
//! controller and no concurrency.
//!
//! The first sink failure aborts the drain and propagates. Triggers the
//! source had not yet yielded stay in the source, and the controller's
//! [`stats`](crate::FormCapture::stats) remain accurate for everything
//! that ran.

use crate::controller::{FormCapture, Handled};
use crate::error::Result;
use crate::sink::CommitSink;
use crate::surface::TextSurface;
use crate::trigger::TriggerSource;

/// Counts from one completed [`drain`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    /// Triggers handled in total.
    pub handled: usize,
    /// Commits delivered.
    pub committed: usize,
    /// Resets applied.
    pub cleared: usize,
}

/// Drain a trigger source into a controller until the source runs dry.
pub fn drain<T, S, K>(source: &mut T, capture: &mut FormCapture<S, K>) -> Result<DrainSummary>
where
    T: TriggerSource + ?Sized,
    S: TextSurface,
    K: CommitSink,
{
    let mut summary = DrainSummary::default();
    while let Some(trigger) = source.next_trigger() {
        match capture.handle(trigger)? {
            Handled::Committed { .. } => summary.committed += 1,
            Handled::Cleared { .. } => summary.cleared += 1,
        }
        summary.handled += 1;
    }
    Ok(summary)
}
