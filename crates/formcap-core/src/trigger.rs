#![forbid(unsafe_code)]

//! Triggers and their sources.
//!
//! A capture controller understands exactly two requests: commit the
//! current value, or reset it. Where those requests come from is the
//! embedding's business; anything that can produce a stream of
//! [`Trigger`]s implements [`TriggerSource`].
//!
//! [`QueuedTriggers`] is the plain FIFO source used by run-to-completion
//! dispatch. [`KeyBindings`] translates key events into triggers for
//! terminal embeddings; only key presses activate, so holding a chord
//! down produces a single trigger.

use std::collections::VecDeque;

use crate::event::{KeyCode, KeyEvent, Modifiers};

/// A request the controller knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Forward the surface's current value to the sink.
    Commit,
    /// Clear the surface to the empty string.
    Reset,
}

/// A pull-based stream of triggers.
///
/// Sources are drained cooperatively on the caller's thread; `None` means
/// the source has no trigger ready right now, not that it is closed.
pub trait TriggerSource {
    /// Take the next pending trigger, if any.
    fn next_trigger(&mut self) -> Option<Trigger>;
}

/// FIFO queue of pending triggers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueuedTriggers {
    queue: VecDeque<Trigger>,
}

impl QueuedTriggers {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one trigger.
    pub fn push(&mut self, trigger: Trigger) {
        self.queue.push_back(trigger);
    }

    /// Append several triggers in order.
    pub fn extend(&mut self, triggers: impl IntoIterator<Item = Trigger>) {
        self.queue.extend(triggers);
    }

    /// Number of pending triggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl TriggerSource for QueuedTriggers {
    fn next_trigger(&mut self) -> Option<Trigger> {
        self.queue.pop_front()
    }
}

impl FromIterator<Trigger> for QueuedTriggers {
    fn from_iter<I: IntoIterator<Item = Trigger>>(iter: I) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}

/// Chord table mapping key events to triggers.
///
/// Matching is exact: the event's code and full modifier set must equal
/// the bound chord, and only [`Press`](crate::KeyEventKind::Press) events
/// resolve. Rebinding a chord replaces its previous trigger.
///
/// The default table is Ctrl+Enter for commit and Escape for reset; plain
/// Enter is left to the surface, which may treat it as a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Modifiers, Trigger)>,
}

impl KeyBindings {
    /// A table with no chords bound.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind a chord, replacing any previous trigger for the same chord.
    #[must_use]
    pub fn bind(mut self, code: KeyCode, modifiers: Modifiers, trigger: Trigger) -> Self {
        if let Some(slot) = self
            .bindings
            .iter_mut()
            .find(|(c, m, _)| *c == code && *m == modifiers)
        {
            slot.2 = trigger;
        } else {
            self.bindings.push((code, modifiers, trigger));
        }
        self
    }

    /// Replace every chord bound to commit with `chord`.
    ///
    /// The event's kind is ignored; only presses resolve regardless.
    #[must_use]
    pub fn with_commit_chord(self, chord: KeyEvent) -> Self {
        self.rebind_trigger(Trigger::Commit, chord)
    }

    /// Replace every chord bound to reset with `chord`.
    #[must_use]
    pub fn with_reset_chord(self, chord: KeyEvent) -> Self {
        self.rebind_trigger(Trigger::Reset, chord)
    }

    fn rebind_trigger(mut self, trigger: Trigger, chord: KeyEvent) -> Self {
        self.bindings.retain(|(_, _, bound)| *bound != trigger);
        self.bind(chord.code, chord.modifiers, trigger)
    }

    /// Resolve a key event to a trigger, if a chord matches.
    #[must_use]
    pub fn resolve(&self, event: &KeyEvent) -> Option<Trigger> {
        if !event.is_press() {
            return None;
        }
        self.bindings
            .iter()
            .find(|(code, modifiers, _)| *code == event.code && *modifiers == event.modifiers)
            .map(|(_, _, trigger)| *trigger)
    }

    /// Number of bound chords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no chords are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::empty()
            .bind(KeyCode::Enter, Modifiers::CTRL, Trigger::Commit)
            .bind(KeyCode::Escape, Modifiers::NONE, Trigger::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyEventKind;

    #[test]
    fn test_queue_drains_in_fifo_order() {
        let mut queue = QueuedTriggers::new();
        queue.push(Trigger::Commit);
        queue.push(Trigger::Reset);
        queue.push(Trigger::Commit);
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.next_trigger(), Some(Trigger::Commit));
        assert_eq!(queue.next_trigger(), Some(Trigger::Reset));
        assert_eq!(queue.next_trigger(), Some(Trigger::Commit));
        assert_eq!(queue.next_trigger(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_collects_from_iterator() {
        let mut queue: QueuedTriggers = [Trigger::Reset, Trigger::Commit].into_iter().collect();
        assert_eq!(queue.next_trigger(), Some(Trigger::Reset));
        assert_eq!(queue.next_trigger(), Some(Trigger::Commit));
    }

    #[test]
    fn test_default_chords_resolve() {
        let bindings = KeyBindings::default();

        let commit = KeyEvent::new(KeyCode::Enter).with_modifiers(Modifiers::CTRL);
        assert_eq!(bindings.resolve(&commit), Some(Trigger::Commit));

        let reset = KeyEvent::new(KeyCode::Escape);
        assert_eq!(bindings.resolve(&reset), Some(Trigger::Reset));
    }

    #[test]
    fn test_plain_enter_is_not_a_chord() {
        let bindings = KeyBindings::default();
        let enter = KeyEvent::new(KeyCode::Enter);
        assert_eq!(bindings.resolve(&enter), None);
    }

    #[test]
    fn test_modifier_match_is_exact() {
        let bindings = KeyBindings::default();
        let over_modified =
            KeyEvent::new(KeyCode::Enter).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(bindings.resolve(&over_modified), None);
    }

    #[test]
    fn test_only_presses_resolve() {
        let bindings = KeyBindings::default();
        let held = KeyEvent::new(KeyCode::Escape).with_kind(KeyEventKind::Repeat);
        assert_eq!(bindings.resolve(&held), None);
        let released = KeyEvent::new(KeyCode::Escape).with_kind(KeyEventKind::Release);
        assert_eq!(bindings.resolve(&released), None);
    }

    #[test]
    fn test_rebinding_replaces_the_chord() {
        let bindings = KeyBindings::default().bind(KeyCode::Escape, Modifiers::NONE, Trigger::Commit);
        assert_eq!(bindings.len(), 2);
        let escape = KeyEvent::new(KeyCode::Escape);
        assert_eq!(bindings.resolve(&escape), Some(Trigger::Commit));
    }

    #[test]
    fn test_chord_override_builders_replace_defaults() {
        let bindings = KeyBindings::default()
            .with_commit_chord(KeyEvent::new(KeyCode::F(5)))
            .with_reset_chord(KeyEvent::new(KeyCode::Char('u')).with_modifiers(Modifiers::CTRL));
        assert_eq!(bindings.len(), 2);

        let f5 = KeyEvent::new(KeyCode::F(5));
        assert_eq!(bindings.resolve(&f5), Some(Trigger::Commit));

        let old_commit = KeyEvent::new(KeyCode::Enter).with_modifiers(Modifiers::CTRL);
        assert_eq!(bindings.resolve(&old_commit), None);

        let ctrl_u = KeyEvent::new(KeyCode::Char('u')).with_modifiers(Modifiers::CTRL);
        assert_eq!(bindings.resolve(&ctrl_u), Some(Trigger::Reset));

        let old_reset = KeyEvent::new(KeyCode::Escape);
        assert_eq!(bindings.resolve(&old_reset), None);
    }

    #[test]
    fn test_custom_chords() {
        let bindings = KeyBindings::empty()
            .bind(KeyCode::F(2), Modifiers::NONE, Trigger::Commit)
            .bind(KeyCode::Char('k'), Modifiers::CTRL, Trigger::Reset);

        let f2 = KeyEvent::new(KeyCode::F(2));
        assert_eq!(bindings.resolve(&f2), Some(Trigger::Commit));

        let ctrl_k = KeyEvent::new(KeyCode::Char('k')).with_modifiers(Modifiers::CTRL);
        assert_eq!(bindings.resolve(&ctrl_k), Some(Trigger::Reset));

        let plain_k = KeyEvent::new(KeyCode::Char('k'));
        assert_eq!(bindings.resolve(&plain_k), None);
    }
}
