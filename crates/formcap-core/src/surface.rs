#![forbid(unsafe_code)]

//! Text surfaces: the mutable value a capture controller reads and clears.
//!
//! A surface is anything that holds one editable text value. The controller
//! only ever calls [`TextSurface::value`] and [`TextSurface::set_value`];
//! editing (typing, cursor movement, rendering) stays in the embedding.
//!
//! Two implementations ship here: [`TextBuffer`], a plain owned value with
//! revision tracking, and [`SharedBuffer`], an `Rc<RefCell<TextBuffer>>`
//! handle for the usual single-threaded arrangement where the embedding
//! keeps editing the same buffer a controller is bound to.
//!
//! # Invariants
//!
//! 1. `revision` increments exactly once per mutation that changes the value.
//! 2. Writing a value equal to the current value is a no-op (no revision
//!    bump).
//! 3. `clear` is `set_value("")`; clearing an already-empty buffer changes
//!    nothing.
//! 4. `restore(snapshot())` reproduces both value and revision exactly.
//!    Restore is the one mutation outside the revision discipline.

use std::cell::RefCell;
use std::rc::Rc;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// One editable text value, as seen by a capture controller.
///
/// Implementations may synthesize the value on demand, so reads return an
/// owned copy rather than borrowing storage that may not exist.
pub trait TextSurface {
    /// Current value of the surface.
    fn value(&self) -> String;

    /// Replace the value wholesale.
    fn set_value(&mut self, value: &str);

    /// Reset the value to the empty string.
    fn clear(&mut self) {
        self.set_value("");
    }

    /// Whether the current value is the empty string.
    fn is_empty(&self) -> bool {
        self.value().is_empty()
    }
}

/// An owned text value with revision tracking.
///
/// The revision counter lets an embedding cheaply detect whether anything
/// wrote to the buffer since it last looked, without diffing strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    revision: u64,
}

impl TextBuffer {
    /// Create an empty buffer at revision zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `value` (builder).
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            revision: 0,
        }
    }

    /// Borrow the current value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Number of value-changing writes applied so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the value is the empty string.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Number of grapheme clusters in the value.
    ///
    /// Newlines count as graphemes; this is the user-visible "characters
    /// typed" number, not a byte length.
    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Display width in terminal cells of the widest line.
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.value
            .lines()
            .map(|line| {
                line.graphemes(true)
                    .map(UnicodeWidthStr::width)
                    .sum::<usize>()
            })
            .max()
            .unwrap_or(0)
    }

    /// Capture the current value and revision.
    #[must_use]
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            value: self.value.clone(),
            revision: self.revision,
        }
    }

    /// Reinstate a previously captured snapshot verbatim.
    pub fn restore(&mut self, snapshot: BufferSnapshot) {
        self.value = snapshot.value;
        self.revision = snapshot.revision;
    }
}

impl TextSurface for TextBuffer {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        if self.value == value {
            return;
        }
        self.value.clear();
        self.value.push_str(value);
        self.revision += 1;
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// A cloneable handle to a [`TextBuffer`] shared within one thread.
///
/// The embedding keeps one handle for editing and hands another to the
/// controller; both observe the same value and revision. Borrows follow
/// `RefCell` rules, which the controller respects by never holding a borrow
/// across a sink call.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Rc<RefCell<TextBuffer>>,
}

impl SharedBuffer {
    /// Create a handle to a fresh empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle to a buffer holding `value`.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TextBuffer::with_value(value))),
        }
    }

    /// Current revision of the shared buffer.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision()
    }

    /// Grapheme count of the shared value.
    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.inner.borrow().grapheme_count()
    }

    /// Display width in cells of the widest line of the shared value.
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.inner.borrow().display_width()
    }

    /// Capture the shared buffer's value and revision.
    #[must_use]
    pub fn snapshot(&self) -> BufferSnapshot {
        self.inner.borrow().snapshot()
    }

    /// Reinstate a previously captured snapshot verbatim.
    pub fn restore(&self, snapshot: BufferSnapshot) {
        self.inner.borrow_mut().restore(snapshot);
    }
}

impl TextSurface for SharedBuffer {
    fn value(&self) -> String {
        self.inner.borrow().value()
    }

    fn set_value(&mut self, value: &str) {
        self.inner.borrow_mut().set_value(value);
    }

    fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// A point-in-time copy of a buffer's value and revision.
///
/// With the `state-persistence` feature enabled, snapshots derive serde
/// traits so sessions can be saved and restored. Without it they are plain
/// in-memory values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct BufferSnapshot {
    /// The buffer value at capture time.
    pub value: String,
    /// The revision at capture time.
    pub revision: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty_at_revision_zero() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_str(), "");
        assert_eq!(buffer.revision(), 0);
    }

    #[test]
    fn test_set_value_bumps_revision_once() {
        let mut buffer = TextBuffer::new();
        buffer.set_value("hello");
        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.revision(), 1);
        buffer.set_value("hello world");
        assert_eq!(buffer.revision(), 2);
    }

    #[test]
    fn test_equal_write_is_a_noop() {
        let mut buffer = TextBuffer::with_value("same");
        buffer.set_value("same");
        assert_eq!(buffer.revision(), 0);
    }

    #[test]
    fn test_clear_empties_and_is_idempotent() {
        let mut buffer = TextBuffer::with_value("text");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.revision(), 1);
        buffer.clear();
        assert_eq!(buffer.revision(), 1);
    }

    #[test]
    fn test_trait_read_returns_owned_copy() {
        let buffer = TextBuffer::with_value("copy me");
        let value = TextSurface::value(&buffer);
        assert_eq!(value, "copy me");
    }

    #[test]
    fn test_grapheme_count_is_cluster_aware() {
        let buffer = TextBuffer::with_value("café");
        assert_eq!(buffer.grapheme_count(), 4);
        let buffer = TextBuffer::with_value("a\nb");
        assert_eq!(buffer.grapheme_count(), 3);
    }

    #[test]
    fn test_display_width_takes_widest_line() {
        let buffer = TextBuffer::with_value("hi\nhello\nok");
        assert_eq!(buffer.display_width(), 5);
        let buffer = TextBuffer::new();
        assert_eq!(buffer.display_width(), 0);
    }

    #[test]
    fn test_display_width_counts_wide_cells() {
        // CJK graphemes occupy two terminal cells each.
        let buffer = TextBuffer::with_value("日本");
        assert_eq!(buffer.display_width(), 4);
    }

    #[test]
    fn test_snapshot_round_trip_is_exact() {
        let mut buffer = TextBuffer::new();
        buffer.set_value("first");
        buffer.set_value("second");
        let snapshot = buffer.snapshot();

        buffer.set_value("diverged");
        buffer.restore(snapshot);
        assert_eq!(buffer.as_str(), "second");
        assert_eq!(buffer.revision(), 2);
    }

    #[test]
    fn test_shared_handles_observe_the_same_value() {
        let mut editor = SharedBuffer::new();
        let controller_side = editor.clone();

        editor.set_value("typed by the user");
        assert_eq!(controller_side.value(), "typed by the user");
        assert_eq!(controller_side.revision(), 1);
    }

    #[test]
    fn test_shared_clear_is_visible_to_all_handles() {
        let editor = SharedBuffer::with_value("draft");
        let mut controller_side = editor.clone();

        controller_side.clear();
        assert!(editor.is_empty());
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn test_snapshot_serde_round_trip() {
        let mut buffer = TextBuffer::new();
        buffer.set_value("persist me");
        let snapshot = buffer.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: BufferSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
