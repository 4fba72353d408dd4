//! Coalescing edit history
//!
//! [`EditHistory`] is a bounded, linear undo/redo stack of opaque snapshots
//! with a cursor. Change notifications do not push immediately: they arm a
//! [`QuietTimer`], and only when the host polls after the quiet period is the
//! latest observed snapshot compared against the entry at the cursor and
//! pushed if it differs. A burst of edits therefore becomes a single entry.
//!
//! ```text
//!            notify_changed            notify_changed (re-arm)
//!   ┌──────┐ ─────────────► ┌─────────────┐ ◄─┐
//!   │ Idle │                │ PendingPush │ ──┘
//!   └──────┘ ◄───────────── └─────────────┘
//!            poll (expired) / flush / cancel_pending
//! ```
//!
//! The manager never looks inside a snapshot beyond `PartialEq`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::timer::QuietTimer;

/// Default maximum number of retained entries
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Coalescing state of the history manager
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryState {
    /// No push is pending
    Idle,
    /// A change was observed; a push is scheduled after the quiet period
    PendingPush,
}

/// Bounded undo/redo stack over immutable snapshots
#[derive(Debug)]
pub struct EditHistory<T> {
    entries: VecDeque<T>,
    cursor: usize,
    capacity: usize,
    timer: QuietTimer,
    /// Most recent snapshot observed while a push is pending
    latest: Option<T>,
    /// Set by undo/redo so the host's echo of the restored snapshot is not
    /// recorded as a new edit
    suppress_restored: bool,
}

impl<T: Clone + PartialEq> EditHistory<T> {
    /// Create a history holding only `initial`, with the default capacity
    pub fn new(initial: T, quiet_period: Duration) -> Self {
        Self::with_capacity(initial, quiet_period, DEFAULT_HISTORY_LIMIT)
    }

    /// Create a history that retains at most `capacity` entries
    pub fn with_capacity(initial: T, quiet_period: Duration, capacity: usize) -> Self {
        let mut entries = VecDeque::with_capacity(capacity.clamp(1, 64));
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            capacity: capacity.max(1),
            timer: QuietTimer::new(quiet_period),
            latest: None,
            suppress_restored: false,
        }
    }

    // ========== Inspection ==========

    pub fn state(&self) -> HistoryState {
        if self.timer.is_pending() {
            HistoryState::PendingPush
        } else {
            HistoryState::Idle
        }
    }

    /// Number of entries on the stack
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the stack holds at least the starting snapshot
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current entry (0 = oldest)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The snapshot at the cursor
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// Iterate entries from oldest to newest
    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0 || self.has_pending_change()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len() && !self.has_pending_change()
    }

    fn has_pending_change(&self) -> bool {
        self.timer.is_pending()
            && self
                .latest
                .as_ref()
                .is_some_and(|latest| latest != self.current())
    }

    // ========== Change observation ==========

    /// Observe a configuration change
    ///
    /// Arms the quiet-period timer (or restarts it if a push is already
    /// pending). The first notification after an undo/redo that carries the
    /// restored snapshot is ignored.
    pub fn notify_changed(&mut self, snapshot: T, now: Instant) {
        if std::mem::take(&mut self.suppress_restored) && snapshot == *self.current() {
            trace!("EditHistory: ignoring restored snapshot");
            return;
        }

        let generation = self.timer.arm(now);
        self.latest = Some(snapshot);
        trace!("EditHistory: change observed, timer generation {}", generation.get());
    }

    /// Drive the quiet-period timer
    ///
    /// Returns true if a new entry was pushed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.fire_if_due(now).is_none() {
            return false;
        }
        match self.latest.take() {
            Some(latest) => self.push_if_changed(latest),
            None => false,
        }
    }

    /// Push any pending change immediately, skipping the rest of the quiet
    /// period. Returns true if a new entry was pushed.
    pub fn flush(&mut self) -> bool {
        if !self.timer.cancel() {
            return false;
        }
        match self.latest.take() {
            Some(latest) => self.push_if_changed(latest),
            None => false,
        }
    }

    /// Drop a pending push without recording it (session teardown)
    pub fn cancel_pending(&mut self) {
        if self.timer.cancel() {
            debug!("EditHistory: pending push cancelled");
        }
        self.latest = None;
    }

    /// Push `snapshot` if it differs from the entry at the cursor
    ///
    /// Entries after the cursor (the redo branch) are discarded. When the
    /// stack exceeds its capacity the oldest entry is evicted.
    pub fn push_if_changed(&mut self, snapshot: T) -> bool {
        if snapshot == *self.current() {
            trace!("EditHistory: snapshot unchanged, not pushing");
            return false;
        }

        let discarded = self.entries.len() - (self.cursor + 1);
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.cursor -= 1;
            trace!("EditHistory: evicted oldest entry");
        }

        debug!(
            "EditHistory: pushed entry {} (discarded {} redo entries)",
            self.cursor, discarded
        );
        true
    }

    // ========== Undo / Redo ==========

    /// Step back one entry
    ///
    /// A pending change is flushed first so it can be redone. Returns `None`
    /// (and changes nothing) at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        self.flush();
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.suppress_restored = true;
        debug!("EditHistory: undo to entry {}", self.cursor);
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry
    ///
    /// Returns `None` (and changes nothing, a pending change stays pending)
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.flush();
        self.cursor += 1;
        self.suppress_restored = true;
        debug!("EditHistory: redo to entry {}", self.cursor);
        Some(&self.entries[self.cursor])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_initial_state() {
        let history = EditHistory::new("a", QUIET);
        assert_eq!(history.state(), HistoryState::Idle);
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_notify_moves_to_pending() {
        let start = Instant::now();
        let mut history = EditHistory::new("a", QUIET);

        history.notify_changed("b", start);
        assert_eq!(history.state(), HistoryState::PendingPush);

        assert!(!history.poll(start + ms(100)));
        assert_eq!(history.len(), 1);

        assert!(history.poll(start + QUIET));
        assert_eq!(history.state(), HistoryState::Idle);
        assert_eq!(history.current(), &"b");
    }

    #[test]
    fn test_unchanged_snapshot_not_pushed() {
        let start = Instant::now();
        let mut history = EditHistory::new("a", QUIET);

        history.notify_changed("b", start);
        history.notify_changed("a", start + ms(50));
        assert!(!history.poll(start + ms(600)));
        assert_eq!(history.len(), 1);
        assert_eq!(history.state(), HistoryState::Idle);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = EditHistory::with_capacity(0, QUIET, 3);
        for value in 1..=5 {
            assert!(history.push_if_changed(value));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.entries().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn test_undo_flushes_pending_change() {
        let start = Instant::now();
        let mut history = EditHistory::new(0, QUIET);

        history.notify_changed(1, start);
        assert!(history.can_undo());

        assert_eq!(history.undo(), Some(&0));
        assert_eq!(history.state(), HistoryState::Idle);
        assert_eq!(history.redo(), Some(&1));
    }

    #[test]
    fn test_redo_at_newest_keeps_pending_change() {
        let start = Instant::now();
        let mut history = EditHistory::new(0, QUIET);

        history.notify_changed(1, start);
        assert_eq!(history.redo(), None);
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.state(), HistoryState::PendingPush);

        assert!(history.poll(start + QUIET));
        assert_eq!(history.current(), &1);
    }

    #[test]
    fn test_restored_snapshot_echo_is_ignored() {
        let start = Instant::now();
        let mut history = EditHistory::new(0, QUIET);
        history.push_if_changed(1);

        let restored = *history.undo().unwrap();
        history.notify_changed(restored, start);
        assert_eq!(history.state(), HistoryState::Idle);
        assert!(history.can_redo());
    }

    #[test]
    fn test_genuine_edit_after_undo_is_not_swallowed() {
        let start = Instant::now();
        let mut history = EditHistory::new(0, QUIET);
        history.push_if_changed(1);
        history.undo();

        history.notify_changed(7, start);
        assert_eq!(history.state(), HistoryState::PendingPush);
    }

    #[test]
    fn test_cancel_pending() {
        let start = Instant::now();
        let mut history = EditHistory::new(0, QUIET);

        history.notify_changed(1, start);
        history.cancel_pending();
        assert_eq!(history.state(), HistoryState::Idle);
        assert!(!history.poll(start + ms(5_000)));
        assert_eq!(history.len(), 1);
    }
}
