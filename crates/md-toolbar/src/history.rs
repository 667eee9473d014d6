//! Snapshot-based undo/redo history.
//!
//! Each entry is a full copy of the buffer taken before a change. The undo stack is bounded
//! (oldest entries are evicted first); the redo stack is cleared whenever a new edit is
//! recorded, so history never branches.

use crate::text::char_len;
use std::collections::VecDeque;

/// Default maximum number of undo snapshots.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Default length delta (in characters) above which a typed edit is recorded.
pub const DEFAULT_COALESCE_THRESHOLD: usize = 10;

/// Bounded undo stack plus redo stack of whole-buffer snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<String>,
    redo_stack: Vec<String>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create an empty history holding at most `limit` undo snapshots (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Maximum undo depth.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo snapshots.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo snapshots.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Most recent undo snapshot, if any.
    pub fn last_snapshot(&self) -> Option<&str> {
        self.undo_stack.back().map(String::as_str)
    }

    /// Record a tracked edit: push `snapshot` and discard the redo stack.
    pub fn push(&mut self, snapshot: String) {
        if !self.redo_stack.is_empty() {
            tracing::trace!(dropped = self.redo_stack.len(), "clearing redo stack");
            self.redo_stack.clear();
        }
        self.push_undo(snapshot);
    }

    /// Step back: returns the snapshot to restore and stores `current` for redo.
    pub fn undo(&mut self, current: String) -> Option<String> {
        let snapshot = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(snapshot)
    }

    /// Step forward: returns the snapshot to restore and stores `current` for undo.
    pub fn redo(&mut self, current: String) -> Option<String> {
        let snapshot = self.redo_stack.pop()?;
        self.push_undo(current);
        Some(snapshot)
    }

    /// Coalesced capture of free-form typing.
    ///
    /// `previous` is recorded only when the undo stack is empty or when the length of
    /// `new_value` differs from `previous` by more than `threshold` characters. Runs of small
    /// edits are therefore not individually undoable. Returns `true` if a snapshot was pushed.
    pub fn record_typed_edit(&mut self, previous: &str, new_value: &str, threshold: usize) -> bool {
        let delta = char_len(new_value).abs_diff(char_len(previous));
        if self.undo_stack.is_empty() || delta > threshold {
            self.push(previous.to_string());
            true
        } else {
            false
        }
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, snapshot: String) {
        if self.undo_stack.len() >= self.limit {
            self.undo_stack.pop_front();
            tracing::trace!(limit = self.limit, "evicted oldest undo snapshot");
        }
        self.undo_stack.push_back(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_limit_does_not_preallocate() {
        let mut history = History::new(usize::MAX);
        assert_eq!(history.limit(), usize::MAX);
        history.push("a".to_string());
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_undo_redo_moves_snapshots_between_stacks() {
        let mut history = History::default();
        history.push("a".to_string());

        assert_eq!(history.undo("ab".to_string()).as_deref(), Some("a"));
        assert!(!history.can_undo());
        assert!(history.can_redo());

        assert_eq!(history.redo("a".to_string()).as_deref(), Some("ab"));
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = History::default();
        assert_eq!(history.undo("x".to_string()), None);
        assert_eq!(history.redo("x".to_string()), None);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_push_evicts_oldest_beyond_limit() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.push(i.to_string());
        }
        assert_eq!(history.undo_depth(), 3);
        assert_eq!(history.undo("5".to_string()).as_deref(), Some("4"));
        assert_eq!(history.undo("4".to_string()).as_deref(), Some("3"));
        assert_eq!(history.undo("3".to_string()).as_deref(), Some("2"));
        assert_eq!(history.undo("2".to_string()), None);
    }

    #[test]
    fn test_push_after_undo_keeps_limit() {
        let mut history = History::new(2);
        history.push("a".to_string());
        history.push("b".to_string());
        history.undo("c".to_string());
        history.push("z".to_string());
        assert!(!history.can_redo());
        assert_eq!(history.undo_depth(), 2);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::default();
        history.push("a".to_string());
        history.undo("b".to_string());
        history.push("c".to_string());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_typed_edit_bootstraps_then_coalesces() {
        let mut history = History::default();
        assert!(history.record_typed_edit("", "h", 10));
        assert!(!history.record_typed_edit("h", "he", 10));
        assert!(!history.record_typed_edit("he", "hello worl", 10));
        assert!(history.record_typed_edit("hello", "hello, this is a paste", 10));
        assert_eq!(history.last_snapshot(), Some("hello"));
        assert_eq!(history.undo_depth(), 2);
    }

    #[test]
    fn test_zero_limit_is_raised_to_one() {
        let history = History::new(0);
        assert_eq!(history.limit(), 1);
    }
}
