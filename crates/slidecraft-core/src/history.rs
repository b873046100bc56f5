//! Linear undo/redo history of snapshots.

/// Default number of undo states kept.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Two-stack undo history. Snapshots are cheap when `T` is an `Arc`.
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    limit: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_limit(MAX_UNDO_HISTORY)
    }
}

impl<T> History<T> {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state before a change. Clears the redo tail.
    ///
    /// Returns the oldest snapshot if the limit forced it out.
    pub fn push(&mut self, snapshot: T) -> Option<T> {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.limit {
            log::debug!("Undo history full, dropped oldest snapshot");
            return Some(self.undo_stack.remove(0));
        }
        None
    }

    /// Put back a snapshot that [`History::push`] evicted. Ignored if the
    /// history is full again.
    pub fn restore_oldest(&mut self, snapshot: T) {
        if self.undo_stack.len() < self.limit {
            self.undo_stack.insert(0, snapshot);
        }
    }

    /// Step back. Returns the state to restore, after saving `current` for redo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(snapshot)
    }

    /// Step forward. Returns the state to restore, after saving `current` for undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(snapshot)
    }

    /// Drop the most recent undo snapshot without restoring it.
    pub fn discard_latest(&mut self) -> Option<T> {
        self.undo_stack.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo steps available; the position of the live state.
    pub fn index(&self) -> usize {
        self.undo_stack.len()
    }

    /// Total snapshots held.
    pub fn len(&self) -> usize {
        self.undo_stack.len() + self.redo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo() {
        let mut history = History::default();
        history.push(1);
        history.push(2);

        assert_eq!(history.undo(3), Some(2));
        assert_eq!(history.undo(2), Some(1));
        assert_eq!(history.undo(1), None);
        assert!(history.can_redo());

        assert_eq!(history.redo(1), Some(2));
        assert_eq!(history.redo(2), Some(3));
        assert_eq!(history.redo(3), None);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::default();
        history.push("a");
        assert_eq!(history.undo("b"), Some("a"));
        history.push("a");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(3);
        for i in 0..5 {
            history.push(i);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(5), Some(4));
        assert_eq!(history.undo(4), Some(3));
        assert_eq!(history.undo(3), Some(2));
        assert_eq!(history.undo(2), None);
    }

    #[test]
    fn test_discard_latest() {
        let mut history = History::default();
        history.push(1);
        history.push(2);
        assert_eq!(history.discard_latest(), Some(2));
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn test_push_returns_evicted_and_restore() {
        let mut history = History::with_limit(2);
        assert_eq!(history.push(1), None);
        assert_eq!(history.push(2), None);
        assert_eq!(history.push(3), Some(1));

        history.discard_latest();
        history.restore_oldest(1);
        assert_eq!(history.undo(9), Some(2));
        assert_eq!(history.undo(2), Some(1));

        // No room: the restore is dropped.
        let mut full = History::with_limit(1);
        full.push(5);
        full.restore_oldest(4);
        assert_eq!(full.index(), 1);
        assert_eq!(full.undo(6), Some(5));
    }
}
