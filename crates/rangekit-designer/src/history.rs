//! Snapshot-based undo/redo.
//!
//! The editor records the state *before* each committed mutation. Undo swaps
//! the current state for the most recent snapshot and parks the current one
//! on the redo stack; any new recording clears the redo stack.

#[derive(Debug, Clone)]
pub struct History<S> {
    undo_stack: Vec<S>,
    redo_stack: Vec<S>,
    limit: usize,
}

impl<S> History<S> {
    /// Creates an empty history keeping at most `limit` undo steps (minimum 1).
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Records the state preceding a mutation.
    pub fn record(&mut self, before: S) {
        self.undo_stack.push(before);
        self.redo_stack.clear();
        self.trim();
    }

    /// Returns the state to restore, taking ownership of `current` for redo.
    pub fn undo(&mut self, current: S) -> Option<S> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Returns the state to restore, taking ownership of `current` for undo.
    pub fn redo(&mut self, current: S) -> Option<S> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn trim(&mut self) {
        if self.undo_stack.len() > self.limit {
            let excess = self.undo_stack.len() - self.limit;
            self.undo_stack.drain(..excess);
        }
    }
}
