//! Undo/redo stacks of whole-path snapshots.
//!
//! Every user-initiated mutation records the pre-mutation state; undo and
//! redo swap states between the two stacks and never record themselves. The
//! stacks are bounded: once full, the oldest undo state is dropped.

use super::vertex_path::PathState;

/// Maximum number of retained undo states.
pub const MAX_HISTORY_STATES: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    undo: Vec<PathState>,
    redo: Vec<PathState>,
}

impl EditHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Push the pre-mutation state onto the undo stack and invalidate the
    /// redo stack. Call before applying a user-initiated mutation, never
    /// before undo/redo themselves.
    pub fn record(&mut self, state: PathState) {
        if self.undo.len() >= MAX_HISTORY_STATES {
            self.undo.remove(0);
        }
        self.undo.push(state);
        self.redo.clear();
    }

    /// Pop the most recent undo state, parking `current` on the redo stack.
    /// `None` when there is nothing to undo (the caller treats that as a
    /// silent no-op).
    pub fn undo(&mut self, current: PathState) -> Option<PathState> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Mirror of [`undo`](Self::undo).
    pub fn redo(&mut self, current: PathState) -> Option<PathState> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
