//! Snapshot-based undo/redo history.
//!
//! Every mutating edit pushes a deep copy of the model as it was *before* the
//! edit. Undoing swaps the live model for that copy and keeps the live model
//! on the redo side, so undo followed by redo always lands on the exact state
//! that was current before the undo.

use std::collections::VecDeque;

use cutline_core::defaults;

use crate::track::Track;

/// An immutable deep copy of the undoable part of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tracks: Vec<Track>,
    pub duration: f64,
}

impl Snapshot {
    /// Deep-copy the given model state. The snapshot never aliases live items.
    pub fn capture(tracks: &[Track], duration: f64) -> Self {
        Self {
            tracks: tracks.to_vec(),
            duration,
        }
    }
}

/// Linear undo/redo history with a bounded depth.
#[derive(Debug)]
pub struct History {
    /// Pre-edit states, most recent last.
    past: VecDeque<Snapshot>,
    /// States undone away from, most recent last.
    future: Vec<Snapshot>,
    /// Maximum history depth.
    max_depth: usize,
}

impl History {
    /// Create an empty history keeping at most `max_depth` undo steps.
    pub fn new(max_depth: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record the state captured just before an edit.
    ///
    /// Anything that was undone is discarded: a new edit after an undo prunes
    /// the redo branch.
    pub fn checkpoint(&mut self, before: Snapshot) {
        self.future.clear();
        self.past.push_back(before);
        if self.past.len() > self.max_depth {
            self.past.pop_front();
        }
    }

    /// Step back. `current` is the live state, kept for redo. Returns the
    /// state to restore, or `None` at the oldest entry.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward again after an undo. Returns `None` at the newest entry.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.past.push_back(current);
        Some(next)
    }

    /// Drop the most recent checkpoint without restoring it.
    ///
    /// Used when an in-progress gesture is rolled back by the caller, which
    /// restores the returned snapshot itself.
    pub fn discard_last(&mut self) -> Option<Snapshot> {
        self.past.pop_back()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Cursor position: the number of steps that can be undone.
    pub fn index(&self) -> usize {
        self.past.len()
    }

    /// Total retained entries on both sides of the cursor.
    pub fn len(&self) -> usize {
        self.past.len() + self.future.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(defaults::HISTORY_DEPTH)
    }
}
