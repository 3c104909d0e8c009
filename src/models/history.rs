// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo history of notebook states.

use super::notebook::Snapshot;

/// Bounded undo/redo stacks of notebook snapshots.
#[derive(Debug)]
pub struct History {
    /// Undo stack (past states)
    undo_stack: Vec<Snapshot>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<Snapshot>,
    /// Maximum number of undo states kept
    max_size: usize,
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Record the state from before a change.
    pub fn push(&mut self, previous: Snapshot) {
        self.undo_stack.push(previous);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        // A new change invalidates anything that was undone
        self.redo_stack.clear();
    }

    /// Swap `current` for the previous state.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Swap `current` for the state that was undone last.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(categories: &[&str]) -> Snapshot {
        Snapshot {
            notes: Vec::new(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            filters: Vec::new(),
            selected_category: "General".to_string(),
        }
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = History::new(10);
        history.push(snapshot(&["General"]));

        let restored = history.undo(snapshot(&["General", "Work"])).unwrap();
        assert_eq!(restored.categories, vec!["General"]);
        assert!(history.can_redo());

        let again = history.redo(restored).unwrap();
        assert_eq!(again.categories, vec!["General", "Work"]);
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new(10);
        history.push(snapshot(&["General"]));
        let _ = history.undo(snapshot(&["General", "A"]));
        history.push(snapshot(&["General"]));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_size_limit_drops_oldest() {
        let mut history = History::new(2);
        history.push(snapshot(&["1"]));
        history.push(snapshot(&["2"]));
        history.push(snapshot(&["3"]));

        let current = snapshot(&["4"]);
        let a = history.undo(current).unwrap();
        let b = history.undo(a.clone()).unwrap();
        assert_eq!(a.categories, vec!["3"]);
        assert_eq!(b.categories, vec!["2"]);
        assert!(history.undo(b).is_none());
    }
}
