use crate::layer::Layer;
use std::collections::VecDeque;
use std::sync::Arc;

/// Default number of undo snapshots kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A full, immutable copy of the layer sequence at a checkpoint.
///
/// Snapshots are shared through an `Arc` so cloning an editor state does not
/// deep-copy its history.
pub type Snapshot = Arc<[Layer]>;

/// Linear undo/redo timeline of layer snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    /// Oldest first; the back is the most recent checkpoint
    past: VecDeque<Snapshot>,
    /// Front is the next state to redo
    future: VecDeque<Snapshot>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Records `layers` as a checkpoint and discards everything redoable
    pub fn push(&mut self, layers: &[Layer]) {
        self.past.push_back(Arc::from(layers));
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Swaps `current` for the most recent checkpoint.
    ///
    /// Returns the restored layers, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &[Layer]) -> Option<Vec<Layer>> {
        let snapshot = self.past.pop_back()?;
        self.future.push_front(Arc::from(current));
        Some(snapshot.to_vec())
    }

    /// Swaps `current` for the next redoable state
    pub fn redo(&mut self, current: &[Layer]) -> Option<Vec<Layer>> {
        let snapshot = self.future.pop_front()?;
        self.past.push_back(Arc::from(current));
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        Some(snapshot.to_vec())
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past(&self) -> impl Iterator<Item = &Snapshot> {
        self.past.iter()
    }

    pub fn future(&self) -> impl Iterator<Item = &Snapshot> {
        self.future.iter()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Clear the whole timeline
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
