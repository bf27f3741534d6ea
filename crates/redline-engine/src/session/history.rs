use std::collections::VecDeque;

use crate::codec::ChangeRecord;

/// Session state as it was before a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub annotated: String,
    pub plain: String,
    pub changes: Vec<ChangeRecord>,
}

/// Bounded undo stack. The oldest snapshot is evicted first.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<Snapshot>,
    depth: usize,
}

impl History {
    pub fn new(depth: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(depth.min(64)),
            depth,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.depth == 0 {
            return;
        }
        if self.entries.len() == self.depth {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}
