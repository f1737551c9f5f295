use crate::model::todo::TodoState;

pub const DEFAULT_UNDO_LIMIT: usize = 100;

/// One soft-delete that can be reverted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletedEntry {
    /// Storage index of the tombstoned item
    pub index: usize,
    /// State the item had right before it was deleted
    pub prior_state: TodoState,
}

/// Bounded stack of recent soft-deletes. Never persisted.
#[derive(Debug, Clone)]
pub struct UndoStack {
    entries: Vec<DeletedEntry>,
    limit: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl UndoStack {
    /// A limit of 0 is treated as 1 so the last delete can always be undone.
    pub fn new(limit: usize) -> Self {
        UndoStack {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Push a delete. Drops the oldest entry once the limit is exceeded.
    pub fn push(&mut self, entry: DeletedEntry) {
        self.entries.push(entry);
        if self.entries.len() > self.limit {
            self.entries.drain(..self.entries.len() - self.limit);
        }
    }

    pub fn pop(&mut self) -> Option<DeletedEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indices on the stack, oldest first
    pub fn indices(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.index).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: usize) -> DeletedEntry {
        DeletedEntry {
            index,
            prior_state: TodoState::NotDone,
        }
    }

    #[test]
    fn new_stack_is_empty() {
        let mut stack = UndoStack::default();
        assert!(stack.is_empty());
        assert!(stack.pop().is_none());
    }

    #[test]
    fn pops_most_recent_first() {
        let mut stack = UndoStack::default();
        stack.push(entry(3));
        stack.push(entry(1));
        assert_eq!(stack.indices(), vec![3, 1]);
        assert_eq!(stack.pop().map(|e| e.index), Some(1));
        assert_eq!(stack.pop().map(|e| e.index), Some(3));
        assert!(stack.is_empty());
    }

    #[test]
    fn limit_drops_oldest() {
        let mut stack = UndoStack::new(3);
        for i in 0..5 {
            stack.push(entry(i));
        }
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.indices(), vec![2, 3, 4]);
    }

    #[test]
    fn zero_limit_still_holds_one() {
        let mut stack = UndoStack::new(0);
        stack.push(entry(0));
        stack.push(entry(1));
        assert_eq!(stack.indices(), vec![1]);
    }
}
