use crate::model::config::UndoRestore;
use crate::model::todo::{TodoItem, TodoList, TodoState};
use crate::ops::undo::{DeletedEntry, UndoStack};

/// Error type for todo store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoError {
    #[error("todo index out of range: {0}")]
    IndexOutOfRange(usize),
    #[error("nothing to undo")]
    EmptyUndoStack,
}

/// The todo list plus the undo history of its soft-deletes.
///
/// All state transitions go through here:
/// `NotDone <-> Done` via [`toggle_done`](Self::toggle_done), any live state
/// `-> Deleted` via [`soft_delete`](Self::soft_delete), and back via
/// [`undo`](Self::undo).
#[derive(Debug, Clone)]
pub struct TodoStore {
    list: TodoList,
    undo: UndoStack,
    restore: UndoRestore,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new(TodoList::default())
    }
}

impl TodoStore {
    /// Wrap a freshly loaded list. The undo stack always starts empty.
    pub fn new(list: TodoList) -> Self {
        TodoStore {
            list,
            undo: UndoStack::default(),
            restore: UndoRestore::default(),
        }
    }

    pub fn with_undo(list: TodoList, limit: usize, restore: UndoRestore) -> Self {
        TodoStore {
            list,
            undo: UndoStack::new(limit),
            restore,
        }
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn into_list(self) -> TodoList {
        self.list
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    pub fn live_count(&self) -> usize {
        self.list.live_count()
    }

    /// Live items with their storage indices, in display order
    pub fn live_items(&self) -> impl Iterator<Item = (usize, &TodoItem)> {
        self.list.live()
    }

    /// Append a new `NotDone` item and return its index.
    pub fn add(&mut self, text: impl Into<String>) -> usize {
        self.list.items.push(TodoItem::new(text));
        self.list.len() - 1
    }

    /// Replace the text of an item, leaving its state alone.
    pub fn edit(&mut self, index: usize, text: impl Into<String>) -> Result<(), TodoError> {
        let item = self.item_mut(index)?;
        item.text = text.into();
        Ok(())
    }

    /// Flip `NotDone` and `Done`. Tombstones are left untouched.
    /// Returns the resulting state.
    pub fn toggle_done(&mut self, index: usize) -> Result<TodoState, TodoError> {
        let item = self.item_mut(index)?;
        item.state = match item.state {
            TodoState::NotDone => TodoState::Done,
            TodoState::Done => TodoState::NotDone,
            TodoState::Deleted => TodoState::Deleted,
        };
        Ok(item.state)
    }

    /// Tombstone an item. Returns `true` if the state actually changed; only
    /// then is the delete recorded for undo.
    pub fn soft_delete(&mut self, index: usize) -> Result<bool, TodoError> {
        let item = self.item_mut(index)?;
        if item.state == TodoState::Deleted {
            return Ok(false);
        }
        let prior_state = item.state;
        item.state = TodoState::Deleted;
        self.undo.push(DeletedEntry { index, prior_state });
        Ok(true)
    }

    /// Bring back the most recently deleted item and return its index.
    pub fn undo(&mut self) -> Result<usize, TodoError> {
        let entry = self.undo.pop().ok_or(TodoError::EmptyUndoStack)?;
        let restore = self.restore;
        let item = self.item_mut(entry.index)?;
        item.state = match restore {
            UndoRestore::NotDone => TodoState::NotDone,
            UndoRestore::Prior => entry.prior_state,
        };
        Ok(entry.index)
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut TodoItem, TodoError> {
        self.list
            .get_mut(index)
            .ok_or(TodoError::IndexOutOfRange(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn states(store: &TodoStore) -> Vec<TodoState> {
        store.list().items.iter().map(|t| t.state).collect()
    }

    fn milk_and_dog() -> TodoStore {
        TodoStore::new(TodoList::new(vec![
            TodoItem::new("buy milk"),
            TodoItem::with_state("walk dog", TodoState::Done),
        ]))
    }

    #[test]
    fn add_appends_not_done() {
        let mut store = TodoStore::default();
        assert_eq!(store.add("a"), 0);
        assert_eq!(store.add("a"), 1);
        assert_eq!(store.list().len(), 2);
        assert_eq!(states(&store), vec![TodoState::NotDone, TodoState::NotDone]);
    }

    #[test]
    fn edit_keeps_state() {
        let mut store = milk_and_dog();
        store.edit(1, "walk cat").unwrap();
        assert_eq!(store.list().items[1].text, "walk cat");
        assert_eq!(store.list().items[1].state, TodoState::Done);
    }

    #[test]
    fn edit_out_of_range() {
        let mut store = milk_and_dog();
        assert_eq!(store.edit(2, "x"), Err(TodoError::IndexOutOfRange(2)));
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut store = milk_and_dog();
        assert_eq!(store.toggle_done(0), Ok(TodoState::Done));
        assert_eq!(store.toggle_done(0), Ok(TodoState::NotDone));
        assert_eq!(store.toggle_done(1), Ok(TodoState::NotDone));
        assert_eq!(store.toggle_done(1), Ok(TodoState::Done));
    }

    #[test]
    fn toggle_on_tombstone_is_noop() {
        let mut store = milk_and_dog();
        store.soft_delete(0).unwrap();
        assert_eq!(store.toggle_done(0), Ok(TodoState::Deleted));
        assert_eq!(store.toggle_done(9), Err(TodoError::IndexOutOfRange(9)));
    }

    #[test]
    fn delete_then_undo_scenario() {
        let mut store = milk_and_dog();
        assert_eq!(store.soft_delete(0), Ok(true));
        assert_eq!(states(&store), vec![TodoState::Deleted, TodoState::Done]);
        assert_eq!(store.undo_stack().indices(), vec![0]);

        assert_eq!(store.undo(), Ok(0));
        assert_eq!(states(&store), vec![TodoState::NotDone, TodoState::Done]);
        assert!(store.undo_stack().is_empty());
    }

    #[test]
    fn repeated_delete_pushes_once() {
        let mut store = milk_and_dog();
        assert_eq!(store.soft_delete(1), Ok(true));
        assert_eq!(store.soft_delete(1), Ok(false));
        assert_eq!(store.undo_stack().len(), 1);
    }

    #[test]
    fn delete_keeps_indices_stable() {
        let mut store = milk_and_dog();
        store.soft_delete(0).unwrap();
        let idx = store.add("third");
        assert_eq!(idx, 2);
        assert_eq!(store.list().items[1].text, "walk dog");
    }

    #[test]
    fn undo_on_empty_stack() {
        let mut store = milk_and_dog();
        assert_eq!(store.undo(), Err(TodoError::EmptyUndoStack));
        assert_eq!(states(&store), vec![TodoState::NotDone, TodoState::Done]);
    }

    #[test]
    fn undo_reopens_done_item_by_default() {
        let mut store = milk_and_dog();
        store.soft_delete(1).unwrap();
        store.undo().unwrap();
        assert_eq!(store.list().items[1].state, TodoState::NotDone);
    }

    #[test]
    fn undo_prior_policy_restores_done() {
        let list = milk_and_dog().into_list();
        let mut store = TodoStore::with_undo(list, 10, UndoRestore::Prior);
        store.soft_delete(1).unwrap();
        store.undo().unwrap();
        assert_eq!(store.list().items[1].state, TodoState::Done);
    }

    #[test]
    fn undo_is_lifo() {
        let mut store = milk_and_dog();
        store.soft_delete(1).unwrap();
        store.soft_delete(0).unwrap();
        assert_eq!(store.undo(), Ok(0));
        assert_eq!(states(&store), vec![TodoState::NotDone, TodoState::Deleted]);
        assert_eq!(store.undo(), Ok(1));
        assert_eq!(store.undo(), Err(TodoError::EmptyUndoStack));
    }

    #[test]
    fn bounded_undo_forgets_oldest_delete() {
        let mut store = TodoStore::with_undo(TodoList::default(), 2, UndoRestore::NotDone);
        for text in ["a", "b", "c"] {
            store.add(text);
        }
        for i in 0..3 {
            store.soft_delete(i).unwrap();
        }
        assert_eq!(store.undo(), Ok(2));
        assert_eq!(store.undo(), Ok(1));
        assert_eq!(store.undo(), Err(TodoError::EmptyUndoStack));
        assert_eq!(store.list().items[0].state, TodoState::Deleted);
    }

    #[test]
    fn any_add_delete_undo_sequence_reopens_item() {
        for n in 1..6 {
            for i in 0..n {
                let mut store = TodoStore::default();
                for k in 0..n {
                    store.add(format!("item {k}"));
                    if k % 2 == 1 {
                        store.toggle_done(k).unwrap();
                    }
                }
                store.soft_delete(i).unwrap();
                store.undo().unwrap();
                assert_eq!(store.list().items[i].state, TodoState::NotDone);
                assert_eq!(store.live_count(), n);
            }
        }
    }
}
