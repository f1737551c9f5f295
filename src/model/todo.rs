use serde::{Deserialize, Serialize};

/// Lifecycle state of a todo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoState {
    NotDone,
    Done,
    /// Tombstone: logically removed, slot kept for undo and index stability
    Deleted,
}

impl TodoState {
    /// The character used inside the checkbox `[ ]`. Tombstones have none.
    pub fn checkbox_char(self) -> Option<char> {
        match self {
            TodoState::NotDone => Some(' '),
            TodoState::Done => Some('x'),
            TodoState::Deleted => None,
        }
    }

    pub fn is_live(self) -> bool {
        self != TodoState::Deleted
    }
}

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
    pub state: TodoState,
}

impl TodoItem {
    pub fn new(text: impl Into<String>) -> Self {
        TodoItem {
            text: text.into(),
            state: TodoState::NotDone,
        }
    }

    pub fn with_state(text: impl Into<String>, state: TodoState) -> Self {
        TodoItem {
            text: text.into(),
            state,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state.is_live()
    }
}

/// Ordered todo items. Insertion order is display order and persisted order.
///
/// Soft-deleted items stay in place, so an index keeps naming the same item
/// until the list is rewritten by [`TodoList::compacted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    pub items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new(items: Vec<TodoItem>) -> Self {
        TodoList { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TodoItem> {
        self.items.get_mut(index)
    }

    /// Whether `index` names an existing, non-deleted item
    pub fn is_live(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(TodoItem::is_live)
    }

    /// Live items with their storage indices, in display order
    pub fn live(&self) -> impl Iterator<Item = (usize, &TodoItem)> {
        self.items.iter().enumerate().filter(|(_, t)| t.is_live())
    }

    pub fn live_count(&self) -> usize {
        self.items.iter().filter(|t| t.is_live()).count()
    }

    /// A copy with every tombstone physically removed. Indices are renumbered.
    pub fn compacted(&self) -> TodoList {
        TodoList {
            items: self.items.iter().filter(|t| t.is_live()).cloned().collect(),
        }
    }
}

impl FromIterator<TodoItem> for TodoList {
    fn from_iter<I: IntoIterator<Item = TodoItem>>(iter: I) -> Self {
        TodoList {
            items: iter.into_iter().collect(),
        }
    }
}
