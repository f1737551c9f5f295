use serde::Serialize;

use crate::model::todo::{TodoItem, TodoList, TodoState};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoJson {
    pub text: String,
    pub done: bool,
}

pub fn todo_to_json(item: &TodoItem) -> TodoJson {
    TodoJson {
        text: item.text.clone(),
        done: item.state == TodoState::Done,
    }
}

/// Live todos in display order
pub fn list_to_json(list: &TodoList) -> Vec<TodoJson> {
    list.live().map(|(_, item)| todo_to_json(item)).collect()
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// `[x] text` or `[ ] text`. None for tombstones.
pub fn format_todo_line(item: &TodoItem) -> Option<String> {
    let marker = item.state.checkbox_char()?;
    Some(format!("[{}] {}", marker, item.text))
}

/// One line per live todo
pub fn format_list_lines(list: &TodoList) -> Vec<String> {
    list.live()
        .filter_map(|(_, item)| format_todo_line(item))
        .collect()
}
