use crate::model::todo::{TodoItem, TodoList, TodoState};

/// Parse the line-oriented store format.
///
/// One todo per line: the first character is the state marker (`x` done,
/// space not done) and the rest of the line is the text. Blank lines are
/// ignored. Lines with any other marker are returned as dropped so the caller
/// can keep them somewhere instead of silently losing them.
pub fn parse_lines(source: &str) -> (TodoList, Vec<String>) {
    let mut items = Vec::new();
    let mut dropped = Vec::new();

    for line in source.lines() {
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(item) => items.push(item),
            None => dropped.push(line.to_string()),
        }
    }

    (TodoList::new(items), dropped)
}

fn parse_line(line: &str) -> Option<TodoItem> {
    let marker = line.chars().next()?;
    let state = state_for_marker(marker)?;
    let text = &line[marker.len_utf8()..];
    Some(TodoItem::with_state(text, state))
}

fn state_for_marker(c: char) -> Option<TodoState> {
    match c {
        'x' => Some(TodoState::Done),
        ' ' => Some(TodoState::NotDone),
        _ => None,
    }
}
