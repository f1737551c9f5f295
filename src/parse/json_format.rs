use serde_json::Value;

use crate::model::todo::{TodoItem, TodoList};

/// Parse the structured store format: a JSON array of
/// `{"text": ..., "state": "not_done" | "done" | "deleted"}` records.
///
/// Loading is best-effort. A record that does not deserialize is dropped (and
/// returned as raw JSON) while the rest still load. A document that is not a
/// JSON array at all is dropped as a whole. Blank input is an empty list.
pub fn parse_json(source: &str) -> (TodoList, Vec<String>) {
    if source.trim().is_empty() {
        return (TodoList::default(), Vec::new());
    }

    let records = match serde_json::from_str::<Vec<Value>>(source) {
        Ok(records) => records,
        Err(_) => return (TodoList::default(), vec![source.to_string()]),
    };

    let mut items = Vec::with_capacity(records.len());
    let mut dropped = Vec::new();
    for record in records {
        match serde_json::from_value::<TodoItem>(record.clone()) {
            Ok(item) => items.push(item),
            Err(_) => dropped.push(record.to_string()),
        }
    }
    (TodoList::new(items), dropped)
}

/// Pretty-printed JSON array, tombstones included.
pub fn serialize_json(list: &TodoList) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(list)?;
    out.push('\n');
    Ok(out)
}
