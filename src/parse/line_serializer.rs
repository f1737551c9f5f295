use crate::model::todo::TodoList;

/// Serialize a todo list to the line-oriented store format.
///
/// Tombstones have no marker in this format and are left out. Newlines inside
/// a text would start a new record, so they are flattened to spaces.
pub fn serialize_lines(list: &TodoList) -> String {
    let mut out = String::new();
    for (_, item) in list.live() {
        if let Some(marker) = item.state.checkbox_char() {
            out.push(marker);
            out.push_str(&item.text.replace(['\r', '\n'], " "));
            out.push('\n');
        }
    }
    out
}
