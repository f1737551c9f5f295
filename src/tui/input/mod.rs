mod insert;
mod normal;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use crate::util::unicode;

use insert::handle_insert;
use normal::handle_normal;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    // Ctrl+C aborts from any mode without saving
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit_without_saving();
        return;
    }

    // Help overlay intercepts all input
    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter
        ) {
            app.show_help = false;
        }
        return;
    }

    match app.mode {
        Mode::Normal => handle_normal(app, key),
        Mode::Insert => handle_insert(app, key),
    }
}

/// Handle a bracketed paste. Only active in Insert mode; newlines become
/// spaces and the char limit still applies.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.mode != Mode::Insert || text.is_empty() {
        return;
    }
    let clean = text.replace("\r\n", " ").replace(['\r', '\n'], " ");
    app.edit_cursor = unicode::insert_limited(
        &mut app.edit_buffer,
        app.edit_cursor,
        &clean,
        app.config.editor.char_limit,
    );
}
