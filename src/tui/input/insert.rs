use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode;

pub(super) fn handle_insert(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.cancel_insert(),
        (_, KeyCode::Enter) => app.commit_insert(),

        // Home / Ctrl+A: jump to start of line
        (_, KeyCode::Home) => app.edit_cursor = 0,
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => app.edit_cursor = 0,
        // End / Ctrl+E: jump to end of line
        (_, KeyCode::End) => app.edit_cursor = app.edit_buffer.len(),
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_cursor = app.edit_buffer.len();
        }
        // Kill to start / end of line
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.drain(..app.edit_cursor);
            app.edit_cursor = 0;
        }
        (m, KeyCode::Char('k')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.truncate(app.edit_cursor);
        }
        // Word backspace (Ctrl+W, Alt/Ctrl+Backspace)
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => delete_word_left(app),
        (m, KeyCode::Backspace)
            if m.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) =>
        {
            delete_word_left(app);
        }

        // Word movement (Alt/Ctrl+arrow)
        (m, KeyCode::Left) if m.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) => {
            app.edit_cursor = unicode::word_boundary_left(&app.edit_buffer, app.edit_cursor);
        }
        (m, KeyCode::Right) if m.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) => {
            app.edit_cursor = unicode::word_boundary_right(&app.edit_buffer, app.edit_cursor);
        }
        // Single grapheme left/right
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_cursor = next;
            }
        }

        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_buffer.drain(prev..app.edit_cursor);
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_buffer.drain(app.edit_cursor..next);
            }
        }

        // Type character
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            let mut buf = [0u8; 4];
            app.edit_cursor = unicode::insert_limited(
                &mut app.edit_buffer,
                app.edit_cursor,
                c.encode_utf8(&mut buf),
                app.config.editor.char_limit,
            );
        }
        _ => {}
    }
}

fn delete_word_left(app: &mut App) {
    let start = unicode::word_boundary_left(&app.edit_buffer, app.edit_cursor);
    app.edit_buffer.drain(start..app.edit_cursor);
    app.edit_cursor = start;
}
