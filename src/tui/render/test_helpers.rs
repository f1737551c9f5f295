use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store_io::StoreLocation;
use crate::model::config::{Config, InitialMode, StoreFormat};
use crate::model::todo::{TodoItem, TodoList, TodoState};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App in Normal mode over the given todos. The store path points at a
/// directory that does not exist, so nothing here ever touches disk unless a
/// test saves explicitly.
pub fn app_with_todos(items: &[(&str, TodoState)]) -> App {
    let list: TodoList = items
        .iter()
        .map(|(text, state)| TodoItem::with_state(*text, *state))
        .collect();
    let mut config = Config::default();
    config.editor.initial_mode = InitialMode::Normal;
    let location = StoreLocation {
        path: PathBuf::from("/nonexistent/tick-test/todos.json"),
        format: StoreFormat::Json,
    };
    App::new(list, config, location)
}
