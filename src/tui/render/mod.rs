pub mod help_overlay;
pub mod status_row;
pub mod todo_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let hint_rows = if app.config.ui.show_key_hints { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),         // mode line
            Constraint::Length(hint_rows), // key hints
            Constraint::Length(1),         // spacer
            Constraint::Length(1),         // prompt
            Constraint::Length(1),         // input line
            Constraint::Length(1),         // spacer
            Constraint::Min(1),            // todo list
            Constraint::Length(1),         // status row
        ])
        .split(area);

    todo_view::render_mode_line(frame, app, chunks[0]);
    if hint_rows > 0 {
        todo_view::render_key_hints(frame, app, chunks[1]);
    }
    todo_view::render_prompt(frame, app, chunks[3]);
    todo_view::render_input_line(frame, app, chunks[4]);
    todo_view::render_todo_list(frame, app, chunks[6]);
    status_row::render_status_row(frame, app, chunks[7]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}
