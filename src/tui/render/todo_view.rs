use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::todo::TodoState;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

const PROMPT: &str = "What would you like to get done?";
const EMPTY_LIST: &str = "Nothing to do.";

const NORMAL_HINTS: &[(&str, &str)] = &[
    ("q", "quit"),
    ("i", "insert"),
    ("j/k", "move"),
    ("enter", "toggle"),
    ("c", "change"),
    ("d", "delete"),
    ("u", "undo"),
    ("?", "help"),
];
const INSERT_HINTS: &[(&str, &str)] = &[("esc", "normal"), ("enter", "add")];
const CHANGE_HINTS: &[(&str, &str)] = &[("esc", "cancel"), ("enter", "save change")];

pub fn render_mode_line(frame: &mut Frame, app: &App, area: Rect) {
    let label = match app.mode {
        Mode::Normal => "\u{22C9} Normal",
        Mode::Insert => "\u{2328} Insert",
    };
    let style = Style::default()
        .fg(app.theme.highlight)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(Span::styled(label, style)), area);
}

pub fn render_key_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match (app.mode, app.editing) {
        (Mode::Normal, _) => NORMAL_HINTS,
        (Mode::Insert, None) => INSERT_HINTS,
        (Mode::Insert, Some(_)) => CHANGE_HINTS,
    };
    let key_style = Style::default().fg(app.theme.text).bg(app.theme.background);
    let desc_style = Style::default().fg(app.theme.dim).bg(app.theme.background);

    let mut spans = Vec::new();
    let mut used = 0;
    for (i, (key, desc)) in hints.iter().enumerate() {
        let sep = if i == 0 { "" } else { "  " };
        let width = sep.len() + unicode::display_width(key) + 1 + unicode::display_width(desc);
        if used + width > area.width as usize {
            break;
        }
        used += width;
        spans.push(Span::styled(format!("{sep}{key}"), key_style));
        spans.push(Span::styled(format!(" {desc}"), desc_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.background);
    frame.render_widget(Paragraph::new(Span::styled(PROMPT, style)), area);
}

/// The single-line text input. In Insert mode it also places the terminal
/// cursor.
pub fn render_input_line(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = app.mode == Mode::Insert;
    let prefix = if app.editing.is_some() { "\u{270E} " } else { "> " };
    let prefix_style = Style::default()
        .fg(if active { app.theme.highlight } else { app.theme.dim })
        .bg(bg);

    let avail = (area.width as usize).saturating_sub(unicode::display_width(prefix));
    let mut spans = vec![Span::styled(prefix, prefix_style)];

    if app.edit_buffer.is_empty() {
        spans.push(Span::styled(
            unicode::truncate_to_width(&app.config.editor.placeholder, avail),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        let (visible, _) = input_window(&app.edit_buffer, app.edit_cursor, avail);
        let fg = if active { app.theme.text_bright } else { app.theme.dim };
        spans.push(Span::styled(visible.to_string(), Style::default().fg(fg).bg(bg)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if active && avail > 0 {
        let (_, col) = input_window(&app.edit_buffer, app.edit_cursor, avail);
        let x = area.x + unicode::display_width(prefix) as u16 + col as u16;
        frame.set_cursor_position((x, area.y));
    }
}

/// Scroll the input so the cursor stays within `width` cells. Returns the
/// visible tail of the text and the cursor column inside it.
fn input_window(text: &str, cursor: usize, width: usize) -> (&str, usize) {
    if width == 0 {
        return ("", 0);
    }
    let mut start = 0;
    // The cursor needs a cell of its own, so col must stay < width
    while unicode::byte_offset_to_display_col(&text[start..], cursor - start) >= width {
        match unicode::next_grapheme_boundary(text, start) {
            Some(next) if next <= cursor => start = next,
            _ => break,
        }
    }
    let col = unicode::byte_offset_to_display_col(&text[start..], cursor - start);
    (&text[start..], col)
}

/// Live todos as `[x] text` rows. The cursor row gets a `> ` pointer in
/// Normal mode.
pub fn render_todo_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;
    if height == 0 {
        return;
    }

    let live: Vec<(usize, &str, TodoState)> = app
        .store
        .live_items()
        .map(|(i, t)| (i, t.text.as_str(), t.state))
        .collect();

    if live.is_empty() {
        let style = Style::default().fg(app.theme.dim).bg(bg);
        frame.render_widget(Paragraph::new(Span::styled(EMPTY_LIST, style)), area);
        return;
    }

    // Keep the cursor row in view
    if let Some(pos) = live.iter().position(|(i, _, _)| *i == app.cursor) {
        if pos < app.scroll_offset {
            app.scroll_offset = pos;
        } else if pos >= app.scroll_offset + height {
            app.scroll_offset = pos + 1 - height;
        }
    }
    app.scroll_offset = app.scroll_offset.min(live.len().saturating_sub(height));

    let show_pointer = app.mode == Mode::Normal;
    let text_width = (area.width as usize).saturating_sub(6);
    let mut lines = Vec::with_capacity(height);

    for &(index, text, state) in live.iter().skip(app.scroll_offset).take(height) {
        let selected = show_pointer && index == app.cursor;
        let row_bg = if selected { app.theme.cursor_bg } else { bg };
        let text_fg = match state {
            TodoState::Done => app.theme.done,
            _ => app.theme.text,
        };
        let mut text_style = Style::default().fg(text_fg).bg(row_bg);
        if selected {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }
        let marker = state.checkbox_char().unwrap_or(' ');

        lines.push(Line::from(vec![
            Span::styled(
                if selected { "> " } else { "  " },
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ),
            Span::styled(
                format!("[{}] ", marker),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ),
            Span::styled(unicode::truncate_to_width(text, text_width), text_style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
