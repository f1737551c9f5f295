use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::todo::TodoState;
use crate::tui::app::App;
use crate::util::unicode;

/// Render the status row (bottom of screen): the last message on the left,
/// progress and an unsaved marker on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let live = app.store.live_count();
    let done = app
        .store
        .live_items()
        .filter(|(_, t)| t.state == TodoState::Done)
        .count();
    let summary = format!(
        "{}/{} done{}",
        done,
        live,
        if app.dirty { " [+]" } else { "" }
    );
    let summary_width = unicode::display_width(&summary);

    let mut spans = Vec::new();
    let mut used = 0;
    if let Some(status) = &app.status {
        let fg = if status.is_error {
            app.theme.error
        } else {
            app.theme.text
        };
        let room = width.saturating_sub(summary_width + 1);
        let text = unicode::truncate_to_width(&status.text, room.max(1).min(width));
        used = unicode::display_width(&text);
        spans.push(Span::styled(text, Style::default().fg(fg).bg(bg)));
    }

    if used + summary_width < width {
        let padding = width - used - summary_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            summary,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
