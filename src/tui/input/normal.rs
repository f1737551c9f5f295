use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_normal(app: &mut App, key: KeyEvent) {
    // Shift is part of the char itself (`G`, `Q`, `?`)
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.save_and_quit(),
        KeyCode::Char('Q') => app.quit_without_saving(),

        // Input line
        KeyCode::Char('i') => app.enter_insert(),
        KeyCode::Char('c') => app.begin_change(),

        // Movement
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.jump_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.jump_to_bottom(),

        // Todo commands
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Char(' ') => app.toggle_current(),
        KeyCode::Char('d') => app.delete_current(),
        KeyCode::Char('u') => app.undo_delete(),

        KeyCode::Char('w') => app.save_in_place(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}
