use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::recovery::recovery_log_path;
use crate::io::store_io::{self, StoreError, StoreLocation};
use crate::model::config::{Config, InitialMode};
use crate::model::todo::{TodoList, TodoState};
use crate::ops::navigate;
use crate::ops::{TodoError, TodoStore};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation and commands
    Normal,
    /// Text entry into the input line
    Insert,
}

/// One-line message shown in the status row until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub store: TodoStore,
    pub location: StoreLocation,
    pub config: Config,
    pub theme: Theme,
    pub mode: Mode,
    /// Storage index of the selected todo
    pub cursor: usize,
    /// First visible row of the todo list
    pub scroll_offset: usize,
    /// Text in the input line
    pub edit_buffer: String,
    /// Byte offset into `edit_buffer`
    pub edit_cursor: usize,
    /// Index of the todo being changed, None when adding a new one
    pub editing: Option<usize>,
    /// Unsent new-todo text, parked while an existing todo is being changed
    pub draft: String,
    pub should_quit: bool,
    pub show_help: bool,
    pub status: Option<StatusMessage>,
    /// Unsaved changes
    pub dirty: bool,
}

impl App {
    pub fn new(list: TodoList, config: Config, location: StoreLocation) -> Self {
        let theme = Theme::from_config(&config.ui);
        let mode = match config.editor.initial_mode {
            InitialMode::Insert => Mode::Insert,
            InitialMode::Normal => Mode::Normal,
        };
        let cursor = navigate::normalize(&list, 0);
        let store = TodoStore::with_undo(
            list,
            config.editor.undo_limit,
            config.editor.undo_restores,
        );

        App {
            store,
            location,
            config,
            theme,
            mode,
            cursor,
            scroll_offset: 0,
            edit_buffer: String::new(),
            edit_cursor: 0,
            editing: None,
            draft: String::new(),
            should_quit: false,
            show_help: false,
            status: None,
            dirty: false,
        }
    }

    pub fn list(&self) -> &TodoList {
        self.store.list()
    }

    /// Whether the cursor rests on a live todo (false when none exist)
    pub fn has_selection(&self) -> bool {
        self.list().is_live(self.cursor)
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn move_down(&mut self) {
        self.cursor = navigate::move_down(self.list(), self.cursor);
    }

    pub fn move_up(&mut self) {
        self.cursor = navigate::move_up(self.list(), self.cursor);
    }

    pub fn jump_to_top(&mut self) {
        if let Some(i) = navigate::first_live(self.list()) {
            self.cursor = i;
        }
    }

    pub fn jump_to_bottom(&mut self) {
        if let Some(i) = navigate::last_live(self.list()) {
            self.cursor = i;
        }
    }

    // -----------------------------------------------------------------------
    // Todo commands
    // -----------------------------------------------------------------------

    pub fn toggle_current(&mut self) {
        if !self.has_selection() {
            return;
        }
        match self.store.toggle_done(self.cursor) {
            Ok(_) => self.dirty = true,
            Err(e) => self.report_todo_error(e),
        }
    }

    pub fn delete_current(&mut self) {
        if !self.has_selection() {
            return;
        }
        match self.store.soft_delete(self.cursor) {
            Ok(true) => {
                self.dirty = true;
                self.cursor = navigate::reposition_after_delete(self.list(), self.cursor);
                self.set_status("deleted (u to undo)");
            }
            Ok(false) => {}
            Err(e) => self.report_todo_error(e),
        }
    }

    pub fn undo_delete(&mut self) {
        match self.store.undo() {
            Ok(index) => {
                self.dirty = true;
                self.cursor = index;
                self.set_status("restored");
            }
            Err(e) => self.report_todo_error(e),
        }
    }

    fn report_todo_error(&mut self, e: TodoError) {
        match e {
            TodoError::EmptyUndoStack => {
                debug!("undo with an empty stack");
                self.set_status(e.to_string());
            }
            TodoError::IndexOutOfRange(_) => {
                warn!("{} (cursor {})", e, self.cursor);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Input line
    // -----------------------------------------------------------------------

    /// Switch to Insert mode to add new todos. Any unsent draft is kept.
    pub fn enter_insert(&mut self) {
        self.mode = Mode::Insert;
        self.editing = None;
        self.edit_cursor = self.edit_buffer.len();
    }

    /// Switch to Insert mode with the selected todo's text loaded for editing.
    pub fn begin_change(&mut self) {
        let Some(item) = self.list().get(self.cursor).filter(|t| t.is_live()) else {
            return;
        };
        let text = item.text.clone();
        self.draft = std::mem::replace(&mut self.edit_buffer, text);
        self.edit_cursor = self.edit_buffer.len();
        self.editing = Some(self.cursor);
        self.mode = Mode::Insert;
    }

    /// Leave Insert mode. A change in progress is thrown away; a draft for a
    /// new todo stays in the input line.
    pub fn cancel_insert(&mut self) {
        if self.editing.take().is_some() {
            self.restore_draft();
        }
        self.mode = Mode::Normal;
        self.cursor = navigate::normalize(self.list(), self.cursor);
    }

    /// Send the input line: overwrite the todo being changed (and go back to
    /// Normal), or append a new todo and stay in Insert. Blank input is ignored.
    pub fn commit_insert(&mut self) {
        if self.edit_buffer.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.edit_buffer);
        self.edit_cursor = 0;

        match self.editing.take() {
            Some(index) => {
                if let Err(e) = self.store.edit(index, text) {
                    self.report_todo_error(e);
                }
                self.restore_draft();
                self.mode = Mode::Normal;
                self.cursor = navigate::normalize(self.list(), index);
            }
            None => {
                let index = self.store.add(text);
                debug!("added todo {}", index);
                if !self.has_selection() {
                    self.cursor = index;
                }
            }
        }
        self.dirty = true;
    }

    /// Put the parked new-todo draft back into the input line.
    fn restore_draft(&mut self) {
        self.edit_buffer = std::mem::take(&mut self.draft);
        self.edit_cursor = self.edit_buffer.len();
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Write the whole list to the store file.
    pub fn save(&mut self) -> Result<(), StoreError> {
        store_io::save_store(
            &self.location,
            self.list(),
            self.config.store.compact_on_save,
        )?;
        self.dirty = false;
        Ok(())
    }

    /// `w`: save and report the outcome in the status row.
    pub fn save_in_place(&mut self) {
        match self.save() {
            Ok(()) => {
                let n = self.store.live_count();
                self.set_status(format!(
                    "saved {} todo{} to {}",
                    n,
                    if n == 1 { "" } else { "s" },
                    self.location.path.display()
                ));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// `q`: save, then quit. A failed save keeps the editor open.
    pub fn save_and_quit(&mut self) {
        match self.save() {
            Ok(()) => self.should_quit = true,
            Err(e) => self.set_error(format!("{} (Q quits without saving)", e)),
        }
    }

    pub fn quit_without_saving(&mut self) {
        if self.dirty {
            info!("quitting with unsaved changes");
        }
        self.should_quit = true;
    }
}

/// Load the store and run the editor until the user quits.
pub fn run(config: Config, location: StoreLocation) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = store_io::load_store(&location)?;
    let mut app = App::new(loaded.list, config, location);
    if loaded.dropped > 0 {
        let log_path = recovery_log_path(&app.location.path);
        app.set_error(format!(
            "skipped {} unreadable record{}, see {}",
            loaded.dropped,
            if loaded.dropped == 1 { "" } else { "s" },
            log_path.display()
        ));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    info!(
        "exit with {} live todo(s){}",
        app.store.live_count(),
        if app.dirty { ", unsaved changes dropped" } else { "" }
    );
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::{StoreFormat, UndoRestore};
    use crate::model::todo::TodoItem;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn app_with(items: &[(&str, TodoState)], dir: &TempDir) -> App {
        let list = items
            .iter()
            .map(|(t, s)| TodoItem::with_state(*t, *s))
            .collect();
        let location = StoreLocation {
            path: dir.path().join("todos.json"),
            format: StoreFormat::Json,
        };
        let mut config = Config::default();
        config.editor.initial_mode = InitialMode::Normal;
        App::new(list, config, location)
    }

    fn states(app: &App) -> Vec<TodoState> {
        app.list().items.iter().map(|t| t.state).collect()
    }

    #[test]
    fn starts_on_first_live_item() {
        let tmp = TempDir::new().unwrap();
        let app = app_with(
            &[("gone", TodoState::Deleted), ("a", TodoState::NotDone)],
            &tmp,
        );
        assert_eq!(app.cursor, 1);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn default_initial_mode_is_insert() {
        let tmp = TempDir::new().unwrap();
        let location = StoreLocation {
            path: tmp.path().join("t.json"),
            format: StoreFormat::Json,
        };
        let app = App::new(TodoList::default(), Config::default(), location);
        assert_eq!(app.mode, Mode::Insert);
    }

    #[test]
    fn delete_then_undo_scenario() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(
            &[("buy milk", TodoState::NotDone), ("walk dog", TodoState::Done)],
            &tmp,
        );
        app.delete_current();
        assert_eq!(states(&app), vec![TodoState::Deleted, TodoState::Done]);
        assert_eq!(app.cursor, 1);
        assert_eq!(app.store.undo_stack().indices(), vec![0]);

        app.undo_delete();
        assert_eq!(states(&app), vec![TodoState::NotDone, TodoState::Done]);
        assert!(app.store.undo_stack().is_empty());
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn undo_honors_prior_state_policy() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[("walk dog", TodoState::Done)], &tmp);
        app.store = TodoStore::with_undo(app.list().clone(), 10, UndoRestore::Prior);
        app.delete_current();
        app.undo_delete();
        assert_eq!(states(&app), vec![TodoState::Done]);
    }

    #[test]
    fn undo_on_empty_stack_is_a_message() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[("a", TodoState::NotDone)], &tmp);
        app.undo_delete();
        assert_eq!(states(&app), vec![TodoState::NotDone]);
        assert_eq!(app.status.as_ref().unwrap().text, "nothing to undo");
        assert!(!app.dirty);
    }

    #[test]
    fn deleting_last_live_item_leaves_no_selection() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[("a", TodoState::NotDone)], &tmp);
        app.delete_current();
        assert!(!app.has_selection());
        // Further deletes and toggles are no-ops
        app.delete_current();
        app.toggle_current();
        assert_eq!(states(&app), vec![TodoState::Deleted]);
        assert_eq!(app.store.undo_stack().len(), 1);
    }

    #[test]
    fn commit_adds_and_stays_in_insert() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[], &tmp);
        app.enter_insert();
        app.edit_buffer = "buy milk".into();
        app.commit_insert();
        assert_eq!(app.mode, Mode::Insert);
        assert_eq!(app.edit_buffer, "");
        assert_eq!(app.list().items, vec![TodoItem::new("buy milk")]);
        assert_eq!(app.cursor, 0);
        assert!(app.dirty);
    }

    #[test]
    fn blank_commit_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[], &tmp);
        app.enter_insert();
        app.edit_buffer = "   ".into();
        app.commit_insert();
        assert!(app.list().is_empty());
        assert_eq!(app.edit_buffer, "   ");
    }

    #[test]
    fn change_overwrites_text_and_keeps_state() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(
            &[("a", TodoState::NotDone), ("walk dgo", TodoState::Done)],
            &tmp,
        );
        app.move_down();
        app.begin_change();
        assert_eq!(app.mode, Mode::Insert);
        assert_eq!(app.edit_buffer, "walk dgo");

        app.edit_buffer = "walk dog".into();
        app.commit_insert();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.list().items[1], TodoItem::with_state("walk dog", TodoState::Done));
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn cancel_discards_change_but_keeps_draft() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[("a", TodoState::NotDone)], &tmp);

        app.begin_change();
        app.edit_buffer = "changed".into();
        app.cancel_insert();
        assert_eq!(app.list().items[0].text, "a");
        assert_eq!(app.edit_buffer, "");

        app.enter_insert();
        app.edit_buffer = "draft".into();
        app.cancel_insert();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.edit_buffer, "draft");
    }

    #[test]
    fn draft_survives_a_change() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[("a", TodoState::NotDone)], &tmp);

        app.enter_insert();
        app.edit_buffer = "draft".into();
        app.cancel_insert();
        app.begin_change();
        assert_eq!(app.edit_buffer, "a");
        app.cancel_insert();
        app.enter_insert();
        assert_eq!(app.edit_buffer, "draft");
        assert_eq!(app.edit_cursor, 5);

        app.cancel_insert();
        app.begin_change();
        app.edit_buffer = "b".into();
        app.commit_insert();
        assert_eq!(app.list().items[0].text, "b");
        assert_eq!(app.edit_buffer, "draft");
    }

    #[test]
    fn cancel_renormalizes_cursor() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[], &tmp);
        app.enter_insert();
        app.edit_buffer = "a".into();
        app.commit_insert();
        app.edit_buffer = "b".into();
        app.commit_insert();
        app.cursor = 7;
        app.cancel_insert();
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn save_and_quit_writes_file() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[("a", TodoState::Done)], &tmp);
        app.toggle_current();
        app.save_and_quit();
        assert!(app.should_quit);
        assert!(!app.dirty);

        let loaded = store_io::load_store(&app.location).unwrap();
        assert_eq!(loaded.list.items, vec![TodoItem::new("a")]);
    }

    #[test]
    fn failed_save_keeps_editor_open() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[("a", TodoState::NotDone)], &tmp);
        std::fs::create_dir(&app.location.path).unwrap();
        app.dirty = true;

        app.save_and_quit();
        assert!(!app.should_quit);
        assert!(app.dirty);
        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("storage unavailable at"));
    }

    #[test]
    fn quit_without_saving_leaves_file_alone() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&[("a", TodoState::NotDone)], &tmp);
        app.toggle_current();
        app.quit_without_saving();
        assert!(app.should_quit);
        assert!(!app.location.path.exists());
    }
}
