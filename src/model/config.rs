use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// On-disk representation of the todo list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    /// Pick from the file extension: `.txt` is line-oriented, anything else JSON
    #[default]
    Auto,
    Json,
    Lines,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store file; `~` expands to $HOME. None = `~/.todos.json`
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub format: StoreFormat,
    /// Physically drop tombstones when writing
    #[serde(default)]
    pub compact_on_save: bool,
}

/// Mode the editor opens in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialMode {
    #[default]
    Insert,
    Normal,
}

/// What state an undone delete comes back as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UndoRestore {
    /// Always `NotDone`, even if the item was done before deletion
    #[default]
    NotDone,
    /// The exact state the item had before deletion
    Prior,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub initial_mode: InitialMode,
    #[serde(default)]
    pub undo_restores: UndoRestore,
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,
    #[serde(default = "default_char_limit")]
    pub char_limit: usize,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            initial_mode: InitialMode::default(),
            undo_restores: UndoRestore::default(),
            undo_limit: default_undo_limit(),
            char_limit: default_char_limit(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_undo_limit() -> usize {
    100
}

fn default_char_limit() -> usize {
    156
}

fn default_placeholder() -> String {
    "Hack the planet".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex overrides keyed by theme slot name (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log directory. None = $XDG_STATE_HOME/tick or ~/.local/state/tick
    #[serde(default)]
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
