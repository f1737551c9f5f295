use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::io::config_io::{expand_tilde, home_dir};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::config::{StoreConfig, StoreFormat};
use crate::model::todo::TodoList;
use crate::parse::{parse_json, parse_lines, serialize_json, serialize_lines};

/// File name of the store in the home directory when nothing else is set
pub const DEFAULT_STORE_FILE: &str = ".todos.json";

/// Error type for store file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize todos: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A resolved store file: where it lives and how it is encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    pub path: PathBuf,
    /// Never `Auto` once resolved
    pub format: StoreFormat,
}

/// Result of loading a store file
#[derive(Debug, Clone)]
pub struct Loaded {
    pub list: TodoList,
    /// Number of records skipped because they did not parse
    pub dropped: usize,
}

pub fn default_store_path() -> PathBuf {
    home_dir().join(DEFAULT_STORE_FILE)
}

/// Pick the concrete format for a path: `.txt` files are line-oriented,
/// everything else JSON.
pub fn resolve_format(format: StoreFormat, path: &Path) -> StoreFormat {
    match format {
        StoreFormat::Auto => {
            if path.extension().and_then(|e| e.to_str()) == Some("txt") {
                StoreFormat::Lines
            } else {
                StoreFormat::Json
            }
        }
        explicit => explicit,
    }
}

/// Resolve the store file from command-line overrides, then config, then
/// defaults.
pub fn resolve_store(
    cli_path: Option<&Path>,
    cli_format: Option<StoreFormat>,
    config: &StoreConfig,
) -> StoreLocation {
    let path = match (cli_path, &config.path) {
        (Some(p), _) => p.to_path_buf(),
        (None, Some(p)) => expand_tilde(p),
        (None, None) => default_store_path(),
    };
    let format = resolve_format(cli_format.unwrap_or(config.format), &path);
    StoreLocation { path, format }
}

/// Create an empty store file (and its parent directories) if missing.
pub fn ensure_store(path: &Path) -> Result<(), StoreError> {
    if path.exists() {
        return Ok(());
    }
    let unavailable = |e| StoreError::Unavailable {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(unavailable)?;
    }
    File::create(path).map_err(unavailable)?;
    info!("created empty store at {}", path.display());
    Ok(())
}

/// Create the store if needed and parse it, with no other side effects.
/// Returns the list and the raw text of every record that was skipped.
pub fn read_store(location: &StoreLocation) -> Result<(TodoList, Vec<String>), StoreError> {
    ensure_store(&location.path)?;

    let source = fs::read_to_string(&location.path).map_err(|e| StoreError::Unavailable {
        path: location.path.clone(),
        source: e,
    })?;

    let parsed = match location.format {
        StoreFormat::Lines => parse_lines(&source),
        StoreFormat::Json | StoreFormat::Auto => parse_json(&source),
    };
    if !parsed.1.is_empty() {
        warn!(
            "skipped {} malformed record(s) in {}",
            parsed.1.len(),
            location.path.display()
        );
    }
    Ok(parsed)
}

/// Load the store for editing. Skipped records go to the recovery log, and
/// the file as found is copied to `<store>.bak` since the next save would
/// drop them.
pub fn load_store(location: &StoreLocation) -> Result<Loaded, StoreError> {
    let (list, dropped) = read_store(location)?;

    if !dropped.is_empty() {
        let source_name = location
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        recovery::log_recovery(
            &location.path,
            RecoveryEntry::new(RecoveryCategory::Parser, "dropped records")
                .field("Source", source_name)
                .field("Count", dropped.len().to_string())
                .body(dropped.join("\n")),
        );
        recovery::backup_store(&location.path);
    }

    info!(
        "loaded {} todo(s) ({} live) from {}",
        list.len(),
        list.live_count(),
        location.path.display()
    );

    Ok(Loaded {
        list,
        dropped: dropped.len(),
    })
}

/// Encode a list for the given format.
pub fn encode(list: &TodoList, format: StoreFormat) -> Result<String, StoreError> {
    match format {
        StoreFormat::Lines => Ok(serialize_lines(list)),
        StoreFormat::Json | StoreFormat::Auto => Ok(serialize_json(list)?),
    }
}

/// Replace the whole store file atomically. With `compact`, tombstones are
/// dropped before writing. On failure the content goes to the recovery log.
pub fn save_store(
    location: &StoreLocation,
    list: &TodoList,
    compact: bool,
) -> Result<(), StoreError> {
    let content = if compact {
        encode(&list.compacted(), location.format)?
    } else {
        encode(list, location.format)?
    };

    if let Err(e) = recovery::atomic_write(&location.path, content.as_bytes()) {
        log::error!("failed to save {}: {}", location.path.display(), e);
        recovery::log_recovery(
            &location.path,
            RecoveryEntry::new(RecoveryCategory::Write, "store write failed")
                .field("Target", location.path.display().to_string())
                .field("Error", e.to_string())
                .body(content),
        );
        return Err(StoreError::Unavailable {
            path: location.path.clone(),
            source: e,
        });
    }

    info!(
        "saved {} todo(s) to {}",
        list.live_count(),
        location.path.display()
    );
    Ok(())
}
