use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- tick recovery log: append-only
     Todo records that could not be loaded or saved end up here.
     Copy anything you still need back into your todo file.
     Safe to delete once reviewed. -->

---
";

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// Records skipped while loading
    Parser,
    /// Content that failed to reach disk
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parser => write!(f, "parser"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl RecoveryEntry {
    pub fn new(category: RecoveryCategory, description: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }
}

/// The recovery log that belongs to a store file: `<store>.recovery.log`
/// in the same directory.
pub fn recovery_log_path(store_path: &Path) -> PathBuf {
    sibling_with_suffix(store_path, ".recovery.log")
}

/// Copy of the store as it was before a lossy load: `<store>.bak`.
pub fn backup_path(store_path: &Path) -> PathBuf {
    sibling_with_suffix(store_path, ".bak")
}

fn sibling_with_suffix(store_path: &Path, suffix: &str) -> PathBuf {
    let mut name = store_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    store_path.with_file_name(name)
}

/// Copy the store file to its backup path, replacing an older backup.
/// Errors are swallowed and printed to stderr.
pub fn backup_store(store_path: &Path) {
    let target = backup_path(store_path);
    match std::fs::copy(store_path, &target) {
        Ok(_) => log::info!("backed up {} to {}", store_path.display(), target.display()),
        Err(e) => {
            log::error!("could not back up {}: {}", store_path.display(), e);
            eprintln!("warning: could not write backup {}: {}", target.display(), e);
        }
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append a recovery entry next to `store_path`. Errors are swallowed and
/// printed to stderr.
pub fn log_recovery(store_path: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(&recovery_log_path(store_path), entry) {
        log::error!("could not write recovery log: {}", e);
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(path: &Path, entry: RecoveryEntry) -> io::Result<()> {
    let needs_header = std::fs::metadata(path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}
