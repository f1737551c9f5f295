use log::info;

use crate::cli::commands::Cli;
use crate::cli::output::*;
use crate::io::config_io::{self, expand_tilde};
use crate::io::store_io::{self, StoreLocation};
use crate::logging;
use crate::model::config::{Config, LogConfig};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (config, location) = resolve(&cli)?;
    start_logging(&config.log);
    info!(
        "store {} ({:?})",
        location.path.display(),
        location.format
    );

    if cli.list {
        cmd_list(&location, cli.json)
    } else {
        crate::tui::run(config, location)
    }
}

/// Logging is best-effort: a failure is reported once and the program goes on.
fn start_logging(log: &LogConfig) {
    let dir = log
        .dir
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(config_io::default_log_dir);
    let level = logging::effective_level(&log.level);
    if let Err(e) = logging::init_logging(&level, &dir) {
        eprintln!("warning: logging disabled: {}", e);
    }
}

// ---------------------------------------------------------------------------
// List mode
// ---------------------------------------------------------------------------

/// Print the live todos. Read-only: unreadable records are reported on
/// stderr; only the editor copies them to the recovery log.
fn cmd_list(location: &StoreLocation, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (list, dropped) = store_io::read_store(location)?;
    if !dropped.is_empty() {
        eprintln!(
            "warning: skipped {} unreadable record(s) in {}",
            dropped.len(),
            location.path.display()
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&list_to_json(&list))?);
    } else {
        for line in format_list_lines(&list) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Load the config and pick the store file: flags first, then config, then
/// defaults.
pub fn resolve(cli: &Cli) -> Result<(Config, StoreLocation), Box<dyn std::error::Error>> {
    let config = config_io::load_config(cli.config.as_deref())?;
    let location = store_io::resolve_store(
        cli.file.as_deref(),
        cli.format.map(Into::into),
        &config.store,
    );
    Ok((config, location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::StoreFormat;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn flags_override_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[store]\npath = \"/from/config.json\"\nformat = \"json\"\n",
        )
        .unwrap();
        let config_arg = config_path.to_string_lossy().into_owned();

        let cli = Cli::parse_from(["tick", "-c", &config_arg]);
        let (_, location) = resolve(&cli).unwrap();
        assert_eq!(location.path, PathBuf::from("/from/config.json"));
        assert_eq!(location.format, StoreFormat::Json);

        let cli = Cli::parse_from(["tick", "-c", &config_arg, "-f", "/cli.txt", "--format", "auto"]);
        let (_, location) = resolve(&cli).unwrap();
        assert_eq!(location.path, PathBuf::from("/cli.txt"));
        assert_eq!(location.format, StoreFormat::Lines);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("none.toml");
        let cli = Cli::parse_from(["tick", "-c", missing.to_str().unwrap()]);
        assert!(resolve(&cli).is_err());
    }
}
