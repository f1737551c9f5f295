use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::model::config::StoreFormat;

#[derive(Parser, Debug)]
#[command(name = "tick", about = concat!("[x] tick v", env!("CARGO_PKG_VERSION"), " - a small todo list for the terminal"), version)]
pub struct Cli {
    /// Print the todo list and exit instead of opening the editor
    #[arg(short = 'l', long)]
    pub list: bool,

    /// With --list: print the todos as a JSON array
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Todo file to use (default: ~/.todos.json)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Storage format of the todo file
    #[arg(long, value_enum, value_name = "FMT")]
    pub format: Option<FormatArg>,

    /// Config file (default: $XDG_CONFIG_HOME/tick/config.toml)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// `.txt` files are line-oriented, anything else JSON
    Auto,
    Json,
    Lines,
}

impl From<FormatArg> for StoreFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => StoreFormat::Auto,
            FormatArg::Json => StoreFormat::Json,
            FormatArg::Lines => StoreFormat::Lines,
        }
    }
}
