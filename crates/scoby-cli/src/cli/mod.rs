use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `scoby` binary.
#[derive(Debug, Parser)]
#[command(name = "scoby", version, about = "Scoby - kombucha fermentation lab notebook")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// User whose notebook is used (defaults to general.default_user)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Settings file (defaults to store.path)
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            user: self.user.clone(),
            store: self.store.clone(),
        }
    }
}
