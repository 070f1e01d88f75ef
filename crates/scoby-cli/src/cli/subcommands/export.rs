use clap::Subcommand;

/// Export commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ExportCommands {
    /// Print the export rows of an experiment.
    Rows { id: String },
    /// Write the export rows as JSON lines under the export directory.
    Write { id: String },
}
