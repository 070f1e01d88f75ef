use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    BatchCommands, ExperimentCommands, ExportCommands, SampleCommands, SectionCommands,
    TeaCommands, WeightCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Tea formulations of the user.
    Tea {
        #[command(subcommand)]
        action: TeaCommands,
    },
    /// Experiments.
    Experiment {
        #[command(subcommand)]
        action: ExperimentCommands,
    },
    /// Per-sample microbial counts.
    Sample {
        #[command(subcommand)]
        action: SampleCommands,
    },
    /// Batch timestamps and pH.
    Batch {
        #[command(subcommand)]
        action: BatchCommands,
    },
    /// Protocol sections (date, notes, recorder).
    Section {
        #[command(subcommand)]
        action: SectionCommands,
    },
    /// Scoby weights per tea.
    Weight {
        #[command(subcommand)]
        action: WeightCommands,
    },
    /// Flat export rows.
    Export {
        #[command(subcommand)]
        action: ExportCommands,
    },
    /// Printable report of an experiment.
    Report(ReportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Experiment ID.
    pub id: String,
    /// Also write the report under the export directory.
    #[arg(long)]
    pub write: bool,
}
