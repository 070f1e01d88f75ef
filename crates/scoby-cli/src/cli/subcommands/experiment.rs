use clap::Subcommand;

/// Experiment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ExperimentCommands {
    /// List experiments.
    List,
    /// Create an experiment with one batch per replicate of each tea.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Tea selection as ID or ID:REPLICATES (repeatable; replicates default to 1).
        #[arg(long, required = true)]
        tea: Vec<String>,
        /// Samples per batch (defaults to general.default_samples).
        #[arg(long)]
        samples: Option<usize>,
    },
    /// Show an experiment in canonical form.
    Show { id: String },
    /// Delete an experiment.
    Delete { id: String },
    /// Migrate every stored experiment and write them back.
    Migrate,
    /// Per-batch count averages.
    Summary { id: String },
}
