use clap::Subcommand;

/// Sample measurement commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SampleCommands {
    /// Set (or clear) one sample of a batch.
    Set {
        experiment: String,
        batch: String,
        /// Count kind: lab, aab, yeast_mould
        #[arg(long)]
        kind: String,
        /// Sample number, starting at 1.
        #[arg(long)]
        sample: usize,
        /// Measured value; omit or pass a non-number to clear.
        #[arg(long)]
        value: Option<String>,
    },
    /// Change the number of samples per batch.
    Resize { experiment: String, size: usize },
}
