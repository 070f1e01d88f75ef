use clap::Subcommand;

/// Scoby weight commands.
#[derive(Clone, Debug, Subcommand)]
pub enum WeightCommands {
    /// Set the weight of one tea; omit the weight to remove the entry.
    Set {
        experiment: String,
        /// Weight list: fresh, dried
        #[arg(long)]
        kind: String,
        #[arg(long)]
        tea: u32,
        #[arg(long)]
        weight: Option<String>,
    },
}
