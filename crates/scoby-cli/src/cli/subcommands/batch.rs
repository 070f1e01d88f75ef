use clap::Subcommand;

/// Batch timestamp and pH commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BatchCommands {
    /// Record the current time for a protocol step.
    Stamp {
        experiment: String,
        batch: String,
        /// Field: taken_out, plated, hplc_vial, ph_timestamp
        #[arg(long)]
        field: String,
    },
    /// Set a protocol step time (YYYY-MM-DDTHH:mm[:ss]).
    SetTime {
        experiment: String,
        batch: String,
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
    },
    /// Clear a protocol step time.
    ClearTime {
        experiment: String,
        batch: String,
        #[arg(long)]
        field: String,
    },
    /// Set the pH reading; omit the value to clear it.
    SetPh {
        experiment: String,
        batch: String,
        #[arg(long)]
        value: Option<String>,
    },
}
