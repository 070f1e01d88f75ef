use clap::Subcommand;

/// Protocol section commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SectionCommands {
    /// Update the given fields of a section; an empty value clears the field.
    Set {
        experiment: String,
        /// Section: protocol, cell_counting, scoby_dried
        #[arg(long)]
        section: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        user_name: Option<String>,
    },
}
