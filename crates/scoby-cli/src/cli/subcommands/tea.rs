use clap::Subcommand;

/// Tea formulation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TeaCommands {
    /// List teas.
    List,
    /// Add a tea under the next free ID.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0.0)]
        tea_grams_per_liter: f64,
        #[arg(long, default_value_t = 0.0)]
        incubator_temperature: f64,
        #[arg(long)]
        sugar_type: String,
        #[arg(long, default_value_t = 0.0)]
        sugar_grams_per_liter: f64,
        #[arg(long, default_value_t = 0.0)]
        inoculum_concentration: f64,
    },
    /// Remove a tea by ID.
    Remove { id: u32 },
}
