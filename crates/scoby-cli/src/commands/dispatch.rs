use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Tea { action } => commands::tea::handle(&action, ctx, flags).await,
        Commands::Experiment { action } => commands::experiment::handle(&action, ctx, flags).await,
        Commands::Sample { action } => commands::sample::handle(&action, ctx, flags).await,
        Commands::Batch { action } => commands::batch::handle(&action, ctx, flags).await,
        Commands::Section { action } => commands::section::handle(&action, ctx, flags).await,
        Commands::Weight { action } => commands::weight::handle(&action, ctx, flags).await,
        Commands::Export { action } => commands::export::handle(&action, ctx, flags).await,
        Commands::Report(args) => commands::report::handle(&args, ctx, flags).await,
    }
}
