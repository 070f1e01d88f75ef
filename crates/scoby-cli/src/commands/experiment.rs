mod create;
mod delete;
mod list;
mod migrate;
mod show;
mod summary;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExperimentCommands;
use crate::context::AppContext;

/// Handle `scoby experiment`.
pub async fn handle(
    action: &ExperimentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ExperimentCommands::List => list::run(ctx, flags).await,
        ExperimentCommands::Create {
            name,
            description,
            tea,
            samples,
        } => create::run(name, description, tea, *samples, ctx, flags).await,
        ExperimentCommands::Show { id } => show::run(id, ctx, flags).await,
        ExperimentCommands::Delete { id } => delete::run(id, ctx, flags).await,
        ExperimentCommands::Migrate => migrate::run(ctx, flags).await,
        ExperimentCommands::Summary { id } => summary::run(id, ctx, flags).await,
    }
}
