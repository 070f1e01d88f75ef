mod rows;
mod write;

pub use write::WrittenFile;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExportCommands;
use crate::context::AppContext;

/// Handle `scoby export`.
pub async fn handle(
    action: &ExportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ExportCommands::Rows { id } => rows::run(id, ctx, flags).await,
        ExportCommands::Write { id } => write::run(id, ctx, flags).await,
    }
}
