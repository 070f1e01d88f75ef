mod add;
mod list;
mod remove;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TeaCommands;
use crate::context::AppContext;

/// Handle `scoby tea`.
pub async fn handle(action: &TeaCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TeaCommands::List => list::run(ctx, flags).await,
        TeaCommands::Add {
            name,
            tea_grams_per_liter,
            incubator_temperature,
            sugar_type,
            sugar_grams_per_liter,
            inoculum_concentration,
        } => {
            let tea = scoby_store::NewTea {
                name: name.clone(),
                tea_grams_per_liter: *tea_grams_per_liter,
                incubator_temperature: *incubator_temperature,
                sugar_type: sugar_type.clone(),
                sugar_grams_per_liter: *sugar_grams_per_liter,
                inoculum_concentration: *inoculum_concentration,
            };
            add::run(tea, ctx, flags).await
        }
        TeaCommands::Remove { id } => remove::run(*id, ctx, flags).await,
    }
}
