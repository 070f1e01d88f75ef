use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let experiments = ctx.service.list_experiments().await?;
    output(&experiments, flags.format)
}
