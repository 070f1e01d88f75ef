use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let experiment = ctx.service.load_experiment(id).await?;
    output(&experiment, flags.format)
}
