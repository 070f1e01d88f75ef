use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use scoby_store::ExperimentListing;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let deleted = ctx.service.delete_experiment(id).await?;
    output(&ExperimentListing::from(&deleted), flags.format)
}
