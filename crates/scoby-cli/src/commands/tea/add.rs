use scoby_store::NewTea;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(tea: NewTea, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let tea = ctx.service.add_tea(tea).await?;
    output(&tea, flags.format)
}
