use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_rows;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (_, rows) = ctx.service.export_rows(id).await?;
    output_rows(&rows, flags.format)
}
