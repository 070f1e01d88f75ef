use chrono::Utc;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::commands::export::WrittenFile;
use crate::context::AppContext;
use crate::output::{output, output_report};

/// Handle `scoby report`.
pub async fn handle(args: &ReportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (experiment, report) = ctx.service.report(&args.id).await?;
    if !args.write {
        return output_report(&report, flags.format);
    }

    let path = ctx
        .writer
        .write_report(ctx.service.user(), &experiment, &report, Utc::now())?;
    output(&WrittenFile { path, rows: None }, flags.format)
}
