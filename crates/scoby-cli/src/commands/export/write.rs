use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub rows: Option<usize>,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (experiment, rows) = ctx.service.export_rows(id).await?;
    let path = ctx
        .writer
        .write_rows(ctx.service.user(), &experiment, &rows, Utc::now())?;
    output(
        &WrittenFile {
            path,
            rows: Some(rows.len()),
        },
        flags.format,
    )
}
