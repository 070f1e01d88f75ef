use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct MigrateResponse<'a> {
    user: &'a str,
    migrated: usize,
}

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let migrated = ctx.service.migrate_all().await?;
    output(
        &MigrateResponse {
            user: ctx.service.user(),
            migrated,
        },
        flags.format,
    )
}
