use scoby_core::enums::CountKind;
use scoby_store::ExperimentListing;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SampleCommands;
use crate::commands::shared::parse::{parse_enum, parse_measurement};
use crate::commands::shared::view::edited_batch;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scoby sample`.
pub async fn handle(
    action: &SampleCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SampleCommands::Set {
            experiment,
            batch,
            kind,
            sample,
            value,
        } => {
            let kind = parse_enum::<CountKind>(kind, "kind")?;
            let index = sample
                .checked_sub(1)
                .ok_or_else(|| anyhow::anyhow!("sample numbers start at 1"))?;
            let value = parse_measurement(value.as_deref());

            let (experiment, ()) = ctx
                .service
                .update_experiment(experiment, |experiment| {
                    experiment.set_sample(batch, kind, index, value)
                })
                .await?;
            output(edited_batch(&experiment, batch)?, flags.format)
        }
        SampleCommands::Resize { experiment, size } => {
            let (experiment, ()) = ctx
                .service
                .update_experiment(experiment, |experiment| experiment.resize(*size))
                .await?;
            output(&ExperimentListing::from(&experiment), flags.format)
        }
    }
}
