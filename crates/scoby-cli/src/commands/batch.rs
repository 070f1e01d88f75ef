use scoby_core::enums::TimestampField;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BatchCommands;
use crate::commands::shared::parse::{parse_enum, parse_measurement};
use crate::commands::shared::view::edited_batch;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scoby batch`.
pub async fn handle(action: &BatchCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (experiment, batch) = match action {
        BatchCommands::Stamp {
            experiment,
            batch,
            field,
        } => {
            let field = parse_enum::<TimestampField>(field, "field")?;
            let (experiment, stamp) = ctx
                .service
                .update_experiment(experiment, |experiment| experiment.stamp_now(batch, field))
                .await?;
            tracing::debug!(batch = %batch, %field, %stamp, "stamped batch");
            (experiment, batch)
        }
        BatchCommands::SetTime {
            experiment,
            batch,
            field,
            value,
        } => {
            let field = parse_enum::<TimestampField>(field, "field")?;
            let (experiment, ()) = ctx
                .service
                .update_experiment(experiment, |experiment| {
                    experiment.set_timestamp(batch, field, Some(value.as_str()))
                })
                .await?;
            (experiment, batch)
        }
        BatchCommands::ClearTime {
            experiment,
            batch,
            field,
        } => {
            let field = parse_enum::<TimestampField>(field, "field")?;
            let (experiment, ()) = ctx
                .service
                .update_experiment(experiment, |experiment| {
                    experiment.clear_timestamp(batch, field)
                })
                .await?;
            (experiment, batch)
        }
        BatchCommands::SetPh {
            experiment,
            batch,
            value,
        } => {
            let value = parse_measurement(value.as_deref());
            let (experiment, ()) = ctx
                .service
                .update_experiment(experiment, |experiment| experiment.set_ph(batch, value))
                .await?;
            (experiment, batch)
        }
    };

    output(edited_batch(&experiment, batch)?, flags.format)
}
