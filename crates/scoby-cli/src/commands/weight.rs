use scoby_core::enums::WeightKind;
use scoby_core::errors::CoreError;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::WeightCommands;
use crate::commands::shared::parse::{parse_enum, parse_measurement};
use crate::context::AppContext;
use crate::output::output;

/// Handle `scoby weight`.
pub async fn handle(
    action: &WeightCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let WeightCommands::Set {
        experiment,
        kind,
        tea,
        weight,
    } = action;
    let kind = parse_enum::<WeightKind>(kind, "kind")?;
    let weight = parse_measurement(weight.as_deref());
    let teas = ctx.service.teas().await?;

    let (experiment, ()) = ctx
        .service
        .update_experiment(experiment, |experiment| {
            // Batches carry the name the tea had when the experiment was created.
            let tea_name = experiment
                .batches
                .iter()
                .find(|batch| batch.tea_id == *tea)
                .map(|batch| batch.tea_name.clone())
                .or_else(|| teas.iter().find(|t| t.id == *tea).map(|t| t.name.clone()))
                .ok_or_else(|| CoreError::NotFound {
                    entity_type: "tea".to_string(),
                    id: tea.to_string(),
                })?;
            experiment.set_scoby_weight(kind, *tea, &tea_name, weight);
            Ok(())
        })
        .await?;

    output(&experiment.weights(kind), flags.format)
}
