use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_tea_selection;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    description: &str,
    teas: &[String],
    samples: Option<usize>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let selections = teas
        .iter()
        .map(|raw| parse_tea_selection(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let samples = samples.unwrap_or(ctx.config.general.default_samples);

    let experiment = ctx
        .service
        .create_experiment(name, description, &selections, samples)
        .await?;
    output(&experiment, flags.format)
}
