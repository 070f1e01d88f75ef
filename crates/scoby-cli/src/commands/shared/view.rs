use anyhow::Context;
use scoby_core::entities::{Batch, Experiment};

/// The batch an edit was applied to, for echoing back to the user.
pub fn edited_batch<'a>(experiment: &'a Experiment, batch_id: &str) -> anyhow::Result<&'a Batch> {
    experiment
        .batch(batch_id)
        .with_context(|| format!("batch {batch_id} missing after edit"))
}
