//! Derived per-batch statistics.
//!
//! [`average`] is the only mean in the workspace: the summary view, the
//! report tables and the export rows all go through it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Batch, Experiment};
use crate::enums::CountKind;

/// Arithmetic mean of the non-null samples.
///
/// Nulls are left out of both the sum and the divisor. Absent, empty and
/// all-null input has no average.
#[must_use]
pub fn average(samples: Option<&[Option<f64>]>) -> Option<f64> {
    let (sum, count) = samples?
        .iter()
        .flatten()
        .fold((0.0_f64, 0_u32), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Averages of one batch, in tea-name/replicate order when produced by
/// [`summarize`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub batch_id: String,
    pub tea_name: String,
    pub replicate: u32,
    pub lab_average: Option<f64>,
    pub aab_average: Option<f64>,
    pub yeast_mould_average: Option<f64>,
}

impl BatchSummary {
    #[must_use]
    pub fn of(batch: &Batch) -> Self {
        Self {
            batch_id: batch.id.clone(),
            tea_name: batch.tea_name.clone(),
            replicate: batch.replicate,
            lab_average: average(batch.samples(CountKind::Lab)),
            aab_average: average(batch.samples(CountKind::Aab)),
            yeast_mould_average: average(batch.samples(CountKind::YeastMould)),
        }
    }

    #[must_use]
    pub const fn average_of(&self, kind: CountKind) -> Option<f64> {
        match kind {
            CountKind::Lab => self.lab_average,
            CountKind::Aab => self.aab_average,
            CountKind::YeastMould => self.yeast_mould_average,
        }
    }
}

/// One summary per batch, sorted the way the on-screen table is.
#[must_use]
pub fn summarize(experiment: &Experiment) -> Vec<BatchSummary> {
    experiment
        .sorted_batches()
        .into_iter()
        .map(BatchSummary::of)
        .collect()
}
