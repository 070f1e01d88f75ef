use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::TeaSettings;
use crate::enums::{CountKind, TimestampField};

/// Per-sample measurements of one count category. Entries are nullable;
/// a stored array is never entirely null (that state is represented by the
/// field being absent).
pub type Samples = Vec<Option<f64>>;

/// One physical fermentation replicate of a tea within an experiment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    pub tea_id: u32,
    pub tea_name: String,
    pub replicate: u32,
    pub taken_out: Option<String>,
    pub plated: Option<String>,
    pub hplc_vial: Option<String>,
    pub ph_value: Option<f64>,
    pub ph_timestamp: Option<String>,
    pub lab_count: Option<Samples>,
    pub aab_count: Option<Samples>,
    pub yeast_mould_count: Option<Samples>,
}

impl Batch {
    /// Fresh batch for `tea` with every measurement empty.
    #[must_use]
    pub fn new(tea: &TeaSettings, replicate: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tea_id: tea.id,
            tea_name: tea.name.clone(),
            replicate,
            taken_out: None,
            plated: None,
            hplc_vial: None,
            ph_value: None,
            ph_timestamp: None,
            lab_count: None,
            aab_count: None,
            yeast_mould_count: None,
        }
    }

    #[must_use]
    pub fn samples(&self, kind: CountKind) -> Option<&[Option<f64>]> {
        match kind {
            CountKind::Lab => self.lab_count.as_deref(),
            CountKind::Aab => self.aab_count.as_deref(),
            CountKind::YeastMould => self.yeast_mould_count.as_deref(),
        }
    }

    pub const fn samples_mut(&mut self, kind: CountKind) -> &mut Option<Samples> {
        match kind {
            CountKind::Lab => &mut self.lab_count,
            CountKind::Aab => &mut self.aab_count,
            CountKind::YeastMould => &mut self.yeast_mould_count,
        }
    }

    #[must_use]
    pub fn timestamp(&self, field: TimestampField) -> Option<&str> {
        match field {
            TimestampField::TakenOut => self.taken_out.as_deref(),
            TimestampField::Plated => self.plated.as_deref(),
            TimestampField::HplcVial => self.hplc_vial.as_deref(),
            TimestampField::PhTimestamp => self.ph_timestamp.as_deref(),
        }
    }

    pub const fn timestamp_mut(&mut self, field: TimestampField) -> &mut Option<String> {
        match field {
            TimestampField::TakenOut => &mut self.taken_out,
            TimestampField::Plated => &mut self.plated,
            TimestampField::HplcVial => &mut self.hplc_vial,
            TimestampField::PhTimestamp => &mut self.ph_timestamp,
        }
    }
}
