use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Batch;
use crate::enums::{Section, WeightKind};

/// Sample count used when a document does not declare a valid one.
pub const DEFAULT_NUMBER_OF_SAMPLES: usize = 3;

/// Upper bound on sample counts chosen by editing or configuration. Stored
/// documents may declare more and are migrated as they are.
pub const MAX_NUMBER_OF_SAMPLES: usize = 1_000;

/// Scoby weight of one tea. The fresh and dried lists share this shape and
/// hold at most one entry per `tea_id`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScobyWeight {
    pub tea_id: u32,
    pub tea_name: String,
    pub weight: f64,
}

/// A fermentation experiment in canonical shape.
///
/// The three protocol sections are stored flat (`protocolDate`,
/// `cellCountingNotes`, ...) to match the settings document; use
/// [`Experiment::section_date`] and friends to address them by [`Section`].
/// Every batch sample array is either absent or exactly
/// `number_of_samples` long.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub id: String,
    pub name: String,
    /// Creation time, local-naive (`YYYY-MM-DDTHH:mm:ss`).
    pub date: String,
    pub description: String,
    pub protocol_date: Option<String>,
    pub cell_counting_date: Option<String>,
    pub scoby_dried_date: Option<String>,
    pub protocol_notes: String,
    pub cell_counting_notes: String,
    pub scoby_dried_notes: String,
    pub protocol_user_name: Option<String>,
    pub cell_counting_user_name: Option<String>,
    pub scoby_dried_user_name: Option<String>,
    pub scoby_weights: Vec<ScobyWeight>,
    pub scoby_weights_dried: Vec<ScobyWeight>,
    pub number_of_samples: usize,
    pub batches: Vec<Batch>,
}

/// Batches of one tea, replicates ascending.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeaGroup {
    pub tea_id: u32,
    pub tea_name: String,
    pub batches: Vec<Batch>,
}

impl Experiment {
    #[must_use]
    pub fn section_date(&self, section: Section) -> Option<&str> {
        match section {
            Section::Protocol => self.protocol_date.as_deref(),
            Section::CellCounting => self.cell_counting_date.as_deref(),
            Section::ScobyDried => self.scoby_dried_date.as_deref(),
        }
    }

    pub const fn section_date_mut(&mut self, section: Section) -> &mut Option<String> {
        match section {
            Section::Protocol => &mut self.protocol_date,
            Section::CellCounting => &mut self.cell_counting_date,
            Section::ScobyDried => &mut self.scoby_dried_date,
        }
    }

    #[must_use]
    pub fn section_notes(&self, section: Section) -> &str {
        match section {
            Section::Protocol => &self.protocol_notes,
            Section::CellCounting => &self.cell_counting_notes,
            Section::ScobyDried => &self.scoby_dried_notes,
        }
    }

    pub const fn section_notes_mut(&mut self, section: Section) -> &mut String {
        match section {
            Section::Protocol => &mut self.protocol_notes,
            Section::CellCounting => &mut self.cell_counting_notes,
            Section::ScobyDried => &mut self.scoby_dried_notes,
        }
    }

    #[must_use]
    pub fn section_user_name(&self, section: Section) -> Option<&str> {
        match section {
            Section::Protocol => self.protocol_user_name.as_deref(),
            Section::CellCounting => self.cell_counting_user_name.as_deref(),
            Section::ScobyDried => self.scoby_dried_user_name.as_deref(),
        }
    }

    pub const fn section_user_name_mut(&mut self, section: Section) -> &mut Option<String> {
        match section {
            Section::Protocol => &mut self.protocol_user_name,
            Section::CellCounting => &mut self.cell_counting_user_name,
            Section::ScobyDried => &mut self.scoby_dried_user_name,
        }
    }

    #[must_use]
    pub fn weights(&self, kind: WeightKind) -> &[ScobyWeight] {
        match kind {
            WeightKind::Fresh => &self.scoby_weights,
            WeightKind::Dried => &self.scoby_weights_dried,
        }
    }

    pub const fn weights_mut(&mut self, kind: WeightKind) -> &mut Vec<ScobyWeight> {
        match kind {
            WeightKind::Fresh => &mut self.scoby_weights,
            WeightKind::Dried => &mut self.scoby_weights_dried,
        }
    }

    #[must_use]
    pub fn batch(&self, id: &str) -> Option<&Batch> {
        self.batches.iter().find(|batch| batch.id == id)
    }

    pub fn batch_mut(&mut self, id: &str) -> Option<&mut Batch> {
        self.batches.iter_mut().find(|batch| batch.id == id)
    }

    /// Number of batches belonging to `tea_id`.
    #[must_use]
    pub fn replication_count(&self, tea_id: u32) -> usize {
        self.batches.iter().filter(|batch| batch.tea_id == tea_id).count()
    }

    /// Batches ordered by tea name, then replicate. This is the order of the
    /// on-screen table, the report tables and export groups 3 to 5.
    #[must_use]
    pub fn sorted_batches(&self) -> Vec<&Batch> {
        let mut batches: Vec<&Batch> = self.batches.iter().collect();
        batches.sort_by(|a, b| compare_batches(a, b));
        batches
    }

    /// Batches grouped by `(tea_id, tea_name)` in order of first appearance.
    #[must_use]
    pub fn tea_groups(&self) -> Vec<TeaGroup> {
        let mut groups: Vec<TeaGroup> = Vec::new();
        for batch in &self.batches {
            let existing = groups
                .iter_mut()
                .find(|group| group.tea_id == batch.tea_id && group.tea_name == batch.tea_name);
            match existing {
                Some(group) => group.batches.push(batch.clone()),
                None => groups.push(TeaGroup {
                    tea_id: batch.tea_id,
                    tea_name: batch.tea_name.clone(),
                    batches: vec![batch.clone()],
                }),
            }
        }
        for group in &mut groups {
            group.batches.sort_by_key(|batch| batch.replicate);
        }
        groups
    }
}

fn compare_batches(a: &Batch, b: &Batch) -> Ordering {
    a.tea_name
        .cmp(&b.tea_name)
        .then_with(|| a.replicate.cmp(&b.replicate))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::TeaSettings;

    fn experiment(batches: Vec<Batch>) -> Experiment {
        Experiment {
            id: "e1".into(),
            name: "Run".into(),
            date: "2025-01-01T00:00:00".into(),
            description: String::new(),
            protocol_date: None,
            cell_counting_date: None,
            scoby_dried_date: None,
            protocol_notes: String::new(),
            cell_counting_notes: String::new(),
            scoby_dried_notes: String::new(),
            protocol_user_name: None,
            cell_counting_user_name: None,
            scoby_dried_user_name: None,
            scoby_weights: Vec::new(),
            scoby_weights_dried: Vec::new(),
            number_of_samples: DEFAULT_NUMBER_OF_SAMPLES,
            batches,
        }
    }

    fn batch(tea_id: u32, name: &str, replicate: u32) -> Batch {
        Batch::new(&TeaSettings::placeholder(tea_id, name), replicate)
    }

    #[test]
    fn tea_groups_keep_first_appearance_and_sort_replicates() {
        let exp = experiment(vec![
            batch(2, "Sencha", 2),
            batch(1, "Assam", 1),
            batch(2, "Sencha", 1),
        ]);
        let groups = exp.tea_groups();
        let shape = groups
            .iter()
            .map(|g| {
                (
                    g.tea_name.as_str(),
                    g.batches.iter().map(|b| b.replicate).collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(shape, vec![("Sencha", vec![1, 2]), ("Assam", vec![1])]);
    }

    #[test]
    fn sorted_batches_order_by_name_then_replicate() {
        let exp = experiment(vec![
            batch(2, "Sencha", 1),
            batch(1, "Assam", 2),
            batch(1, "Assam", 1),
        ]);
        let order = exp
            .sorted_batches()
            .iter()
            .map(|b| (b.tea_name.as_str(), b.replicate))
            .collect::<Vec<_>>();
        assert_eq!(order, vec![("Assam", 1), ("Assam", 2), ("Sencha", 1)]);
        assert_eq!(exp.replication_count(1), 2);
    }
}
