//! Editing operations on a canonical experiment.
//!
//! Sample edits live in [`crate::samples`]; everything else a user can change
//! on an experiment is here. Operations addressing a batch by id fail with
//! `CoreError::NotFound` when the id is unknown and leave the experiment
//! untouched.

use chrono::{Local, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{DEFAULT_NUMBER_OF_SAMPLES, Batch, Experiment, ScobyWeight, TeaSettings};
use crate::enums::{Section, TimestampField, WeightKind};
use crate::errors::CoreError;
use crate::timestamp;

/// A tea picked for a new experiment, with how many replicates to brew.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeaSelection {
    pub tea: TeaSettings,
    pub replicates: u32,
}

impl Experiment {
    /// New experiment dated now, with one batch per replicate of every
    /// selected tea.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank name or description, no
    /// selected tea, or a selection with zero replicates.
    pub fn create(
        name: &str,
        description: &str,
        selections: &[TeaSelection],
    ) -> Result<Self, CoreError> {
        Self::create_at(name, description, selections, Local::now().naive_local())
    }

    /// [`Experiment::create`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`Experiment::create`].
    pub fn create_at(
        name: &str,
        description: &str,
        selections: &[TeaSelection],
        now: NaiveDateTime,
    ) -> Result<Self, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("experiment name is required".to_string()));
        }
        if description.trim().is_empty() {
            return Err(CoreError::Validation(
                "experiment description is required".to_string(),
            ));
        }
        if selections.is_empty() {
            return Err(CoreError::Validation("select at least one tea".to_string()));
        }
        if let Some(empty) = selections.iter().find(|s| s.replicates == 0) {
            return Err(CoreError::Validation(format!(
                "tea {} needs at least one replicate",
                empty.tea.name
            )));
        }

        let batches = selections
            .iter()
            .flat_map(|selection| {
                (1..=selection.replicates).map(|replicate| Batch::new(&selection.tea, replicate))
            })
            .collect();

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            date: timestamp::render(now),
            description: description.trim().to_string(),
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
        })
    }

    fn batch_or_not_found(&mut self, batch_id: &str) -> Result<&mut Batch, CoreError> {
        self.batch_mut(batch_id)
            .ok_or_else(|| CoreError::batch_not_found(batch_id))
    }

    /// Store a local-naive timestamp on a batch; `None` clears it.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown batch, `CoreError::Validation`
    /// when `value` is not a timestamp.
    pub fn set_timestamp(
        &mut self,
        batch_id: &str,
        field: TimestampField,
        value: Option<&str>,
    ) -> Result<(), CoreError> {
        let value = value
            .map(|text| {
                timestamp::parse(text)
                    .map(timestamp::render)
                    .ok_or_else(|| CoreError::Validation(format!("invalid timestamp: {text}")))
            })
            .transpose()?;
        *self.batch_or_not_found(batch_id)?.timestamp_mut(field) = value;
        Ok(())
    }

    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown batch.
    pub fn clear_timestamp(
        &mut self,
        batch_id: &str,
        field: TimestampField,
    ) -> Result<(), CoreError> {
        self.set_timestamp(batch_id, field, None)
    }

    /// Record the current time for a protocol step, returning what was stored.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown batch.
    pub fn stamp_now(&mut self, batch_id: &str, field: TimestampField) -> Result<String, CoreError> {
        self.stamp_at(batch_id, field, Local::now().naive_local())
    }

    /// [`Experiment::stamp_now`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown batch.
    pub fn stamp_at(
        &mut self,
        batch_id: &str,
        field: TimestampField,
        now: NaiveDateTime,
    ) -> Result<String, CoreError> {
        let stamp = timestamp::render(now);
        *self.batch_or_not_found(batch_id)?.timestamp_mut(field) = Some(stamp.clone());
        Ok(stamp)
    }

    /// Set or clear the pH reading. Non-finite values clear it.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown batch.
    pub fn set_ph(&mut self, batch_id: &str, value: Option<f64>) -> Result<(), CoreError> {
        self.batch_or_not_found(batch_id)?.ph_value = value.filter(|v| v.is_finite());
        Ok(())
    }

    /// Blank text clears the date.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` when `value` is not a timestamp.
    pub fn set_section_date(
        &mut self,
        section: Section,
        value: Option<&str>,
    ) -> Result<(), CoreError> {
        let value = value
            .filter(|text| !text.trim().is_empty())
            .map(|text| {
                timestamp::parse(text)
                    .map(timestamp::render)
                    .ok_or_else(|| CoreError::Validation(format!("invalid section date: {text}")))
            })
            .transpose()?;
        *self.section_date_mut(section) = value;
        Ok(())
    }

    pub fn set_section_notes(&mut self, section: Section, notes: &str) {
        *self.section_notes_mut(section) = notes.to_string();
    }

    /// Blank names clear the recorder.
    pub fn set_section_user_name(&mut self, section: Section, name: Option<&str>) {
        *self.section_user_name_mut(section) = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
    }

    /// Set the weight of one tea: updates the existing entry, appends a new
    /// one, or removes the entry when `weight` is `None` (or not finite).
    pub fn set_scoby_weight(
        &mut self,
        kind: WeightKind,
        tea_id: u32,
        tea_name: &str,
        weight: Option<f64>,
    ) {
        let weights = self.weights_mut(kind);
        let position = weights.iter().position(|entry| entry.tea_id == tea_id);
        match (weight.filter(|w| w.is_finite()), position) {
            (Some(weight), Some(index)) => weights[index].weight = weight,
            (Some(weight), None) => weights.push(ScobyWeight {
                tea_id,
                tea_name: tea_name.to_string(),
                weight,
            }),
            (None, Some(index)) => {
                weights.remove(index);
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn tea(id: u32, name: &str) -> TeaSettings {
        TeaSettings {
            sugar_type: "Sucrose".to_string(),
            ..TeaSettings::placeholder(id, name)
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 4)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn experiment() -> Experiment {
        Experiment::create_at(
            "Kombucha",
            "Sugar comparison",
            &[
                TeaSelection { tea: tea(1, "Black"), replicates: 2 },
                TeaSelection { tea: tea(2, "Green"), replicates: 1 },
            ],
            now(),
        )
        .unwrap()
    }

    #[test]
    fn create_generates_batches_per_replicate() {
        let exp = experiment();
        assert_eq!(exp.date, "2025-05-04T09:30:00");
        assert_eq!(exp.number_of_samples, 3);
        let shape: Vec<(u32, &str, u32)> = exp
            .batches
            .iter()
            .map(|b| (b.tea_id, b.tea_name.as_str(), b.replicate))
            .collect();
        assert_eq!(shape, vec![(1, "Black", 1), (1, "Black", 2), (2, "Green", 1)]);
        assert!(exp.batches.iter().all(|b| b.lab_count.is_none() && b.taken_out.is_none()));
        assert_ne!(exp.batches[0].id, exp.batches[1].id);
    }

    #[test]
    fn create_validates_input() {
        let one = [TeaSelection { tea: tea(1, "Black"), replicates: 1 }];
        assert!(Experiment::create_at(" ", "d", &one, now()).is_err());
        assert!(Experiment::create_at("n", "", &one, now()).is_err());
        assert!(Experiment::create_at("n", "d", &[], now()).is_err());
        let zero = [TeaSelection { tea: tea(1, "Black"), replicates: 0 }];
        assert!(Experiment::create_at("n", "d", &zero, now()).is_err());
    }

    #[test]
    fn stamp_and_clear_timestamps() {
        let mut exp = experiment();
        let id = exp.batches[0].id.clone();
        let stored = exp.stamp_at(&id, TimestampField::Plated, now()).unwrap();
        assert_eq!(stored, "2025-05-04T09:30:00");
        assert_eq!(exp.batches[0].plated.as_deref(), Some("2025-05-04T09:30:00"));

        exp.clear_timestamp(&id, TimestampField::Plated).unwrap();
        assert_eq!(exp.batches[0].plated, None);
    }

    #[test]
    fn set_timestamp_normalizes_widget_input() {
        let mut exp = experiment();
        let id = exp.batches[1].id.clone();
        exp.set_timestamp(&id, TimestampField::HplcVial, Some("2025-05-04T10:15"))
            .unwrap();
        assert_eq!(exp.batches[1].hplc_vial.as_deref(), Some("2025-05-04T10:15:00"));
        assert!(exp.set_timestamp(&id, TimestampField::HplcVial, Some("soon")).is_err());
    }

    #[test]
    fn unknown_batch_is_not_found() {
        let mut exp = experiment();
        let err = exp.set_ph("missing", Some(3.2)).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn ph_rejects_non_finite() {
        let mut exp = experiment();
        let id = exp.batches[0].id.clone();
        exp.set_ph(&id, Some(3.25)).unwrap();
        assert_eq!(exp.batches[0].ph_value, Some(3.25));
        exp.set_ph(&id, Some(f64::INFINITY)).unwrap();
        assert_eq!(exp.batches[0].ph_value, None);
    }

    #[test]
    fn section_edits() {
        let mut exp = experiment();
        exp.set_section_date(Section::CellCounting, Some("2025-05-10")).unwrap();
        exp.set_section_notes(Section::CellCounting, "plates 1-3 contaminated");
        exp.set_section_user_name(Section::CellCounting, Some("  Ana "));
        assert_eq!(exp.cell_counting_date.as_deref(), Some("2025-05-10T00:00:00"));
        assert_eq!(exp.cell_counting_notes, "plates 1-3 contaminated");
        assert_eq!(exp.cell_counting_user_name.as_deref(), Some("Ana"));

        exp.set_section_date(Section::CellCounting, Some("")).unwrap();
        exp.set_section_user_name(Section::CellCounting, Some(""));
        assert_eq!(exp.cell_counting_date, None);
        assert_eq!(exp.cell_counting_user_name, None);
    }

    #[test]
    fn scoby_weight_update_insert_remove() {
        let mut exp = experiment();
        exp.set_scoby_weight(WeightKind::Fresh, 2, "Green", Some(10.0));
        exp.set_scoby_weight(WeightKind::Fresh, 1, "Black", Some(11.0));
        exp.set_scoby_weight(WeightKind::Fresh, 2, "Green", Some(12.5));
        let ids: Vec<(u32, f64)> = exp.scoby_weights.iter().map(|w| (w.tea_id, w.weight)).collect();
        assert_eq!(ids, vec![(2, 12.5), (1, 11.0)]);

        exp.set_scoby_weight(WeightKind::Fresh, 2, "Green", None);
        assert_eq!(exp.scoby_weights.len(), 1);
        assert_eq!(exp.scoby_weights[0].tea_id, 1);
        assert!(exp.scoby_weights_dried.is_empty());
    }
}
