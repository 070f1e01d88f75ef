//! Schema migration for stored experiment documents.
//!
//! A stored experiment may have been written by any historical version of
//! the notebook. [`migrate`] reads it field by field and produces the
//! canonical [`Experiment`]: fields that cannot be interpreted fall back to
//! their defaults, so migration never fails. Running it on its own output
//! changes nothing.
//!
//! Upgrades applied, in order:
//!
//! 1. `description` and the three notes fields default to empty text.
//! 2. `numberOfSamples` defaults to 3 unless it is a positive integer.
//! 3. The legacy scalars `scobyWeight` / `scobyWeightDried` become per-tea
//!    lists attributed to the first batch's tea.
//! 4. Count fields become arrays of exactly `numberOfSamples` entries, or
//!    absent.
//! 5. UTC-tagged timestamps become local-naive.

mod legacy;

use chrono::{Local, NaiveDateTime, TimeZone};
use serde_json::{Map, Value};

pub use legacy::{LegacyCount, LegacyWeights};

use crate::entities::{Batch, DEFAULT_NUMBER_OF_SAMPLES, Experiment};
use crate::enums::{CountKind, Section, TimestampField, WeightKind};
use crate::timestamp;
use legacy::{read_id, read_number, read_string};

/// Bring a stored experiment of any vintage into canonical shape, converting
/// UTC-tagged timestamps with the process time zone.
#[must_use]
pub fn migrate(raw: &Value) -> Experiment {
    migrate_in(raw, &Local, Local::now().naive_local())
}

/// [`migrate`] with an explicit time zone and clock.
#[must_use]
pub fn migrate_in<Tz: TimeZone>(raw: &Value, tz: &Tz, now: NaiveDateTime) -> Experiment {
    let empty = Map::new();
    let doc = raw.as_object().unwrap_or_else(|| {
        tracing::warn!("experiment document is not an object, using defaults");
        &empty
    });

    let id = read_text_id(doc.get("id")).unwrap_or_else(|| {
        tracing::debug!("experiment without id, deriving one from its content");
        derived_id(None, raw)
    });
    let number_of_samples = read_number_of_samples(doc.get("numberOfSamples"));

    let batches: Vec<Batch> = match doc.get("batches") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                migrate_batch(item, position, &id, number_of_samples, tz)
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            tracing::warn!(experiment = %id, "batches is not a list, dropping");
            Vec::new()
        }
    };

    let mut experiment = Experiment {
        name: read_string(doc.get("name")).unwrap_or_default(),
        date: timestamp::normalize_in(text(doc.get("date")), true, tz, now)
            .unwrap_or_else(|| timestamp::render(now)),
        description: read_string(doc.get("description")).unwrap_or_default(),
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
        number_of_samples,
        batches,
        id,
    };

    for section in Section::ALL {
        let prefix = section.field_prefix();
        let date = non_empty(doc.get(&format!("{prefix}Date")));
        *experiment.section_date_mut(section) =
            timestamp::normalize_in(date.as_deref(), false, tz, NaiveDateTime::default());
        *experiment.section_notes_mut(section) =
            read_string(doc.get(&format!("{prefix}Notes"))).unwrap_or_default();
        *experiment.section_user_name_mut(section) =
            non_empty(doc.get(&format!("{prefix}UserName")));
    }

    for kind in [WeightKind::Fresh, WeightKind::Dried] {
        let weights = LegacyWeights::read(raw, kind).into_weights(kind, experiment.batches.first());
        *experiment.weights_mut(kind) = weights;
    }

    experiment
}

fn migrate_batch<Tz: TimeZone>(
    raw: &Value,
    position: usize,
    experiment_id: &str,
    number_of_samples: usize,
    tz: &Tz,
) -> Option<Batch> {
    let Some(doc) = raw.as_object() else {
        tracing::warn!("dropping batch that is not an object");
        return None;
    };

    let id = read_text_id(doc.get("id")).unwrap_or_else(|| {
        tracing::debug!(position, "batch without id, deriving one from its content");
        derived_id(Some((experiment_id, position)), raw)
    });

    let mut batch = Batch {
        tea_id: doc.get("teaId").and_then(read_id).unwrap_or_default(),
        tea_name: read_string(doc.get("teaName")).unwrap_or_default(),
        replicate: doc
            .get("replicate")
            .and_then(read_id)
            .filter(|replicate| *replicate > 0)
            .unwrap_or(1),
        taken_out: None,
        plated: None,
        hplc_vial: None,
        ph_value: doc.get("phValue").and_then(read_number),
        ph_timestamp: None,
        lab_count: None,
        aab_count: None,
        yeast_mould_count: None,
        id,
    };

    for field in TimestampField::ALL {
        // The clock is never consulted for optional timestamps.
        let stored = text(doc.get(field.field_name()));
        *batch.timestamp_mut(field) =
            timestamp::normalize_in(stored, false, tz, NaiveDateTime::default());
    }

    for kind in CountKind::ALL {
        let count = LegacyCount::read(doc.get(kind.field_name()));
        if let LegacyCount::Scalar(value) = count {
            tracing::debug!(
                batch = %batch.id,
                field = kind.field_name(),
                value,
                "expanding legacy scalar count"
            );
        }
        *batch.samples_mut(kind) = count.into_samples(number_of_samples);
    }

    Some(batch)
}

fn read_number_of_samples(value: Option<&Value>) -> usize {
    let declared = value
        .and_then(read_number)
        .filter(|number| number.fract() == 0.0 && *number >= 1.0)
        .and_then(|number| usize::try_from(number as u64).ok());
    if declared.is_none() && value.is_some_and(|value| !value.is_null()) {
        tracing::warn!(?value, "invalid numberOfSamples, using default");
    }
    declared.unwrap_or(DEFAULT_NUMBER_OF_SAMPLES)
}

/// Stable UUID v5 for a document stored without an id, so that loading the
/// same stored document twice yields the same id. Batches are scoped by their
/// experiment and list position.
fn derived_id(scope: Option<(&str, usize)>, raw: &Value) -> String {
    let mut name = match scope {
        Some((experiment_id, position)) => format!("{experiment_id}/batches/{position}/"),
        None => String::from("experiment/"),
    };
    name.push_str(&raw.to_string());
    uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

/// Ids were always strings, but tolerate numbers from hand-edited files.
fn read_text_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    text(value)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn run(raw: &Value) -> Experiment {
        migrate_in(raw, &Utc, now())
    }

    fn rerun(experiment: &Experiment) -> Experiment {
        run(&serde_json::to_value(experiment).unwrap())
    }

    #[test]
    fn empty_document_gets_defaults() {
        let exp = run(&json!({"id": "e1", "name": "Empty"}));
        assert_eq!(exp.description, "");
        assert_eq!(exp.protocol_notes, "");
        assert_eq!(exp.cell_counting_notes, "");
        assert_eq!(exp.scoby_dried_notes, "");
        assert_eq!(exp.number_of_samples, 3);
        assert_eq!(exp.date, "2025-06-01T08:00:00");
        assert!(exp.batches.is_empty());
        assert!(exp.scoby_weights.is_empty());
    }

    #[test]
    fn non_object_document_still_migrates() {
        let exp = run(&json!("not an experiment"));
        assert!(!exp.id.is_empty());
        assert_eq!(exp.number_of_samples, 3);
    }

    #[test]
    fn invalid_number_of_samples_falls_back() {
        for declared in [json!(0), json!(-2), json!(2.5), json!("x"), json!(null)] {
            let exp = run(&json!({"numberOfSamples": declared}));
            assert_eq!(exp.number_of_samples, 3, "{declared}");
        }
        assert_eq!(run(&json!({"numberOfSamples": 5})).number_of_samples, 5);
    }

    #[test]
    fn legacy_scalar_count_fills_declared_samples() {
        let exp = run(&json!({
            "numberOfSamples": 3,
            "batches": [{"id": "b1", "teaId": 1, "teaName": "Black", "replicate": 1, "labCount": 7}]
        }));
        assert_eq!(exp.batches[0].lab_count, Some(vec![Some(7.0); 3]));
        assert_eq!(exp.batches[0].aab_count, None);
    }

    #[test]
    fn arrays_are_conformed_to_declared_size() {
        let exp = run(&json!({
            "numberOfSamples": 3,
            "batches": [{
                "id": "b1",
                "labCount": [1, 2],
                "aabCount": [1, 2, 3, 4],
                "yeastMouldCount": [null, null, null]
            }]
        }));
        let batch = &exp.batches[0];
        assert_eq!(batch.lab_count, Some(vec![Some(1.0), Some(2.0), None]));
        assert_eq!(batch.aab_count, Some(vec![Some(1.0), Some(2.0), Some(3.0)]));
        assert_eq!(batch.yeast_mould_count, None);
    }

    #[test]
    fn legacy_weight_goes_to_first_batch_tea() {
        // Two teas, one stored weight: the first batch's tea gets all of it.
        let exp = run(&json!({
            "scobyWeight": 12.5,
            "scobyWeightDried": 3,
            "batches": [
                {"id": "b1", "teaId": 2, "teaName": "Green", "replicate": 1},
                {"id": "b2", "teaId": 1, "teaName": "Black", "replicate": 1}
            ]
        }));
        assert_eq!(exp.scoby_weights.len(), 1);
        assert_eq!(exp.scoby_weights[0].tea_id, 2);
        assert_eq!(exp.scoby_weights[0].tea_name, "Green");
        assert!((exp.scoby_weights[0].weight - 12.5).abs() < f64::EPSILON);
        assert_eq!(exp.scoby_weights_dried[0].tea_id, 2);
    }

    #[test]
    fn legacy_weight_without_batches_is_dropped() {
        let exp = run(&json!({"scobyWeight": 12.5}));
        assert!(exp.scoby_weights.is_empty());
    }

    #[test]
    fn utc_timestamps_become_local_naive() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let raw = json!({
            "date": "2025-03-01T10:00:00.000Z",
            "batches": [{
                "id": "b1",
                "takenOut": "2025-03-01T11:30:00.000Z",
                "plated": "2025-03-01T12:00:00",
                "hplcVial": null,
                "phTimestamp": ""
            }]
        });
        let exp = migrate_in(&raw, &plus_two, now());
        assert_eq!(exp.date, "2025-03-01T12:00:00");
        let batch = &exp.batches[0];
        assert_eq!(batch.taken_out.as_deref(), Some("2025-03-01T13:30:00"));
        assert_eq!(batch.plated.as_deref(), Some("2025-03-01T12:00:00"));
        assert_eq!(batch.hplc_vial, None);
        assert_eq!(batch.ph_timestamp, None);
    }

    #[test]
    fn malformed_batches_are_dropped_and_ids_generated() {
        let exp = run(&json!({"batches": [42, {"teaName": "Black"}, null]}));
        assert_eq!(exp.batches.len(), 1);
        assert!(!exp.batches[0].id.is_empty());
        assert_eq!(exp.batches[0].replicate, 1);
    }

    #[test]
    fn large_declared_sample_count_is_kept() {
        let counts = (1..=1500).collect::<Vec<_>>();
        let exp = run(&json!({
            "numberOfSamples": 1500,
            "batches": [{"id": "b", "labCount": counts}]
        }));
        assert_eq!(exp.number_of_samples, 1500);
        let lab = exp.batches[0].lab_count.as_ref().unwrap();
        assert_eq!(lab.len(), 1500);
        assert_eq!(lab[1499], Some(1500.0));
    }

    #[test]
    fn missing_ids_are_stable_across_loads() {
        let raw = json!({
            "name": "No ids",
            "batches": [
                {"teaId": 1, "teaName": "Black", "replicate": 1},
                {"teaId": 1, "teaName": "Black", "replicate": 1}
            ]
        });
        let first = run(&raw);
        let second = run(&raw);
        assert_eq!(first.id, second.id);
        assert_eq!(first.batches[0].id, second.batches[0].id);
        assert_eq!(first.batches[1].id, second.batches[1].id);
        // Identical batches at different positions stay distinguishable.
        assert_ne!(first.batches[0].id, first.batches[1].id);
        assert!(uuid::Uuid::parse_str(&first.id).is_ok());
    }

    #[test]
    fn different_documents_get_different_ids() {
        let a = run(&json!({"name": "A"}));
        let b = run(&json!({"name": "B"}));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn sections_keep_non_empty_values() {
        let exp = run(&json!({
            "protocolDate": "2025-03-02T09:00:00",
            "protocolUserName": "",
            "cellCountingNotes": "counted twice",
            "scoby_dried_notes": "ignored"
        }));
        assert_eq!(exp.protocol_date.as_deref(), Some("2025-03-02T09:00:00"));
        assert_eq!(exp.protocol_user_name, None);
        assert_eq!(exp.cell_counting_notes, "counted twice");
        assert_eq!(exp.scoby_dried_notes, "");
    }

    #[test]
    fn migration_is_idempotent() {
        let raw = json!({
            "id": "e1",
            "name": "Legacy",
            "date": "2024-11-05T08:00:00.000Z",
            "numberOfSamples": 2,
            "scobyWeight": 4,
            "batches": [
                {"teaId": 1, "teaName": "Black", "replicate": 1, "labCount": 9, "aabCount": [1, "2", true]},
                {"id": "b2", "teaId": 1, "teaName": "Black", "replicate": 2, "phValue": "3.4"}
            ]
        });
        let once = run(&raw);
        let twice = rerun(&once);
        assert_eq!(once, twice);
        assert_eq!(once.batches[0].aab_count, Some(vec![Some(1.0), Some(2.0)]));
        assert_eq!(once.batches[1].ph_value, Some(3.4));
    }
}
