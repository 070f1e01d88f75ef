//! Migration of stored documents from every historical notebook shape.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use scoby_core::entities::Experiment;
use scoby_core::enums::CountKind;
use scoby_core::migrate::migrate_in;

fn zone() -> FixedOffset {
    FixedOffset::east_opt(3600).unwrap()
}

fn clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn migrate(raw: &Value) -> Experiment {
    migrate_in(raw, &zone(), clock())
}

/// Earliest shape: scalar counts, one experiment-wide weight, UTC dates and
/// no sections, notes or sample count.
fn first_generation() -> Value {
    json!({
        "id": "1712345678901",
        "name": "First brew",
        "date": "2024-04-05T19:41:18.901Z",
        "batches": [
            {
                "id": "b-1",
                "teaId": 3,
                "teaName": "Sencha",
                "replicate": 1,
                "takenOut": "2024-04-06T07:00:00.000Z",
                "plated": null,
                "hplcVial": null,
                "phValue": 3.9,
                "phTimestamp": "2024-04-06T07:05:00.000Z",
                "labCount": 15,
                "aabCount": null,
                "yeastMouldCount": 4
            },
            {
                "id": "b-2",
                "teaId": 1,
                "teaName": "Assam",
                "replicate": 1,
                "labCount": 11
            }
        ],
        "scobyWeight": 52.5
    })
}

/// Shape after per-sample arrays and sections were introduced, before
/// timestamps were stored local-naive.
fn second_generation() -> Value {
    json!({
        "id": "a6c1",
        "name": "Second brew",
        "date": "2024-09-01T06:00:00.000Z",
        "description": "Glucose",
        "protocolDate": "2024-09-02T08:00:00",
        "protocolNotes": "",
        "protocolUserName": "Jo",
        "cellCountingDate": null,
        "numberOfSamples": 4,
        "scobyWeights": [{"teaId": 1, "teaName": "Assam", "weight": 30}],
        "scobyWeightsDried": [],
        "batches": [{
            "id": "b-9",
            "teaId": 1,
            "teaName": "Assam",
            "replicate": 1,
            "labCount": [10, null, 12, null],
            "aabCount": [null, null, null, null],
            "yeastMouldCount": [1, 2, 3]
        }]
    })
}

#[test]
fn first_generation_document() {
    let exp = migrate(&first_generation());
    assert_eq!(exp.date, "2024-04-05T20:41:18");
    assert_eq!(exp.description, "");
    assert_eq!(exp.number_of_samples, 3);

    let sencha = &exp.batches[0];
    assert_eq!(sencha.lab_count, Some(vec![Some(15.0); 3]));
    assert_eq!(sencha.aab_count, None);
    assert_eq!(sencha.yeast_mould_count, Some(vec![Some(4.0); 3]));
    assert_eq!(sencha.taken_out.as_deref(), Some("2024-04-06T08:00:00"));
    assert_eq!(sencha.ph_timestamp.as_deref(), Some("2024-04-06T08:05:00"));
}

/// Known lossy conversion: the single stored weight cannot be split between
/// Sencha and Assam, so it is attributed to the tea of the first batch.
#[test]
fn first_generation_weight_is_attributed_to_first_batch_tea() {
    let exp = migrate(&first_generation());
    assert_eq!(exp.scoby_weights.len(), 1);
    assert_eq!(exp.scoby_weights[0].tea_id, 3);
    assert_eq!(exp.scoby_weights[0].tea_name, "Sencha");
    assert!(exp.scoby_weights_dried.is_empty());
}

#[test]
fn second_generation_document() {
    let exp = migrate(&second_generation());
    assert_eq!(exp.number_of_samples, 4);
    assert_eq!(exp.protocol_user_name.as_deref(), Some("Jo"));
    assert_eq!(exp.cell_counting_date, None);
    let batch = &exp.batches[0];
    assert_eq!(batch.lab_count, Some(vec![Some(10.0), None, Some(12.0), None]));
    assert_eq!(batch.aab_count, None);
    assert_eq!(
        batch.yeast_mould_count,
        Some(vec![Some(1.0), Some(2.0), Some(3.0), None])
    );
}

#[rstest]
#[case::first(first_generation())]
#[case::second(second_generation())]
#[case::empty(json!({}))]
#[case::garbage(json!({"batches": "none", "numberOfSamples": "three", "date": 17}))]
fn migration_is_idempotent(#[case] raw: Value) {
    let once = migrate(&raw);
    let twice = migrate(&serde_json::to_value(&once).unwrap());
    assert_eq!(once, twice);
}

#[rstest]
#[case::first(first_generation())]
#[case::second(second_generation())]
fn arrays_match_declared_sample_count(#[case] raw: Value) {
    let exp = migrate(&raw);
    for batch in &exp.batches {
        for kind in CountKind::ALL {
            if let Some(samples) = batch.samples(kind) {
                assert_eq!(samples.len(), exp.number_of_samples);
                assert!(samples.iter().any(Option::is_some));
            }
        }
    }
}
