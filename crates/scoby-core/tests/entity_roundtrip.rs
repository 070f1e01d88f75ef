//! Serde roundtrip and JsonSchema validation tests for the stored and
//! exported types.

use schemars::schema_for;
use scoby_core::aggregate::BatchSummary;
use scoby_core::edit::TeaSelection;
use scoby_core::entities::*;
use scoby_core::enums::*;
use scoby_core::export::{ExportRow, ExportValue};
use scoby_core::report::{Report, ReportSection, Table};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn black_tea() -> TeaSettings {
    TeaSettings {
        id: 1,
        name: "Assam Black".into(),
        tea_grams_per_liter: 5.0,
        incubator_temperature: 26.0,
        sugar_type: "Sucrose".into(),
        sugar_grams_per_liter: 70.0,
        inoculum_concentration: 10.0,
    }
}

fn measured_batch() -> Batch {
    Batch {
        id: "8f0c4a52-3d1e-4f6b-9a57-2c9d1e0b7a41".into(),
        tea_id: 1,
        tea_name: "Assam Black".into(),
        replicate: 2,
        taken_out: Some("2025-02-03T09:15:00".into()),
        plated: Some("2025-02-03T11:40:00".into()),
        hplc_vial: None,
        ph_value: Some(3.42),
        ph_timestamp: Some("2025-02-03T09:20:00".into()),
        lab_count: Some(vec![Some(120.0), None, Some(98.5)]),
        aab_count: None,
        yeast_mould_count: Some(vec![Some(12.0), Some(14.0), Some(9.0)]),
    }
}

fn experiment() -> Experiment {
    Experiment {
        id: "exp-2025-02".into(),
        name: "Sugar sweep".into(),
        date: "2025-02-01T08:00:00".into(),
        description: "Sucrose versus glucose".into(),
        protocol_date: Some("2025-02-03T09:00:00".into()),
        cell_counting_date: Some("2025-02-10T13:00:00".into()),
        scoby_dried_date: None,
        protocol_notes: String::new(),
        cell_counting_notes: "Two plates overgrown".into(),
        scoby_dried_notes: String::new(),
        protocol_user_name: Some("Mira".into()),
        cell_counting_user_name: None,
        scoby_dried_user_name: None,
        scoby_weights: vec![ScobyWeight {
            tea_id: 1,
            tea_name: "Assam Black".into(),
            weight: 41.2,
        }],
        scoby_weights_dried: Vec::new(),
        number_of_samples: 3,
        batches: vec![measured_batch()],
    }
}

roundtrip_and_validate!(tea_settings_roundtrip, TeaSettings, black_tea());

roundtrip_and_validate!(batch_roundtrip, Batch, measured_batch());

roundtrip_and_validate!(
    empty_batch_roundtrip,
    Batch,
    Batch::new(&black_tea(), 1)
);

roundtrip_and_validate!(experiment_roundtrip, Experiment, experiment());

roundtrip_and_validate!(
    user_settings_roundtrip,
    UserSettings,
    UserSettings {
        teas: vec![black_tea()],
        experiments: vec![serde_json::to_value(experiment()).unwrap()],
    }
);

roundtrip_and_validate!(
    tea_selection_roundtrip,
    TeaSelection,
    TeaSelection {
        tea: black_tea(),
        replicates: 3,
    }
);

roundtrip_and_validate!(
    batch_summary_roundtrip,
    BatchSummary,
    BatchSummary::of(&measured_batch())
);

roundtrip_and_validate!(
    export_row_roundtrip,
    ExportRow,
    ExportRow {
        experiment: "Sugar sweep".into(),
        formulation: "Assam Black".into(),
        replication: 2,
        variable: Variable::YeastMould,
        sample: 3,
        analysis_date: "10.02.2025".into(),
        analysis_time: String::new(),
        value: ExportValue::Number(11.5),
    }
);

roundtrip_and_validate!(
    blank_export_row_roundtrip,
    ExportRow,
    ExportRow {
        experiment: "Sugar sweep".into(),
        formulation: "Assam Black".into(),
        replication: 2,
        variable: Variable::TakenOut,
        sample: 1,
        analysis_date: "03.02.2025".into(),
        analysis_time: "09:15".into(),
        value: ExportValue::blank(),
    }
);

roundtrip_and_validate!(
    report_roundtrip,
    Report,
    Report {
        title: "Experiment: Sugar sweep".into(),
        description: "Sucrose versus glucose".into(),
        teas: Table {
            title: "Tea Settings".into(),
            headers: vec!["Tea Name".into()],
            rows: vec![vec!["Assam Black".into()]],
        },
        sections: vec![ReportSection {
            title: "Protocol: Cell Counting".into(),
            lines: vec!["Date: N/A".into()],
            tables: Vec::new(),
            notes: None,
        }],
    }
);

// ---------------------------------------------------------------------------
// Schema rejection
// ---------------------------------------------------------------------------

#[test]
fn schema_rejects_unknown_variable() {
    let schema = serde_json::to_value(schema_for!(ExportRow)).unwrap();
    let mut row = serde_json::to_value(ExportRow {
        experiment: "x".into(),
        formulation: "y".into(),
        replication: 1,
        variable: Variable::Lab,
        sample: 3,
        analysis_date: String::new(),
        analysis_time: String::new(),
        value: ExportValue::Number(1.0),
    })
    .unwrap();
    row["Variable"] = serde_json::json!("Lactobacillus");
    assert!(!validate_against_schema(&schema, &row).is_empty());
}

#[test]
fn schema_rejects_string_samples() {
    let schema = serde_json::to_value(schema_for!(Batch)).unwrap();
    let mut batch = serde_json::to_value(measured_batch()).unwrap();
    batch["labCount"] = serde_json::json!(["lots", null, 3]);
    assert!(!validate_against_schema(&schema, &batch).is_empty());
}

#[test]
fn stored_field_names_are_camel_case() {
    let value = serde_json::to_value(experiment()).unwrap();
    for field in [
        "numberOfSamples",
        "scobyWeights",
        "scobyWeightsDried",
        "protocolDate",
        "cellCountingNotes",
        "scobyDriedUserName",
    ] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
    let batch = &value["batches"][0];
    for kind in CountKind::ALL {
        assert!(batch.get(kind.field_name()).is_some());
    }
    for field in TimestampField::ALL {
        assert!(batch.get(field.field_name()).is_some());
    }
    // Absent optionals are written as null, not left out.
    assert!(value["scobyDriedDate"].is_null());
}
