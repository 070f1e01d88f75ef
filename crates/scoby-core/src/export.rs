//! Flat rows for spreadsheet export.
//!
//! [`to_rows`] flattens a canonical experiment into the fixed column layout
//! of the notebook's spreadsheet export. Rows come out in six groups:
//!
//! 1. fresh Scoby weights, in list order;
//! 2. dried Scoby weights, in list order;
//! 3. LAB averages, 4. AAB averages, 5. Y+M averages, each over the batches
//!    sorted by tea name then replicate, skipping batches without samples;
//! 6. protocol time series (taken out, plated, pH) pooled across batches and
//!    sorted by timestamp.
//!
//! Groups 1 to 5 take their date from the governing protocol section and
//! leave the time column empty. HPLC vial times are not exported.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::aggregate::average;
use crate::entities::{Batch, Experiment};
use crate::enums::{CountKind, Section, Variable, WeightKind};
use crate::timestamp;

/// The `value` cell: a number, or empty text for rows that only carry a time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum ExportValue {
    Number(f64),
    Text(String),
}

impl ExportValue {
    #[must_use]
    pub const fn blank() -> Self {
        Self::Text(String::new())
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for ExportValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One spreadsheet row. Field names serialize to the exported column titles.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExportRow {
    pub experiment: String,
    #[serde(rename = "Formulation")]
    pub formulation: String,
    /// Batch count of the tea for weight rows, replicate number otherwise.
    #[serde(rename = "Replication")]
    pub replication: usize,
    #[serde(rename = "Variable")]
    pub variable: Variable,
    #[serde(rename = "Sample")]
    pub sample: usize,
    #[serde(rename = "Analysis date")]
    pub analysis_date: String,
    #[serde(rename = "Analysis time")]
    pub analysis_time: String,
    pub value: ExportValue,
}

impl ExportRow {
    /// Column titles in output order.
    pub const HEADERS: [&'static str; 8] = [
        "experiment",
        "Formulation",
        "Replication",
        "Variable",
        "Sample",
        "Analysis date",
        "Analysis time",
        "value",
    ];

    /// Cell texts in [`ExportRow::HEADERS`] order.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.experiment.clone(),
            self.formulation.clone(),
            self.replication.to_string(),
            self.variable.to_string(),
            self.sample.to_string(),
            self.analysis_date.clone(),
            self.analysis_time.clone(),
            self.value.to_string(),
        ]
    }
}

/// Flatten `experiment` into ordered export rows.
#[must_use]
pub fn to_rows(experiment: &Experiment) -> Vec<ExportRow> {
    let mut rows = Vec::new();

    for (kind, section) in [
        (WeightKind::Fresh, Section::Protocol),
        (WeightKind::Dried, Section::ScobyDried),
    ] {
        let date = timestamp::export_date(experiment.section_date(section));
        rows.extend(experiment.weights(kind).iter().map(|entry| ExportRow {
            experiment: experiment.name.clone(),
            formulation: entry.tea_name.clone(),
            replication: experiment.replication_count(entry.tea_id),
            variable: Variable::for_weight(kind),
            sample: 1,
            analysis_date: date.clone(),
            analysis_time: String::new(),
            value: ExportValue::Number(entry.weight),
        }));
    }

    let batches = experiment.sorted_batches();
    let counting_date = timestamp::export_date(experiment.section_date(Section::CellCounting));
    for kind in CountKind::ALL {
        for batch in &batches {
            let Some(mean) = average(batch.samples(kind)) else {
                continue;
            };
            rows.push(ExportRow {
                experiment: experiment.name.clone(),
                formulation: batch.tea_name.clone(),
                replication: batch.replicate as usize,
                variable: Variable::for_count(kind),
                sample: experiment.number_of_samples,
                analysis_date: counting_date.clone(),
                analysis_time: String::new(),
                value: ExportValue::Number(mean),
            });
        }
    }

    let mut series: Vec<(Option<NaiveDateTime>, ExportRow)> = batches
        .iter()
        .flat_map(|batch| time_series(experiment, batch))
        .collect();
    // Stable: ties keep batch order, then taken out / plated / pH.
    series.sort_by_key(|(at, _)| (at.is_none(), *at));
    rows.extend(series.into_iter().map(|(_, row)| row));

    rows
}

fn time_series(experiment: &Experiment, batch: &Batch) -> Vec<(Option<NaiveDateTime>, ExportRow)> {
    let events = [
        (Variable::TakenOut, batch.taken_out.as_deref(), ExportValue::blank()),
        (Variable::Plated, batch.plated.as_deref(), ExportValue::blank()),
        (
            Variable::PhValue,
            batch.ph_timestamp.as_deref().filter(|_| batch.ph_value.is_some()),
            batch.ph_value.map_or_else(ExportValue::blank, ExportValue::Number),
        ),
    ];

    events
        .into_iter()
        .filter_map(|(variable, at, value)| {
            let at = at.filter(|ts| !ts.is_empty())?;
            let row = ExportRow {
                experiment: experiment.name.clone(),
                formulation: batch.tea_name.clone(),
                replication: batch.replicate as usize,
                variable,
                sample: 1,
                analysis_date: timestamp::export_date(Some(at)),
                analysis_time: timestamp::export_time(Some(at)),
                value,
            };
            Some((timestamp::parse(at), row))
        })
        .collect()
}
