//! Row-oriented content of the printable experiment report.
//!
//! [`build_report`] resolves everything a report writer needs into plain
//! text cells: the tea formulations, the protocol timeline, Scoby weights,
//! per-sample counts and their averages, and the notes of every section.
//! Layout (fonts, page breaks, colours) belongs to the writer.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::aggregate::average;
use crate::entities::{Experiment, TeaSettings};
use crate::enums::{CountKind, Section, WeightKind};
use crate::timestamp;

const NOT_AVAILABLE: &str = "N/A";

/// A titled grid of text cells.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }
}

/// One protocol section: info lines, tables, then free-text notes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<String>,
    pub tables: Vec<Table>,
    /// Omitted when the section has no notes.
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub description: String,
    pub teas: Table,
    pub sections: Vec<ReportSection>,
}

/// Build the report of `experiment`, resolving tea ids against `teas`.
///
/// A tea id that is no longer in `teas` is reported with the batch's tea
/// name, zeroed parameters and an `Unknown` sugar type.
#[must_use]
pub fn build_report(experiment: &Experiment, teas: &[TeaSettings]) -> Report {
    Report {
        title: format!("Experiment: {}", experiment.name),
        description: if experiment.description.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            experiment.description.clone()
        },
        teas: tea_table(experiment, teas),
        sections: [
            Some(protocol_section(experiment)),
            dried_section(experiment),
            Some(cell_counting_section(experiment)),
        ]
        .into_iter()
        .flatten()
        .collect(),
    }
}

/// Teas of the experiment in order of first appearance among its batches.
#[must_use]
pub fn resolve_teas(experiment: &Experiment, teas: &[TeaSettings]) -> Vec<TeaSettings> {
    let mut seen = HashSet::new();
    experiment
        .batches
        .iter()
        .filter(|batch| seen.insert(batch.tea_id))
        .map(|batch| {
            teas.iter()
                .find(|tea| tea.id == batch.tea_id)
                .cloned()
                .unwrap_or_else(|| {
                    tracing::debug!(tea_id = batch.tea_id, "tea not in settings, using batch name");
                    TeaSettings::placeholder(batch.tea_id, &batch.tea_name)
                })
        })
        .collect()
}

/// `Experiment_<name>_<user>_<timestamp>.<extension>`, with whitespace runs
/// in the name replaced by `_` and the UTC timestamp made file-name safe.
#[must_use]
pub fn export_file_name(
    experiment_name: &str,
    user: &str,
    generated_at: DateTime<Utc>,
    extension: &str,
) -> String {
    let mut name = String::with_capacity(experiment_name.len());
    let mut in_whitespace = false;
    for c in experiment_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }

    let stamp = generated_at
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-");
    format!("Experiment_{name}_{user}_{stamp}.{extension}")
}

fn tea_table(experiment: &Experiment, teas: &[TeaSettings]) -> Table {
    let mut table = Table::new(
        "Tea Settings",
        &[
            "Tea Name",
            "Tea (g/L)",
            "Incubator Temp.",
            "Sugar Type",
            "Sugar (g/L)",
            "Incubator Conc.",
            "Tea ID",
        ],
    );
    table.rows = resolve_teas(experiment, teas)
        .into_iter()
        .map(|tea| {
            vec![
                tea.name,
                tea.tea_grams_per_liter.to_string(),
                format!("{}°C", tea.incubator_temperature),
                tea.sugar_type,
                tea.sugar_grams_per_liter.to_string(),
                format!("{}%", tea.inoculum_concentration),
                tea.id.to_string(),
            ]
        })
        .collect();
    table
}

fn protocol_section(experiment: &Experiment) -> ReportSection {
    let mut timeline = Table::new(
        "Protocol",
        &["Tea", "Rep.", "Taken Out", "Plated", "HPLC Vial", "pH", "pH Time"],
    );
    timeline.rows = experiment
        .sorted_batches()
        .into_iter()
        .map(|batch| {
            vec![
                batch.tea_name.clone(),
                batch.replicate.to_string(),
                timestamp::for_display(batch.taken_out.as_deref()),
                timestamp::for_display(batch.plated.as_deref()),
                timestamp::for_display(batch.hplc_vial.as_deref()),
                fixed_or_na(batch.ph_value),
                timestamp::for_display(batch.ph_timestamp.as_deref()),
            ]
        })
        .collect();

    let mut tables = vec![timeline];
    if !experiment.scoby_weights.is_empty() {
        tables.push(weight_table(experiment, WeightKind::Fresh));
    }

    ReportSection {
        title: "Protocol: Taken Out, Plated, HPLC, pH".to_string(),
        lines: vec![recorder_line(experiment, Section::Protocol)],
        tables,
        notes: notes(experiment, Section::Protocol),
    }
}

fn dried_section(experiment: &Experiment) -> Option<ReportSection> {
    let has_weights = !experiment.scoby_weights_dried.is_empty();
    let notes = notes(experiment, Section::ScobyDried);
    if !has_weights && notes.is_none() {
        return None;
    }
    Some(ReportSection {
        title: "Protocol: Scoby weight dried".to_string(),
        lines: vec![recorder_line(experiment, Section::ScobyDried)],
        tables: if has_weights {
            vec![weight_table(experiment, WeightKind::Dried)]
        } else {
            Vec::new()
        },
        notes,
    })
}

fn cell_counting_section(experiment: &Experiment) -> ReportSection {
    let n = experiment.number_of_samples;
    let batches = experiment.sorted_batches();

    let mut headers = vec!["Tea".to_string(), "Rep.".to_string()];
    for kind in CountKind::ALL {
        headers.extend((1..=n).map(|i| format!("{} #{i}", kind.label())));
    }
    let detailed = Table {
        title: "Cell Counts".to_string(),
        headers,
        rows: batches
            .iter()
            .map(|batch| {
                let mut row = vec![batch.tea_name.clone(), batch.replicate.to_string()];
                for kind in CountKind::ALL {
                    let samples = batch.samples(kind).unwrap_or_default();
                    row.extend((0..n).map(|i| {
                        samples
                            .get(i)
                            .copied()
                            .flatten()
                            .map_or_else(|| NOT_AVAILABLE.to_string(), |value| value.to_string())
                    }));
                }
                row
            })
            .collect(),
    };

    let mut averages = Table::new(
        "Cell Count Averages",
        &["Tea", "Rep.", "LAB Avg", "AAB Avg", "Yeast+Mould Avg"],
    );
    averages.rows = batches
        .iter()
        .map(|batch| {
            let mut row = vec![batch.tea_name.clone(), batch.replicate.to_string()];
            row.extend(CountKind::ALL.map(|kind| fixed_or_na(average(batch.samples(kind)))));
            row
        })
        .collect();

    ReportSection {
        title: "Protocol: Cell Counting".to_string(),
        lines: vec![
            format!("Number of Samples per Batch: {n}"),
            recorder_line(experiment, Section::CellCounting),
        ],
        tables: vec![detailed, averages],
        notes: notes(experiment, Section::CellCounting),
    }
}

fn weight_table(experiment: &Experiment, kind: WeightKind) -> Table {
    let (title, column) = match kind {
        WeightKind::Fresh => ("Scoby Weights per Tea", "Weight (g)"),
        WeightKind::Dried => ("Scoby Weights Dried", "Weight Dried (g)"),
    };
    let mut table = Table::new(title, &["Tea", column]);
    table.rows = experiment
        .weights(kind)
        .iter()
        .map(|entry| vec![entry.tea_name.clone(), format!("{:.2}", entry.weight)])
        .collect();
    table
}

/// `Name: <recorder>    Date: <date>`, or just the date part without a
/// recorder.
fn recorder_line(experiment: &Experiment, section: Section) -> String {
    let date = timestamp::for_display(experiment.section_date(section));
    let date = if date.is_empty() { NOT_AVAILABLE } else { &date };
    match experiment.section_user_name(section) {
        Some(name) => format!("Name: {name}    Date: {date}"),
        None => format!("Date: {date}"),
    }
}

fn notes(experiment: &Experiment, section: Section) -> Option<String> {
    let notes = experiment.section_notes(section);
    (!notes.is_empty()).then(|| notes.to_string())
}

fn fixed_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |value| format!("{value:.2}"))
}
