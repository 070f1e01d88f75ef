//! Shapes a stored field may take across notebook versions.
//!
//! These tagged variants exist only at the migration boundary. Once read,
//! every field is converted to the single canonical representation used by
//! [`crate::entities`].

use serde_json::Value;

use crate::entities::{Batch, Samples, ScobyWeight};
use crate::enums::WeightKind;
use crate::samples::resize_samples;

/// A batch count field as stored.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyCount {
    /// Missing, `null`, or a value that is not a count at all.
    Absent,
    /// Pre-array documents stored one number per batch.
    Scalar(f64),
    /// Current shape, entries nullable, length not yet checked.
    Samples(Samples),
}

impl LegacyCount {
    #[must_use]
    pub fn read(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Array(items)) => Self::Samples(items.iter().map(read_number).collect()),
            Some(other) => read_number(other).map_or(Self::Absent, Self::Scalar),
        }
    }

    /// Canonical array for a document declaring `number_of_samples`.
    ///
    /// A scalar fills every slot. An array is padded or truncated to the
    /// declared count, and one without any value becomes absent.
    #[must_use]
    pub fn into_samples(self, number_of_samples: usize) -> Option<Samples> {
        match self {
            Self::Absent => None,
            Self::Scalar(value) => Some(vec![Some(value); number_of_samples]),
            Self::Samples(samples) => {
                if samples.len() > number_of_samples {
                    tracing::warn!(
                        stored = samples.len(),
                        declared = number_of_samples,
                        "sample array longer than declared count, truncating"
                    );
                }
                resize_samples(Some(samples), number_of_samples)
            }
        }
    }
}

/// A Scoby weight list as stored.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyWeights {
    /// Neither the list nor the legacy scalar is present.
    Absent,
    /// Single experiment-wide weight from before weights were kept per tea.
    Scalar(f64),
    /// Current per-tea list.
    PerTea(Vec<ScobyWeight>),
}

impl LegacyWeights {
    /// Read the `kind` list from an experiment document, falling back to the
    /// legacy scalar only when the list itself is missing.
    #[must_use]
    pub fn read(doc: &Value, kind: WeightKind) -> Self {
        if let Some(Value::Array(items)) = doc.get(kind.field_name()) {
            let mut weights: Vec<ScobyWeight> = Vec::with_capacity(items.len());
            for item in items {
                let Some(weight) = read_weight(item) else {
                    tracing::warn!(list = kind.field_name(), "dropping unreadable weight entry");
                    continue;
                };
                if weights.iter().any(|existing| existing.tea_id == weight.tea_id) {
                    tracing::warn!(
                        list = kind.field_name(),
                        tea_id = weight.tea_id,
                        "dropping duplicate weight entry"
                    );
                    continue;
                }
                weights.push(weight);
            }
            return Self::PerTea(weights);
        }

        doc.get(kind.legacy_field())
            .and_then(read_number)
            .map_or(Self::Absent, Self::Scalar)
    }

    /// Canonical per-tea list.
    ///
    /// A legacy scalar is attributed to the tea of `first_batch`. When the
    /// experiment holds several teas this attribution is arbitrary and the
    /// other teas get no weight; the stored value cannot be split any better.
    /// Without batches the scalar is dropped.
    #[must_use]
    pub fn into_weights(self, kind: WeightKind, first_batch: Option<&Batch>) -> Vec<ScobyWeight> {
        match self {
            Self::Absent => Vec::new(),
            Self::PerTea(weights) => weights,
            Self::Scalar(weight) => match first_batch {
                Some(batch) => {
                    tracing::warn!(
                        field = kind.legacy_field(),
                        tea_id = batch.tea_id,
                        "attributing legacy experiment-wide weight to first batch tea"
                    );
                    vec![ScobyWeight {
                        tea_id: batch.tea_id,
                        tea_name: batch.tea_name.clone(),
                        weight,
                    }]
                }
                None => {
                    tracing::debug!(
                        field = kind.legacy_field(),
                        "dropping legacy weight of experiment without batches"
                    );
                    Vec::new()
                }
            },
        }
    }
}

fn read_weight(value: &Value) -> Option<ScobyWeight> {
    Some(ScobyWeight {
        tea_id: read_id(value.get("teaId")?)?,
        tea_name: read_string(value.get("teaName")).unwrap_or_default(),
        weight: read_number(value.get("weight")?)?,
    })
}

/// A finite number, or a string holding one.
pub(crate) fn read_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

/// A non-negative integer id that fits `u32`.
pub(crate) fn read_id(value: &Value) -> Option<u32> {
    let number = read_number(value)?;
    if number.fract() != 0.0 || number < 0.0 || number > f64::from(u32::MAX) {
        return None;
    }
    u32::try_from(number as u64).ok()
}

/// A string field; absent for anything that is not a string.
pub(crate) fn read_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::entities::TeaSettings;

    #[test]
    fn reads_each_count_shape() {
        assert_eq!(LegacyCount::read(None), LegacyCount::Absent);
        assert_eq!(LegacyCount::read(Some(&json!(null))), LegacyCount::Absent);
        assert_eq!(LegacyCount::read(Some(&json!(7))), LegacyCount::Scalar(7.0));
        assert_eq!(
            LegacyCount::read(Some(&json!([1, null, "x", 2.5]))),
            LegacyCount::Samples(vec![Some(1.0), None, None, Some(2.5)])
        );
        assert_eq!(LegacyCount::read(Some(&json!({"a": 1}))), LegacyCount::Absent);
    }

    #[test]
    fn scalar_fills_every_slot() {
        assert_eq!(
            LegacyCount::Scalar(7.0).into_samples(3),
            Some(vec![Some(7.0), Some(7.0), Some(7.0)])
        );
    }

    #[test]
    fn all_null_array_becomes_absent() {
        assert_eq!(LegacyCount::Samples(vec![None, None, None]).into_samples(3), None);
    }

    #[test]
    fn per_tea_list_wins_over_legacy_scalar() {
        let doc = json!({
            "scobyWeight": 99,
            "scobyWeights": [{"teaId": 2, "teaName": "Green", "weight": 4.5}]
        });
        assert_eq!(
            LegacyWeights::read(&doc, WeightKind::Fresh),
            LegacyWeights::PerTea(vec![ScobyWeight {
                tea_id: 2,
                tea_name: "Green".into(),
                weight: 4.5
            }])
        );
    }

    #[test]
    fn null_legacy_scalar_is_absent() {
        let doc = json!({"scobyWeightDried": null});
        assert_eq!(LegacyWeights::read(&doc, WeightKind::Dried), LegacyWeights::Absent);
    }

    #[test]
    fn duplicate_tea_entries_keep_the_first() {
        let doc = json!({"scobyWeights": [
            {"teaId": 1, "teaName": "Black", "weight": 1.0},
            {"teaId": 1, "teaName": "Black", "weight": 2.0},
            {"teaName": "missing id", "weight": 3.0}
        ]});
        let LegacyWeights::PerTea(weights) = LegacyWeights::read(&doc, WeightKind::Fresh) else {
            panic!("expected per-tea list");
        };
        assert_eq!(weights.len(), 1);
        assert!((weights[0].weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn legacy_scalar_without_batches_is_dropped() {
        assert!(LegacyWeights::Scalar(3.0).into_weights(WeightKind::Fresh, None).is_empty());
    }

    #[test]
    fn legacy_scalar_goes_to_first_batch_tea() {
        let batch = Batch::new(&TeaSettings::placeholder(5, "Rooibos"), 1);
        let weights = LegacyWeights::Scalar(3.0).into_weights(WeightKind::Dried, Some(&batch));
        assert_eq!(weights.len(), 1);
        assert_eq!(weights[0].tea_id, 5);
        assert_eq!(weights[0].tea_name, "Rooibos");
    }

    #[test]
    fn ids_must_be_non_negative_integers() {
        assert_eq!(read_id(&json!(3)), Some(3));
        assert_eq!(read_id(&json!("12")), Some(12));
        assert_eq!(read_id(&json!(1.5)), None);
        assert_eq!(read_id(&json!(-1)), None);
    }
}
