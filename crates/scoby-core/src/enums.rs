//! Field selectors and export variable tags.
//!
//! All selector enums use `snake_case` serialization so they can be parsed
//! straight from CLI arguments. `Variable` serializes to the exact labels
//! written into the `Variable` column of exported rows.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CountKind
// ---------------------------------------------------------------------------

/// The three microbial count categories tracked per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CountKind {
    /// Lactic-acid bacteria.
    Lab,
    /// Acetic-acid bacteria.
    Aab,
    /// Combined yeast and mould.
    YeastMould,
}

impl CountKind {
    pub const ALL: [Self; 3] = [Self::Lab, Self::Aab, Self::YeastMould];

    /// Field name in the stored batch document.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Lab => "labCount",
            Self::Aab => "aabCount",
            Self::YeastMould => "yeastMouldCount",
        }
    }

    /// Short label used in report column headers (`LAB #1`, `Y+M #2`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lab => "LAB",
            Self::Aab => "AAB",
            Self::YeastMould => "Y+M",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lab => "lab",
            Self::Aab => "aab",
            Self::YeastMould => "yeast_mould",
        }
    }
}

impl fmt::Display for CountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TimestampField
// ---------------------------------------------------------------------------

/// Protocol timestamps recorded per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimestampField {
    TakenOut,
    Plated,
    HplcVial,
    PhTimestamp,
}

impl TimestampField {
    pub const ALL: [Self; 4] = [
        Self::TakenOut,
        Self::Plated,
        Self::HplcVial,
        Self::PhTimestamp,
    ];

    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::TakenOut => "takenOut",
            Self::Plated => "plated",
            Self::HplcVial => "hplcVial",
            Self::PhTimestamp => "phTimestamp",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TakenOut => "taken_out",
            Self::Plated => "plated",
            Self::HplcVial => "hplc_vial",
            Self::PhTimestamp => "ph_timestamp",
        }
    }
}

impl fmt::Display for TimestampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// The three independent protocol sections of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Protocol,
    CellCounting,
    ScobyDried,
}

impl Section {
    pub const ALL: [Self; 3] = [Self::Protocol, Self::CellCounting, Self::ScobyDried];

    /// Prefix of the flat stored field names (`protocolDate`, `cellCountingNotes`, ...).
    #[must_use]
    pub const fn field_prefix(self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::CellCounting => "cellCounting",
            Self::ScobyDried => "scobyDried",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::CellCounting => "cell_counting",
            Self::ScobyDried => "scoby_dried",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WeightKind
// ---------------------------------------------------------------------------

/// Which Scoby weight list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeightKind {
    /// `scobyWeights`, governed by the Protocol section date.
    Fresh,
    /// `scobyWeightsDried`, governed by the Scoby-Dried section date.
    Dried,
}

impl WeightKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Dried => "dried",
        }
    }

    /// Legacy scalar field this list replaced.
    #[must_use]
    pub const fn legacy_field(self) -> &'static str {
        match self {
            Self::Fresh => "scobyWeight",
            Self::Dried => "scobyWeightDried",
        }
    }

    /// Current array field name.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Fresh => "scobyWeights",
            Self::Dried => "scobyWeightsDried",
        }
    }
}

impl fmt::Display for WeightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Variable
// ---------------------------------------------------------------------------

/// Measurement kind written into the `Variable` column of exported rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Variable {
    #[serde(rename = "Tea weighted")]
    TeaWeighted,
    #[serde(rename = "Dried Tea weighted")]
    DriedTeaWeighted,
    #[serde(rename = "LAB")]
    Lab,
    #[serde(rename = "AAB")]
    Aab,
    #[serde(rename = "Y+M")]
    YeastMould,
    #[serde(rename = "Taken out")]
    TakenOut,
    #[serde(rename = "Plated")]
    Plated,
    #[serde(rename = "Ph value")]
    PhValue,
}

impl Variable {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TeaWeighted => "Tea weighted",
            Self::DriedTeaWeighted => "Dried Tea weighted",
            Self::Lab => "LAB",
            Self::Aab => "AAB",
            Self::YeastMould => "Y+M",
            Self::TakenOut => "Taken out",
            Self::Plated => "Plated",
            Self::PhValue => "Ph value",
        }
    }

    #[must_use]
    pub const fn for_count(kind: CountKind) -> Self {
        match kind {
            CountKind::Lab => Self::Lab,
            CountKind::Aab => Self::Aab,
            CountKind::YeastMould => Self::YeastMould,
        }
    }

    #[must_use]
    pub const fn for_weight(kind: WeightKind) -> Self {
        match kind {
            WeightKind::Fresh => Self::TeaWeighted,
            WeightKind::Dried => Self::DriedTeaWeighted,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_serializes_to_export_labels() {
        for variable in [
            Variable::TeaWeighted,
            Variable::DriedTeaWeighted,
            Variable::Lab,
            Variable::Aab,
            Variable::YeastMould,
            Variable::TakenOut,
            Variable::Plated,
            Variable::PhValue,
        ] {
            let json = serde_json::to_string(&variable).unwrap();
            assert_eq!(json, format!("\"{}\"", variable.as_str()));
        }
    }

    #[test]
    fn count_kind_parses_snake_case() {
        let kind: CountKind = serde_json::from_str("\"yeast_mould\"").unwrap();
        assert_eq!(kind, CountKind::YeastMould);
        assert_eq!(kind.field_name(), "yeastMouldCount");
        assert_eq!(kind.label(), "Y+M");
    }

    #[test]
    fn weight_kind_field_names() {
        assert_eq!(WeightKind::Fresh.legacy_field(), "scobyWeight");
        assert_eq!(WeightKind::Dried.field_name(), "scobyWeightsDried");
    }

    #[test]
    fn section_prefixes_match_stored_fields() {
        assert_eq!(Section::CellCounting.field_prefix(), "cellCounting");
        assert_eq!(Section::ScobyDried.to_string(), "scoby_dried");
    }
}
