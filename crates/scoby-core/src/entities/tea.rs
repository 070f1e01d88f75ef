use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Formulation parameters of one tea, owned by a user's settings.
///
/// Batches copy `id` and `name` at creation time and are not updated when
/// the tea is edited later.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeaSettings {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub tea_grams_per_liter: f64,
    #[serde(default)]
    pub incubator_temperature: f64,
    #[serde(default)]
    pub sugar_type: String,
    #[serde(default)]
    pub sugar_grams_per_liter: f64,
    #[serde(default)]
    pub inoculum_concentration: f64,
}

impl TeaSettings {
    /// Minimal entry for a tea id that no longer resolves against the user's
    /// settings. Used by reports so an export never fails on a stale reference.
    #[must_use]
    pub fn placeholder(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            tea_grams_per_liter: 0.0,
            incubator_temperature: 0.0,
            sugar_type: "Unknown".to_string(),
            sugar_grams_per_liter: 0.0,
            inoculum_concentration: 0.0,
        }
    }

    /// Next free id: one past the highest existing id, or 1.
    #[must_use]
    pub fn next_id(teas: &[Self]) -> u32 {
        teas.iter().map(|tea| tea.id).max().map_or(1, |max| max + 1)
    }

    /// A tea needs a name and a sugar type before it can be stored.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first missing field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("tea name is required".to_string()));
        }
        if self.sugar_type.trim().is_empty() {
            return Err(CoreError::Validation("sugar type is required".to_string()));
        }
        Ok(())
    }
}
