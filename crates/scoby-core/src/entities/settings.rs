use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::TeaSettings;

/// One user's entry in the settings document.
///
/// Experiments stay raw JSON here: they may have been written by any
/// historical version of the notebook and are only given a canonical shape
/// when loaded through [`crate::migrate::migrate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UserSettings {
    #[serde(default)]
    pub teas: Vec<TeaSettings>,
    #[serde(default)]
    pub experiments: Vec<serde_json::Value>,
}

impl UserSettings {
    #[must_use]
    pub fn find_tea(&self, id: u32) -> Option<&TeaSettings> {
        self.teas.iter().find(|tea| tea.id == id)
    }

    /// Position of the stored experiment with the given id, if any.
    #[must_use]
    pub fn experiment_index(&self, id: &str) -> Option<usize> {
        self.experiments
            .iter()
            .position(|raw| raw.get("id").and_then(serde_json::Value::as_str) == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_collections_default_to_empty() {
        let settings: UserSettings = serde_json::from_value(json!({})).unwrap();
        assert!(settings.teas.is_empty());
        assert!(settings.experiments.is_empty());
    }

    #[test]
    fn experiment_index_matches_on_id() {
        let settings = UserSettings {
            teas: Vec::new(),
            experiments: vec![json!({"id": "a"}), json!({"name": "no id"}), json!({"id": "b"})],
        };
        assert_eq!(settings.experiment_index("b"), Some(2));
        assert_eq!(settings.experiment_index("zzz"), None);
    }
}
