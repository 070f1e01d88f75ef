//! General notebook settings.

use scoby_core::entities::{DEFAULT_NUMBER_OF_SAMPLES, MAX_NUMBER_OF_SAMPLES};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_samples() -> usize {
    DEFAULT_NUMBER_OF_SAMPLES
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// User whose settings are used when `--user` is not given.
    #[serde(default)]
    pub default_user: String,

    /// Sample count given to newly created experiments.
    #[serde(default = "default_samples")]
    pub default_samples: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_user: String::new(),
            default_samples: default_samples(),
        }
    }
}

impl GeneralConfig {
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` when `default_samples` is zero or above the
    /// supported maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_samples == 0 || self.default_samples > MAX_NUMBER_OF_SAMPLES {
            return Err(ConfigError::InvalidValue {
                field: "general.default_samples".to_string(),
                reason: format!("must be between 1 and {MAX_NUMBER_OF_SAMPLES}"),
            });
        }
        Ok(())
    }

    /// The configured default user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        let user = self.default_user.trim();
        (!user.is_empty()).then_some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(config.default_user.is_empty());
        assert_eq!(config.user(), None);
        assert_eq!(config.default_samples, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_samples_is_invalid() {
        let config = GeneralConfig {
            default_samples: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.default_samples"));
    }
}
