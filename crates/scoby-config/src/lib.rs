//! # scoby-config
//!
//! Layered configuration loading for the Scoby notebook using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SCOBY_*` prefix, `__` as separator)
//! 2. Project-level `.scoby/config.toml`
//! 3. User-level `~/.config/scoby/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `SCOBY_STORE__PATH` -> `store.path`,
//! `SCOBY_GENERAL__DEFAULT_USER` -> `general.default_user`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use scoby_config::ScobyConfig;
//!
//! let config = ScobyConfig::load_with_dotenv().expect("config");
//! println!("settings file: {}", config.store.path.display());
//! ```

mod error;
mod export;
mod general;
mod store;

pub use error::ConfigError;
pub use export::ExportConfig;
pub use general::GeneralConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SCOBY_";

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".scoby/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScobyConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ScobyConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env`
    /// support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source cannot be parsed and
    /// `ConfigError::InvalidValue` when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is not an error.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.general.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so callers can layer extra providers (CLI flags) on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scoby").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = ScobyConfig::default();
        assert_eq!(config.store.path, PathBuf::from("userSettings.json"));
        assert_eq!(config.export.output_dir, PathBuf::from("user-files"));
        assert_eq!(config.general.default_samples, 3);
    }

    #[test]
    fn global_path_ends_in_scoby_config() {
        if let Some(path) = ScobyConfig::global_config_path() {
            assert!(path.ends_with("scoby/config.toml"));
        }
    }
}
