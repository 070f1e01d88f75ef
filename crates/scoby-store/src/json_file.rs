//! Settings document kept in one pretty-printed JSON file.
//!
//! The file maps user names to `{teas, experiments}`. Entries of other users
//! are carried through a save untouched, as raw JSON.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use scoby_config::StoreConfig;
use scoby_core::entities::UserSettings;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::repo::SettingsRepository;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.path.clone())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole document. A missing file reads as an empty document.
    async fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "settings file missing, starting empty");
                return Ok(Map::new());
            }
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn write_document(&self, document: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let text = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for JsonFileStore {
    async fn load(&self, user: &str) -> Result<UserSettings, StoreError> {
        let mut document = self.read_document().await?;
        match document.remove(user) {
            Some(entry) => Ok(serde_json::from_value(entry)?),
            None => Ok(UserSettings::default()),
        }
    }

    async fn save(&self, user: &str, settings: &UserSettings) -> Result<(), StoreError> {
        let mut document = self.read_document().await?;
        document.insert(user.to_string(), serde_json::to_value(settings)?);
        self.write_document(&document).await?;
        tracing::debug!(
            user,
            path = %self.path.display(),
            experiments = settings.experiments.len(),
            "saved settings"
        );
        Ok(())
    }
}
