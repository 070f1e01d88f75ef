//! In-memory settings repository for tests and dry runs.

use std::collections::HashMap;

use async_trait::async_trait;
use scoby_core::entities::UserSettings;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::repo::SettingsRepository;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserSettings>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one user's settings.
    #[must_use]
    pub fn with_user(user: &str, settings: UserSettings) -> Self {
        Self {
            users: RwLock::new(HashMap::from([(user.to_string(), settings)])),
        }
    }

    /// Whether `user` has ever been saved.
    pub async fn contains(&self, user: &str) -> bool {
        self.users.read().await.contains_key(user)
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn load(&self, user: &str) -> Result<UserSettings, StoreError> {
        Ok(self.users.read().await.get(user).cloned().unwrap_or_default())
    }

    async fn save(&self, user: &str, settings: &UserSettings) -> Result<(), StoreError> {
        self.users
            .write()
            .await
            .insert(user.to_string(), settings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_user_is_empty_until_saved() {
        let store = MemoryStore::new();
        assert!(store.load("mira").await.unwrap().teas.is_empty());
        assert!(!store.contains("mira").await);
        store.save("mira", &UserSettings::default()).await.unwrap();
        assert!(store.contains("mira").await);
    }
}
