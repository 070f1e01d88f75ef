//! The settings repository seam.

use async_trait::async_trait;
use scoby_core::entities::UserSettings;

use crate::error::StoreError;

/// Whole-document access to one user's settings.
///
/// There is no partial update: callers load the full settings, change them
/// and save them back. Concurrent writers are not coordinated; the last save
/// wins.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Settings of `user`. A user without an entry gets empty settings.
    async fn load(&self, user: &str) -> Result<UserSettings, StoreError>;

    /// Replace the settings of `user`.
    async fn save(&self, user: &str, settings: &UserSettings) -> Result<(), StoreError>;
}
