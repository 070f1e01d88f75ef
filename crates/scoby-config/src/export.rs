//! Where exported files are written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_output_dir() -> PathBuf {
    PathBuf::from("user-files")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Root of the per-user export directories.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl ExportConfig {
    /// Directory receiving `user`'s exports.
    #[must_use]
    pub fn user_dir(&self, user: &str) -> PathBuf {
        Path::new(&self.output_dir).join(user)
    }
}
