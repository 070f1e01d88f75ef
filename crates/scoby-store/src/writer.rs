//! Export files under the per-user output directory.
//!
//! Rows are written as JSON lines with `serde_jsonlines`, one row per line,
//! keyed by the exported column titles. Reports are written as one
//! pretty-printed JSON document. A failure of any step is reported as a
//! single [`ExportError`]; nothing is retried.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use scoby_config::ExportConfig;
use scoby_core::entities::Experiment;
use scoby_core::export::ExportRow;
use scoby_core::report::{Report, export_file_name};

use crate::error::ExportError;

pub struct ExportWriter {
    output_dir: PathBuf,
}

impl ExportWriter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.output_dir.clone())
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `rows` to `<output_dir>/<user>/Experiment_..._<user>_<time>.jsonl`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the user name is not a plain directory name
    /// or the file cannot be written.
    pub fn write_rows(
        &self,
        user: &str,
        experiment: &Experiment,
        rows: &[ExportRow],
        generated_at: DateTime<Utc>,
    ) -> Result<PathBuf, ExportError> {
        let path = self.target(user, experiment, generated_at, "jsonl")?;
        serde_jsonlines::write_json_lines(&path, rows)
            .map_err(|e| ExportError::new(format!("could not write {}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), rows = rows.len(), "wrote export rows");
        Ok(path)
    }

    /// Write `report` to `<output_dir>/<user>/Experiment_..._<user>_<time>.json`.
    ///
    /// # Errors
    ///
    /// See [`Self::write_rows`].
    pub fn write_report(
        &self,
        user: &str,
        experiment: &Experiment,
        report: &Report,
        generated_at: DateTime<Utc>,
    ) -> Result<PathBuf, ExportError> {
        let path = self.target(user, experiment, generated_at, "json")?;
        let text = serde_json::to_string_pretty(report)
            .map_err(|e| ExportError::new(format!("could not serialize report: {e}")))?;
        std::fs::write(&path, text)
            .map_err(|e| ExportError::new(format!("could not write {}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "wrote report");
        Ok(path)
    }

    fn target(
        &self,
        user: &str,
        experiment: &Experiment,
        generated_at: DateTime<Utc>,
        extension: &str,
    ) -> Result<PathBuf, ExportError> {
        let mut components = Path::new(user).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(ExportError::new(format!("invalid user name: {user:?}")));
        }

        let dir = self.output_dir.join(user);
        std::fs::create_dir_all(&dir)
            .map_err(|e| ExportError::new(format!("could not create {}: {e}", dir.display())))?;
        let file_name = export_file_name(&experiment.name, user, generated_at, extension);
        if file_name.contains(['/', '\\']) {
            return Err(ExportError::new(format!(
                "experiment name {:?} cannot be used in a file name",
                experiment.name
            )));
        }
        Ok(dir.join(file_name))
    }
}
