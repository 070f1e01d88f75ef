//! Notebook service: the load, migrate, edit, save cycle.
//!
//! `NotebookService` wraps a [`SettingsRepository`] for one user. Stored
//! experiments are migrated on every load and written back in canonical
//! shape on every save; experiments that are only read are left as stored.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use scoby_core::aggregate::{BatchSummary, summarize};
use scoby_core::edit::TeaSelection;
use scoby_core::entities::{Experiment, TeaSettings, UserSettings};
use scoby_core::errors::CoreError;
use scoby_core::export::{ExportRow, to_rows};
use scoby_core::migrate::migrate;
use scoby_core::report::{Report, build_report};

use crate::error::StoreError;
use crate::repo::SettingsRepository;

/// One line of the experiment list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentListing {
    pub id: String,
    pub name: String,
    pub date: String,
    pub description: String,
    pub batch_count: usize,
    pub number_of_samples: usize,
}

impl From<&Experiment> for ExperimentListing {
    fn from(experiment: &Experiment) -> Self {
        Self {
            id: experiment.id.clone(),
            name: experiment.name.clone(),
            date: experiment.date.clone(),
            description: experiment.description.clone(),
            batch_count: experiment.batches.len(),
            number_of_samples: experiment.number_of_samples,
        }
    }
}

/// Formulation of a tea to be added; the id is assigned on insert.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTea {
    pub name: String,
    pub tea_grams_per_liter: f64,
    pub incubator_temperature: f64,
    pub sugar_type: String,
    pub sugar_grams_per_liter: f64,
    pub inoculum_concentration: f64,
}

pub struct NotebookService<R> {
    repo: R,
    user: String,
}

impl<R: SettingsRepository> NotebookService<R> {
    pub fn new(repo: R, user: impl Into<String>) -> Self {
        Self {
            repo,
            user: user.into(),
        }
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub const fn repo(&self) -> &R {
        &self.repo
    }

    /// Settings of the user, written back so a first-time user gets an
    /// empty entry in the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub async fn ensure_user(&self) -> Result<UserSettings, StoreError> {
        let settings = self.repo.load(&self.user).await?;
        self.repo.save(&self.user, &settings).await?;
        Ok(settings)
    }

    async fn settings(&self) -> Result<UserSettings, StoreError> {
        self.repo.load(&self.user).await
    }

    // -----------------------------------------------------------------------
    // Teas
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub async fn teas(&self) -> Result<Vec<TeaSettings>, StoreError> {
        Ok(self.settings().await?.teas)
    }

    /// Store a new tea under the next free id.
    ///
    /// # Errors
    ///
    /// `StoreError::Core` when the name or sugar type is blank.
    pub async fn add_tea(&self, tea: NewTea) -> Result<TeaSettings, StoreError> {
        let mut settings = self.settings().await?;
        let tea = TeaSettings {
            id: TeaSettings::next_id(&settings.teas),
            name: tea.name.trim().to_string(),
            tea_grams_per_liter: tea.tea_grams_per_liter,
            incubator_temperature: tea.incubator_temperature,
            sugar_type: tea.sugar_type.trim().to_string(),
            sugar_grams_per_liter: tea.sugar_grams_per_liter,
            inoculum_concentration: tea.inoculum_concentration,
        };
        tea.validate()?;
        settings.teas.push(tea.clone());
        self.repo.save(&self.user, &settings).await?;
        tracing::info!(user = %self.user, tea_id = tea.id, name = %tea.name, "added tea");
        Ok(tea)
    }

    /// Remove a tea from the settings. Batches keep their copied tea name.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` for an unknown id.
    pub async fn remove_tea(&self, id: u32) -> Result<TeaSettings, StoreError> {
        let mut settings = self.settings().await?;
        let index = settings
            .teas
            .iter()
            .position(|tea| tea.id == id)
            .ok_or_else(|| StoreError::tea_not_found(id))?;
        let removed = settings.teas.remove(index);
        self.repo.save(&self.user, &settings).await?;
        tracing::info!(user = %self.user, tea_id = id, "removed tea");
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Experiments
    // -----------------------------------------------------------------------

    /// Every stored experiment, migrated, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub async fn experiments(&self) -> Result<Vec<Experiment>, StoreError> {
        Ok(self.settings().await?.experiments.iter().map(migrate).collect())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub async fn list_experiments(&self) -> Result<Vec<ExperimentListing>, StoreError> {
        Ok(self
            .experiments()
            .await?
            .iter()
            .map(ExperimentListing::from)
            .collect())
    }

    /// The experiment with `id`, migrated.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` for an unknown id.
    pub async fn load_experiment(&self, id: &str) -> Result<Experiment, StoreError> {
        let settings = self.settings().await?;
        locate(&settings, id)
            .map(|(_, experiment)| experiment)
            .ok_or_else(|| StoreError::experiment_not_found(id))
    }

    /// Create an experiment from `(tea id, replicates)` pairs and store it.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` for a tea id missing from the settings,
    /// `StoreError::Core` for invalid input.
    pub async fn create_experiment(
        &self,
        name: &str,
        description: &str,
        selections: &[(u32, u32)],
        number_of_samples: usize,
    ) -> Result<Experiment, StoreError> {
        let mut settings = self.settings().await?;
        let selections = selections
            .iter()
            .map(|&(tea_id, replicates)| {
                settings
                    .find_tea(tea_id)
                    .cloned()
                    .map(|tea| TeaSelection { tea, replicates })
                    .ok_or_else(|| StoreError::tea_not_found(tea_id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut experiment = Experiment::create(name, description, &selections)?;
        if number_of_samples != experiment.number_of_samples {
            experiment.resize(number_of_samples)?;
        }

        settings.experiments.push(serde_json::to_value(&experiment)?);
        self.repo.save(&self.user, &settings).await?;
        tracing::info!(
            user = %self.user,
            experiment = %experiment.id,
            batches = experiment.batches.len(),
            "created experiment"
        );
        Ok(experiment)
    }

    /// Replace the stored experiment with the same id.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when no stored experiment has that id.
    pub async fn save_experiment(&self, experiment: &Experiment) -> Result<(), StoreError> {
        let mut settings = self.settings().await?;
        let (index, _) = locate(&settings, &experiment.id)
            .ok_or_else(|| StoreError::experiment_not_found(&experiment.id))?;
        settings.experiments[index] = serde_json::to_value(experiment)?;
        self.repo.save(&self.user, &settings).await?;
        tracing::debug!(user = %self.user, experiment = %experiment.id, "saved experiment");
        Ok(())
    }

    /// Load, apply `edit`, and save back. Nothing is saved when the edit fails.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` for an unknown id, `StoreError::Core` when the
    /// edit is rejected.
    pub async fn update_experiment<T>(
        &self,
        id: &str,
        edit: impl FnOnce(&mut Experiment) -> Result<T, CoreError> + Send,
    ) -> Result<(Experiment, T), StoreError> {
        let mut settings = self.settings().await?;
        let (index, mut experiment) =
            locate(&settings, id).ok_or_else(|| StoreError::experiment_not_found(id))?;
        let outcome = edit(&mut experiment)?;
        settings.experiments[index] = serde_json::to_value(&experiment)?;
        self.repo.save(&self.user, &settings).await?;
        Ok((experiment, outcome))
    }

    /// # Errors
    ///
    /// `StoreError::NotFound` for an unknown id.
    pub async fn delete_experiment(&self, id: &str) -> Result<Experiment, StoreError> {
        let mut settings = self.settings().await?;
        let (index, experiment) =
            locate(&settings, id).ok_or_else(|| StoreError::experiment_not_found(id))?;
        settings.experiments.remove(index);
        self.repo.save(&self.user, &settings).await?;
        tracing::info!(user = %self.user, experiment = %id, "deleted experiment");
        Ok(experiment)
    }

    /// Migrate every stored experiment and write the canonical shapes back.
    /// Returns how many were stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub async fn migrate_all(&self) -> Result<usize, StoreError> {
        let mut settings = self.settings().await?;
        settings.experiments = settings
            .experiments
            .iter()
            .map(|raw| serde_json::to_value(migrate(raw)))
            .collect::<Result<_, _>>()?;
        self.repo.save(&self.user, &settings).await?;
        tracing::info!(user = %self.user, count = settings.experiments.len(), "migrated experiments");
        Ok(settings.experiments.len())
    }

    // -----------------------------------------------------------------------
    // Derived output
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// `StoreError::NotFound` for an unknown id.
    pub async fn summary(&self, id: &str) -> Result<Vec<BatchSummary>, StoreError> {
        Ok(summarize(&self.load_experiment(id).await?))
    }

    /// # Errors
    ///
    /// `StoreError::NotFound` for an unknown id.
    pub async fn export_rows(&self, id: &str) -> Result<(Experiment, Vec<ExportRow>), StoreError> {
        let experiment = self.load_experiment(id).await?;
        let rows = to_rows(&experiment);
        Ok((experiment, rows))
    }

    /// Report of the experiment with teas resolved against current settings.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` for an unknown id.
    pub async fn report(&self, id: &str) -> Result<(Experiment, Report), StoreError> {
        let settings = self.settings().await?;
        let (_, experiment) =
            locate(&settings, id).ok_or_else(|| StoreError::experiment_not_found(id))?;
        let report = build_report(&experiment, &settings.teas);
        Ok((experiment, report))
    }
}

/// Position and migrated form of the stored experiment with `id`.
fn locate(settings: &UserSettings, id: &str) -> Option<(usize, Experiment)> {
    if let Some(index) = settings.experiment_index(id) {
        return Some((index, migrate(&settings.experiments[index])));
    }
    // Ids stored as numbers by hand-edited files only match after migration.
    settings
        .experiments
        .iter()
        .map(migrate)
        .enumerate()
        .find(|(_, experiment)| experiment.id == id)
}
