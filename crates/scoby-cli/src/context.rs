use anyhow::Context;
use scoby_config::ScobyConfig;
use scoby_store::{ExportWriter, JsonFileStore, NotebookService};

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: NotebookService<JsonFileStore>,
    pub writer: ExportWriter,
    pub config: ScobyConfig,
}

impl AppContext {
    /// Resolve the user and the settings file from flags over config.
    pub fn init(config: ScobyConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let user = resolve_user(flags.user.as_deref(), config.general.user())?;
        let store = flags
            .store
            .as_ref()
            .map_or_else(
                || JsonFileStore::from_config(&config.store),
                |path| JsonFileStore::new(path.clone()),
            );
        tracing::debug!(user = %user, store = %store.path().display(), "opening notebook");

        Ok(Self {
            service: NotebookService::new(store, user),
            writer: ExportWriter::from_config(&config.export),
            config,
        })
    }
}

/// `--user` wins over `general.default_user`; one of them is required.
fn resolve_user(flag: Option<&str>, configured: Option<&str>) -> anyhow::Result<String> {
    flag.map(str::trim)
        .filter(|user| !user.is_empty())
        .or(configured)
        .map(str::to_string)
        .context("no user selected: pass --user or set general.default_user")
}

#[cfg(test)]
mod tests {
    use super::resolve_user;

    #[test]
    fn flag_takes_precedence() {
        let user = resolve_user(Some("ana"), Some("ben")).expect("user should resolve");
        assert_eq!(user, "ana");
    }

    #[test]
    fn config_used_when_flag_missing_or_blank() {
        assert_eq!(resolve_user(None, Some("ben")).expect("user"), "ben");
        assert_eq!(resolve_user(Some("  "), Some("ben")).expect("user"), "ben");
    }

    #[test]
    fn missing_user_is_an_error() {
        let err = resolve_user(None, None).expect_err("should fail");
        assert!(err.to_string().contains("--user"));
    }
}
