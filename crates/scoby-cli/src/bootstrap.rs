use anyhow::Context;
use scoby_config::ScobyConfig;

/// Load `.env` from the working directory (when present) and then the
/// layered configuration.
pub fn load_config() -> anyhow::Result<ScobyConfig> {
    load_dotenv()?;
    ScobyConfig::load().context("failed to load scoby configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(anyhow::anyhow!("failed to load .env: {error}")),
    }
}
