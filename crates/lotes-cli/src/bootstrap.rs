use std::path::Path;

use anyhow::Context;
use lotes_config::LotesConfig;

/// Load `.env` (project dir first, then the working directory) and the layered config.
pub fn load_config() -> anyhow::Result<LotesConfig> {
    load_dotenv()?;
    let config = LotesConfig::load().context("failed to load lotes configuration")?;
    if config.database.is_remote() {
        tracing::debug!(url = %config.database.url, "using remote database");
    } else {
        tracing::debug!(path = %config.database.path, "using local database");
    }
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let project_env = Path::new(".lotes").join(".env");
    if project_env.exists() {
        dotenvy::from_path(&project_env)
            .with_context(|| format!("failed to load dotenv file at {}", project_env.display()))?;
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(anyhow::Error::from(error).context("failed to load .env")),
    }
}
