use std::path::{Path, PathBuf};

use anyhow::Context;
use dosh_config::Config;

/// Profile picked up from the working directory when no `--config` is given
const DEFAULT_PROFILE: &str = "dosh.json";

/// Resolve the config: explicit file, then `./dosh.json`, then env defaults
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::from_file(path)
            .with_context(|| format!("Failed to load profile {}", path.display()));
    }

    let local = PathBuf::from(DEFAULT_PROFILE);
    if local.exists() {
        return Config::from_file(&local).context("Failed to load ./dosh.json");
    }

    tracing::debug!("No profile found, using environment and defaults");
    Ok(Config::new())
}
