use std::fs;
use std::path::Path;

use anyhow::Context;
use lexdannet_config::Config;

/// Load a JSON profile, with env vars layered on top
pub fn load_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let config: Config = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse profile {}", path.display()))?;
    Ok(config.with_env_overrides())
}

/// Profile if given, otherwise defaults plus env vars
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => load_profile(path),
        None => Ok(Config::new()),
    }
}
