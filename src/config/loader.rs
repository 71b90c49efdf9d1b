// Configuration loader
// Defaults, then ~/.sahay/config.toml, then environment overrides

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::settings::Config;

/// Load configuration from the Sahay config file and environment.
///
/// A missing config file is not an error; defaults apply. A malformed
/// file is.
pub fn load_config() -> Result<Config> {
    let mut config = match dirs::home_dir() {
        Some(home) => load_from_path(&home.join(".sahay/config.toml"))?,
        None => Config::default(),
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var("SAHAY_OLLAMA_URL") {
        if !url.is_empty() {
            config.ollama.base_url = url;
        }
    }
    if let Ok(model) = std::env::var("SAHAY_OLLAMA_MODEL") {
        if !model.is_empty() {
            config.ollama.model = model;
        }
    }
}
