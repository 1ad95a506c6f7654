// Configuration loader
// Loads settings from ~/.mindcare/config.toml, falling back to environment

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;
use crate::errors::config_parse_error;

/// Directory for config and REPL history
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".mindcare"))
}

/// `$MINDCARE_CONFIG`, or `~/.mindcare/config.toml`
pub fn config_path() -> Result<PathBuf> {
    match std::env::var_os("MINDCARE_CONFIG") {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(config_dir()?.join("config.toml")),
    }
}

/// Load configuration from the config file or environment
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    let openai_key = std::env::var("OPENAI_API_KEY").ok();
    resolve_config(Some(&path), openai_key)
}

/// Resolution order: existing config file, then an OpenAI key, then
/// template-only defaults.
pub fn resolve_config(path: Option<&Path>, openai_key: Option<String>) -> Result<Config> {
    if let Some(path) = path.filter(|p| p.exists()) {
        tracing::debug!("Loading config from {}", path.display());
        return load_from_path(path);
    }

    if let Some(api_key) = openai_key.filter(|k| !k.is_empty()) {
        tracing::debug!("Using OPENAI_API_KEY from environment");
        return Ok(Config::with_openai_key(api_key));
    }

    tracing::debug!("No configuration found; running with curated templates only");
    Ok(Config::default())
}

/// Parse a TOML config file
pub fn load_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str(&contents)
        .map_err(|e| anyhow!(config_parse_error(&path.display().to_string(), &e.to_string())))
}
