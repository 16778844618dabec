//! Configuration management for the Bad Chef CLI.

use anyhow::{Context, Result};
use badchef::{client::default_base_url, FileTokenStore, RecipeClient};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Session file kept next to the config file.
const SESSION_FILE: &str = "badchef-session.toml";

/// CLI configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL.
    pub backend_url: Option<String>,
}

impl Config {
    /// Pick the backend: command line or environment first, then this file,
    /// then the built-in default.
    pub fn resolve_backend(&self, flag: Option<&str>) -> String {
        flag.filter(|s| !s.trim().is_empty())
            .map(str::to_owned)
            .or_else(|| {
                self.backend_url
                    .clone()
                    .filter(|s| !s.trim().is_empty())
            })
            .unwrap_or_else(default_base_url)
    }
}

fn exe_dir() -> Result<PathBuf> {
    let exe_path = env::current_exe().context("Could not determine executable path")?;
    let exe_dir = exe_path
        .parent()
        .context("Could not determine executable directory")?;

    Ok(exe_dir.to_path_buf())
}

/// Get the configuration file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(exe_dir()?.join("badchef.toml"))
}

/// Get the session token file path.
pub fn session_path() -> Result<PathBuf> {
    Ok(exe_dir()?.join(SESSION_FILE))
}

/// Load configuration from file.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path).context("Failed to read config file")?;

    toml::from_str(&content).context("Failed to parse config file")
}

/// Save configuration to file.
pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&path, content).context("Failed to write config file")?;

    Ok(())
}

/// Build a client from the current configuration, with the session file as
/// its token store.
pub fn build_client(backend: Option<&str>) -> Result<RecipeClient> {
    let config = load_config()?;
    let store = FileTokenStore::new(session_path()?);

    RecipeClient::builder()
        .base_url(config.resolve_backend(backend))
        .token_store(Arc::new(store))
        .build()
        .context("Failed to build recipe client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_backend_precedence() {
        let config = Config {
            backend_url: Some("http://from-file:8000/".into()),
        };

        assert_eq!(
            config.resolve_backend(Some("http://from-flag/")),
            "http://from-flag/"
        );
        assert_eq!(config.resolve_backend(None), "http://from-file:8000/");
        assert_eq!(config.resolve_backend(Some("  ")), "http://from-file:8000/");
        assert_eq!(Config::default().resolve_backend(None), default_base_url());
    }

    #[test]
    fn test_config_toml() {
        let config: Config = toml::from_str("backend_url = \"http://x/\"").unwrap();
        assert_eq!(config.backend_url.as_deref(), Some("http://x/"));

        let empty: Config = toml::from_str("").unwrap();
        assert!(empty.backend_url.is_none());
    }
}
