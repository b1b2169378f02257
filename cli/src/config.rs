//! Layered settings for the service connection.
//!
//! Built-in defaults, then a TOML file, then environment variables; each
//! layer overrides the one before it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use feedstream_core::ConfigProvider;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v3";
pub const DEFAULT_API_TOKEN: &str = "123123123";

pub const URL_ENV: &str = "FEEDSTREAM_API_URL";
pub const TOKEN_ENV: &str = "FEEDSTREAM_API_TOKEN";

/// Resolved connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub api_token: String,
}

/// On-disk shape:
///
/// ```toml
/// [api]
/// url = "https://feeds.example.com/api/v3"
/// token = "..."
/// ```
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    api: ApiSection,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    url: Option<String>,
    token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: DEFAULT_API_TOKEN.to_string(),
        }
    }
}

impl Settings {
    /// Resolve settings. An explicit `path` must exist; the per-user default
    /// file is only read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = Self::default();
        match path {
            Some(path) => settings.merge_file(path)?,
            None => {
                if let Some(path) = default_path().filter(|p| p.is_file()) {
                    settings.merge_file(&path)?;
                }
            }
        }
        settings.merge_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        self.merge_toml(&raw)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(())
    }

    fn merge_toml(&mut self, raw: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(raw)?;
        if let Some(url) = file.api.url {
            self.api_url = url;
        }
        if let Some(token) = file.api.token {
            self.api_token = token;
        }
        Ok(())
    }

    /// Empty variables are ignored.
    fn merge_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(URL_ENV).filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.api_token = token;
        }
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.api_url
    }

    fn token(&self) -> &str {
        &self.api_token
    }
}

/// `<user config dir>/feedstream/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("feedstream").join("config.toml"))
}
