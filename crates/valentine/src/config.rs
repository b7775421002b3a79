use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use valentine_message::ShareLinkBuilder;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Origin links are built against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sub-path the viewer is deployed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    /// Path to the config file
    #[serde(skip)]
    pub path: PathBuf,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            base_path: None,
            path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join("config.json");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let mut config: Config = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            config.path = config_path;
            Ok(config)
        } else {
            Ok(Config {
                path: config_path,
                ..Default::default()
            })
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(&self.path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Set the base URL (and optionally the base path) and save
    pub fn set_base_url(&mut self, base_url: &str, base_path: Option<&str>) -> Result<()> {
        let parsed = valentine_message::UrlString::new(base_url)
            .with_context(|| format!("Invalid base URL: {}", base_url))?;
        if parsed.url().query().is_some() || parsed.url().fragment().is_some() {
            anyhow::bail!("Base URL must not carry a query or fragment");
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.base_path = base_path
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
            .map(|p| format!("/{}", p));
        self.save()
    }

    /// Link builder for the configured origin, with per-call overrides
    pub fn link_builder(
        &self,
        base_url: Option<&str>,
        base_path: Option<&str>,
    ) -> ShareLinkBuilder {
        let builder = ShareLinkBuilder::new(base_url.unwrap_or(&self.base_url));
        match base_path.or(self.base_path.as_deref()) {
            Some(path) => builder.base_path(path),
            None => builder,
        }
    }
}
