use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::scanner::template::DEFAULT_TEMPLATE_PATH;

/// Environment variable consulted for the analysis API key.
pub const API_KEY_ENV: &str = "COPYRIGHT_SCANR_API_KEY";

/// Root configuration structure, deserialized from `.copyright-scanr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Batch scan settings.
    #[serde(default)]
    pub scan: ScanConfig,
    /// Analysis service settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize)]
pub struct ScanConfig {
    /// Template prefix prepended to each batch report.
    #[serde(default = "default_template")]
    pub template: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
        }
    }
}

fn default_template() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_PATH)
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    /// Base URL of the analysis server; `/mcp` is appended.
    pub endpoint: Option<String>,
    /// Bearer token. Falls back to [`API_KEY_ENV`].
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Load configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.copyright-scanr/config.toml`
/// 3. `~/.config/copyright-scanr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = working_dir.join(".copyright-scanr").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("copyright-scanr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
