// src/config.rs
use crate::postings::TechnologyTable;
use crate::resume::{RowMarkup, SkillTable};
use crate::similarity::VectorizerConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_ENV_VAR: &str = "SKILLRANK_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub markup: RowMarkup,
    pub categories: SkillTable,
    pub scoring: VectorizerConfig,
    pub technologies: TechnologyTable,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from `explicit`, then `$SKILLRANK_CONFIG`, then
    /// `./config.yaml`. Only the implicit file may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        match named {
            Some(path) => {
                let path = Self::resolve_path(&path)?;
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Self::load_from_file(&path)
            }
            None => {
                let path = Self::resolve_path(Path::new(DEFAULT_CONFIG_FILE))?;
                if path.exists() {
                    Self::load_from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Invalid configuration")
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }
}
