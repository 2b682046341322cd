use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::stages::{Stage, default_stages};

const DEFAULT_CONFIG_TOML: &str = include_str!("../assets/stages.toml");

pub const CONFIG_ENV: &str = "WORKBOARD_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

fn default_version() -> u32 {
    1
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            dark_mode: false,
            stages: default_stages(),
        }
    }
}

impl BoardConfig {
    /// The configuration compiled into the binary. Never fails.
    pub fn embedded() -> Self {
        match Self::parse(DEFAULT_CONFIG_TOML) {
            Ok(config) => {
                debug!(
                    version = config.version,
                    stage_count = config.stages.len(),
                    "loaded embedded board config"
                );
                config
            }
            Err(error) => {
                tracing::error!(%error, "embedded board config is invalid; using built-in stages");
                Self::default()
            }
        }
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(text).context("failed to parse board config")?;
        config.validate()?;
        Ok(config)
    }

    /// Resolution order: explicit path, `WORKBOARD_CONFIG`, the user config
    /// directory, then the embedded default.
    #[tracing::instrument(skip(override_path))]
    pub fn load(override_path: Option<&Path>) -> anyhow::Result<Self> {
        match resolve_config_path(override_path) {
            Some(path) => {
                info!(config = %path.display(), "loading board config");
                Self::load_file(&path)
            }
            None => {
                info!("no board config found; using defaults");
                Ok(Self::embedded())
            }
        }
    }

    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid board config {}", path.display()))
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.stages.is_empty() {
            return Err(anyhow!("board config needs at least one stage"));
        }

        let mut seen = BTreeSet::new();
        for stage in &self.stages {
            let id = stage.id.as_str();
            if id.trim().is_empty() {
                return Err(anyhow!("stage id cannot be empty"));
            }
            if id.trim() != id {
                return Err(anyhow!("stage id {id:?} has surrounding whitespace"));
            }
            if !seen.insert(id) {
                return Err(anyhow!("duplicate stage id: {id}"));
            }
        }
        Ok(())
    }
}

fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path.to_path_buf());
    }

    if let Ok(from_env) = std::env::var(CONFIG_ENV)
        && !from_env.trim().is_empty()
    {
        return Some(PathBuf::from(from_env));
    }

    user_config_path().filter(|candidate| candidate.exists())
}

#[cfg(not(target_arch = "wasm32"))]
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("workboard").join("board.toml"))
}

#[cfg(target_arch = "wasm32")]
fn user_config_path() -> Option<PathBuf> {
    None
}
