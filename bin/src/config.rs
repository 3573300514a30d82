//! Configuration for the `plume` command.
//!
//! Loads `config.toml` from the path found by [`discover`], with optional CLI override
//! via `--config`.
//!
//! 1. [`discover`] walks up from the working directory looking for `.plume/config.toml`,
//!    then falls back to `<config_dir>/plume/config.toml`
//! 2. [`Config::load_with_overrides`] picks the config path: CLI override > discovered > defaults

use anyhow::{ensure, Context, Result};
use plume_text::StreamOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".plume";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Bytes read from a file per stream write.
    pub chunk_size: usize,

    pub stream: StreamOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: 8192,
            stream: StreamOptions::default(),
        }
    }
}

impl Config {
    /// Read and deserialize a TOML config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load configuration with priority: CLI override > discovered path > defaults.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path {
            return Self::load(path);
        }
        Self::load_embedded()
    }

    fn load_embedded() -> Result<Self> {
        let source = include_str!("../config.toml");
        Self::parse(source).context("Failed to parse embedded config.toml")
    }

    fn parse(source: &str) -> Result<Self> {
        let config: Config = toml::from_str(source)?;
        ensure!(config.chunk_size > 0, "chunk_size must be greater than zero");
        Ok(config)
    }
}

/// Find the config file for a command run from `start_dir`.
pub fn discover(start_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = walk_ancestors(start_dir) {
        tracing::info!("found project config: {}", path.display());
        return Some(path);
    }

    let path = dirs::config_dir()?.join("plume").join(CONFIG_FILE);
    if path.is_file() {
        tracing::info!("using system config: {}", path.display());
        Some(path)
    } else {
        tracing::debug!("no config file found");
        None
    }
}

fn walk_ancestors(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}
