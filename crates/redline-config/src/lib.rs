mod checks;

use redline_engine::{DEFAULT_HISTORY_DEPTH, OutputMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use checks::ChecksFile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

fn default_history_depth() -> usize {
    DEFAULT_HISTORY_DEPTH
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Root that document paths are resolved against.
    pub documents_path: PathBuf,
    /// Check definitions; defaults to `checks.toml` next to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks_path: Option<PathBuf>,
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    /// Used for checks that don't name a mode.
    #[serde(default)]
    pub default_mode: OutputMode,
}

impl Config {
    pub fn new(documents_path: impl Into<PathBuf>) -> Self {
        Self {
            documents_path: documents_path.into(),
            checks_path: None,
            history_depth: DEFAULT_HISTORY_DEPTH,
            default_mode: OutputMode::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.documents_path =
            Self::expand_path(&config.documents_path).unwrap_or(config.documents_path);
        config.checks_path = config
            .checks_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_dir() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-redline");
        PathBuf::from(config_dir.as_ref())
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// The check definitions this config points at.
    pub fn checks(&self) -> ChecksFile {
        let path = self
            .checks_path
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("checks.toml"));
        ChecksFile::new(path, self.default_mode)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
