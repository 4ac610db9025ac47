// Layered configuration: defaults, optional YAML file, command-line overrides

use eyre::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "personnel";
const CONFIG_FILE: &str = "config.yaml";
const DATA_FILE: &str = "personnel.json";

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Storage file holding the record collection
    pub data_file: PathBuf,
    /// Directory backups go to when no destination is given
    pub backup_dir: PathBuf,
}

/// On-disk form of the config file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_file: Option<PathBuf>,
    backup_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let base = dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_file: base.join(DATA_FILE),
            backup_dir: base.join("backups"),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load settings from `path`, or from [`Config::default_path`] when `None`
    ///
    /// A missing file at the default location means defaults; an explicitly
    /// given file must exist. A malformed file is always an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(config),
            },
        };

        if !required && !path.exists() {
            debug!(file = ?path, "No config file, using defaults");
            return Ok(config);
        }

        let content = fs::read_to_string(&path).with_context(|| format!("Failed to read config file {:?}", path))?;
        let file = Self::parse(&content).with_context(|| format!("Failed to parse config file {:?}", path))?;

        if let Some(data_file) = file.data_file {
            config.data_file = data_file;
        }
        if let Some(backup_dir) = file.backup_dir {
            config.backup_dir = backup_dir;
        }

        debug!(file = ?path, ?config, "Loaded config");
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }
        self
    }

    fn parse(content: &str) -> Result<ConfigFile> {
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}
