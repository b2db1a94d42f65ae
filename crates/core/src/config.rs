//! Application configuration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ::config::{Config, File};
use serde::Deserialize;
use tracing::info;

use crate::{
    save::{default_data_root, ZooStore},
    zoo::DEFAULT_ZOO_NAME,
};

/// Directory under `~/.config` holding the configuration file.
pub const CONFIG_DIR: &str = "zoo-keeper";
/// Configuration file name.
pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# Zoo keeper configuration.

# Name given to a brand new zoo when no saved state exists.
# zoo_name = "My Awesome Zoo"

# File the zoo is saved to on exit and restored from on startup.
# state_file = "/path/to/zoo_data.json"

# Directory for log files.
# log_dir = "/path/to/logs"
"#;

/// Runtime settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Name of a freshly created zoo.
    pub zoo_name: String,
    /// Location of the persisted zoo.
    pub state_file: PathBuf,
    /// Directory receiving `zoo.log`.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            zoo_name: DEFAULT_ZOO_NAME.to_string(),
            state_file: ZooStore::default_path(),
            log_dir: default_data_root().join("logs"),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path`, falling back to defaults for missing keys or file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("zoo_name", defaults.zoo_name)?
            .set_default("state_file", defaults.state_file.to_string_lossy().into_owned())?
            .set_default("log_dir", defaults.log_dir.to_string_lossy().into_owned())?
            .add_source(File::from(path).required(false))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))
    }

    /// Store backed by the configured state file.
    pub fn store(&self) -> ZooStore {
        ZooStore::new(&self.state_file)
    }
}

/// Path of the configuration file under the user's config directory.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write a commented default configuration file if none exists.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_at(config_path())
}

fn ensure_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote default config to {}", path.display());
    Ok(())
}
