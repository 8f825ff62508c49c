//! Store configuration
//!
//! ```toml
//! path = "state/app.ini"
//! create_dirs = true
//! exclude = ["Password", "Log"]
//! ```
//!
//! A relative `path` in a file loaded with [`SettingsConfig::load`] is
//! resolved against the directory holding the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use formstate_core::StatePersister;
use serde::{Deserialize, Serialize};

use crate::errors::{config_error, io_error, Result};
use crate::ini::IniSettings;

fn default_create_dirs() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsConfig {
    /// INI file holding the persisted state
    pub path: PathBuf,

    /// Create the file's parent directory when syncing
    #[serde(default = "default_create_dirs")]
    pub create_dirs: bool,

    /// Control names excluded from save and load
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl SettingsConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_dirs: default_create_dirs(),
            exclude: Vec::new(),
        }
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error for malformed TOML, unknown fields, an
    /// empty `path` or an empty exclusion name.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SettingsConfig =
            toml::from_str(text).map_err(|e| config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read, otherwise the errors
    /// of [`SettingsConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| io_error("read_config", path, e))?;
        let mut config =
            Self::from_toml_str(&text).map_err(|e| e.with_node(path.display().to_string()))?;

        if config.path.is_relative() {
            if let Some(dir) = path.parent() {
                config.path = dir.join(&config.path);
            }
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(config_error("settings path must not be empty"));
        }
        if self.exclude.iter().any(|name| name.is_empty()) {
            return Err(config_error("excluded control names must not be empty"));
        }
        Ok(())
    }

    /// Open the configured INI store
    ///
    /// # Errors
    ///
    /// See [`IniSettings::open`].
    pub fn open_store(&self) -> Result<IniSettings> {
        Ok(IniSettings::open(&self.path)?.create_dirs(self.create_dirs))
    }

    /// Open the store and wrap it in a persister with the configured exclusions
    ///
    /// # Errors
    ///
    /// See [`IniSettings::open`].
    pub fn persister<N>(&self) -> Result<StatePersister<IniSettings, N>>
    where
        N: Copy + std::fmt::Debug,
    {
        let store = self.open_store()?;
        Ok(StatePersister::with_exclusions(
            store,
            self.exclude.iter().cloned(),
        ))
    }
}
