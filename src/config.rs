//! User settings that outlive any one session: where state is saved and how
//! a fresh session starts. Lives in `<config_dir>/barloader/config.json`.

use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    session::Session,
    store::StateStore,
    store_error::StoreError,
    unit::{Precision, Unit},
};

const APP_DIR: &str = "barloader";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the session is saved; the platform data directory when unset.
    #[serde(default)]
    pub state_file: Option<PathBuf>,

    #[serde(default)]
    pub default_unit: Unit,

    #[serde(default)]
    pub high_precision: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: None,
            default_unit: Unit::Lbs,
            high_precision: false,
        }
    }
}

impl Config {
    /// # Errors
    /// If the platform has no config directory.
    pub fn config_dir() -> Result<PathBuf, StoreError> {
        let dir = dirs::config_dir().ok_or(StoreError::NoDirectory("config"))?;
        Ok(dir.join(APP_DIR))
    }

    /// # Errors
    /// See [`Config::config_dir`].
    pub fn config_path() -> Result<PathBuf, StoreError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Reads the user's config, falling back to defaults when none is saved.
    ///
    /// # Errors
    /// If there is no config directory, or the file exists but cannot be
    /// read or parsed.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::config_path()?)
    }

    /// # Errors
    /// If the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// # Errors
    /// If there is no config directory or the file cannot be written.
    pub fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::config_path()?)
    }

    /// # Errors
    /// If the directory cannot be created or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// # Errors
    /// If no state file is configured and the platform has no data
    /// directory.
    pub fn state_store(&self) -> Result<StateStore, StoreError> {
        let path = match &self.state_file {
            Some(path) => path.clone(),
            None => StateStore::default_path()?,
        };
        Ok(StateStore::new(path))
    }

    /// The session to start from when nothing has been saved yet.
    #[must_use]
    pub fn fresh_session(&self) -> Session {
        Session::new(self.default_unit, Precision::from_high(self.high_precision))
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self
            .state_store()
            .map_or_else(|_| "(no data directory)".to_string(), |store| store.path().display().to_string());

        writeln!(f, "Default unit:   {}", self.default_unit)?;
        writeln!(f, "High precision: {}", self.high_precision)?;
        writeln!(f, "State file:     {state}")?;
        if let Ok(path) = Self::config_path() {
            writeln!(f, "Config file:    {}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn fresh_session_follows_config() {
        let config: Config =
            serde_json::from_str(r#"{ "default_unit": "kg", "high_precision": true }"#).unwrap();
        let session = config.fresh_session();
        assert_eq!(session.unit(), Unit::Kg);
        assert_eq!(session.precision(), Precision::High);
    }

    #[test]
    fn state_file_override() {
        let config = Config {
            state_file: Some(PathBuf::from("/tmp/barloader-test.json")),
            ..Config::default()
        };
        assert_eq!(
            config.state_store().unwrap().path(),
            PathBuf::from("/tmp/barloader-test.json").as_path()
        );
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_from(&dir.path().join("config.json")).unwrap(), Config::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            state_file: Some(dir.path().join("state.json")),
            default_unit: Unit::Kg,
            high_precision: true,
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(Config::load_from(&path), Err(StoreError::Json(_))));
    }
}
