use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{ExpenseError, Result},
    ledger::DEFAULT_CATEGORY,
    storage::{self, ensure_dir},
    utils::paths,
};

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const DATA_DIR: &str = "data";

/// User preferences persisted next to the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_category_value")]
    pub default_category: String,
    /// Overrides where `expenses/` and `users/` are stored. Defaults to `<home>/data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_user: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            default_category: Self::default_category_value(),
            data_dir: None,
            last_user: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "£".into()
    }

    pub fn default_category_value() -> String {
        DEFAULT_CATEGORY.into()
    }

    pub fn resolve_data_root(&self, home: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| home.join(DATA_DIR))
    }

    /// Updates a setting by its key, as used by the `config` shell command.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "default_category" => {
                if value.trim().is_empty() {
                    return Err(ExpenseError::InvalidInput(
                        "default_category must not be empty".into(),
                    ));
                }
                self.default_category = crate::ledger::category::normalize(value);
            }
            "data_dir" => {
                self.data_dir = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            other => {
                return Err(ExpenseError::InvalidInput(format!(
                    "unknown setting `{other}`; use currency_symbol, default_category or data_dir"
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_symbol", self.currency_symbol.clone()),
            ("default_category", self.default_category.clone()),
            (
                "data_dir",
                self.data_dir
                    .as_ref()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_else(|| "(default)".into()),
            ),
        ]
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    home: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Uses the application home (`EXPENSE_CORE_HOME` or `~/.expense_core`).
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_home_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let config_root = base.join(CONFIG_DIR);
        ensure_dir(&config_root)?;
        Ok(Self {
            path: config_root.join(CONFIG_FILE),
            home: base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| ExpenseError::Config(err.to_string()))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        storage::write_json(config, &self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.resolve_data_root(manager.home()),
            temp.path().join("data")
        );
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("currency_symbol", "$").unwrap();
        config.set("default_category", "transport").unwrap();
        config.last_user = Some("alice".into());
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.default_category, "Transport");
        assert_eq!(loaded.last_user.as_deref(), Some("alice"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut config = Config::default();
        assert!(config.set("theme", "dark").is_err());
    }

    #[test]
    fn malformed_config_reports_config_error() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{ nope").unwrap();
        assert!(matches!(manager.load(), Err(ExpenseError::Config(_))));
    }
}
