//! Configuration management for quickshare.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "quickshare";

/// Default vault database file name.
const VAULT_FILE_NAME: &str = "vault.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `QUICKSHARE_`, sections split on
///    `__`, e.g. `QUICKSHARE_STORAGE__VAULT_PATH`)
/// 2. TOML config file at `~/.config/quickshare/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the vault database file.
    /// Defaults to `~/.local/share/quickshare/vault.db`
    pub vault_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `QUICKSHARE_`, sections split
    ///    on `__` so field names may themselves contain underscores, e.g.
    ///    `QUICKSHARE_STORAGE__VAULT_PATH`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("QUICKSHARE_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        // An empty vault_path can sneak in via an env var set to ""
        if let Some(path) = &self.storage.vault_path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "vault_path must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the vault database path, resolving defaults if not set.
    #[must_use]
    pub fn vault_path(&self) -> PathBuf {
        self.storage
            .vault_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(VAULT_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.storage.vault_path.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_vault_path() {
        let mut config = Config::default();
        config.storage.vault_path = Some(PathBuf::new());

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("vault_path"));
    }

    #[test]
    fn test_vault_path_default() {
        let config = Config::default();
        let path = config.vault_path();

        assert!(path.to_string_lossy().contains("vault.db"));
        assert!(path.to_string_lossy().contains("quickshare"));
    }

    #[test]
    fn test_vault_path_custom() {
        let mut config = Config::default();
        config.storage.vault_path = Some(PathBuf::from("/custom/path/vault.db"));

        assert_eq!(config.vault_path(), PathBuf::from("/custom/path/vault.db"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("quickshare"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_default_data_dir() {
        let path = Config::default_data_dir();
        assert!(path.to_string_lossy().contains("quickshare"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_var_overrides_vault_path() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("QUICKSHARE_STORAGE__VAULT_PATH", "/tmp/env-vault.db");

            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .expect("config should load from env");
            assert_eq!(
                config.storage.vault_path,
                Some(PathBuf::from("/tmp/env-vault.db"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_env_var_overrides_toml_value() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [storage]
                vault_path = "/from/toml/vault.db"
                "#,
            )?;
            jail.set_env("QUICKSHARE_STORAGE__VAULT_PATH", "/from/env/vault.db");

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .expect("config should load");
            assert_eq!(
                config.storage.vault_path,
                Some(PathBuf::from("/from/env/vault.db"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_storage_config_serialize() {
        let storage = StorageConfig::default();
        let json = serde_json::to_string(&storage).unwrap();
        assert!(json.contains("vault_path"));
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"vault_path": "/tmp/test-vault.db"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.vault_path, Some(PathBuf::from("/tmp/test-vault.db")));
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
