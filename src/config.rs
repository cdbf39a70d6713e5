use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

const CONFIG_DIR_PREFIX: &str = "sheets-service";

/// Base URL of the Sheets v4 REST API.
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Service account key looked up in the config directory when none is configured.
pub const SECRET_FILE_NAME: &str = "client_secret.json";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub google: GoogleConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GoogleConfig {
    /// Path to the service account key. Empty means `client_secret.json`
    /// next to the config file.
    #[serde(default)]
    pub secret_file: String,
    #[serde(default)]
    pub base_url: String,
}

impl GoogleConfig {
    pub fn base_url(&self) -> Result<String> {
        let raw = match self.base_url.is_empty() {
            true => DEFAULT_BASE_URL,
            false => self.base_url.as_str(),
        };
        let url = Url::parse(raw)
            .map_err(|e| AppError::Config(format!("Invalid base_url {:?}: {}", raw, e)))?;
        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    pub fn secret_file(&self) -> Result<PathBuf> {
        match self.secret_file.is_empty() {
            true => Config::config_dir_file(SECRET_FILE_NAME),
            false => Ok(PathBuf::from(&self.secret_file)),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file()?;

        if !config_path.exists() {
            return Err(AppError::Config(format!(
                "Config file not found at {:?}. Please create one.",
                config_path
            )));
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        // Fail early on a malformed URL rather than on the first request
        config.google.base_url()?;

        Ok(config)
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        Self::config_dir_file("config.toml")
    }

    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        Self::xdg_dirs()
            .get_config_home()
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }

    fn config_dir_file(filename: &str) -> Result<PathBuf> {
        Self::xdg_dirs()
            .place_config_file(filename)
            .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = Config {
            google: GoogleConfig {
                secret_file: "/etc/sheets/key.json".to_string(),
                base_url: "http://localhost:8080/v4".to_string(),
            },
        };

        let serialized = toml::to_string(&config).unwrap();
        let deserialized = Config::parse(&serialized).unwrap();

        assert_eq!(config.google.secret_file, deserialized.google.secret_file);
        assert_eq!(config.google.base_url, deserialized.google.base_url);
    }

    #[test]
    fn test_default_base_url() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.google.base_url().unwrap(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = Config::parse("[google]\nbase_url = \"http://localhost:9000/v4/\"\n").unwrap();
        assert_eq!(config.google.base_url().unwrap(), "http://localhost:9000/v4");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = Config::parse("[google]\nbase_url = \"not a url\"\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_explicit_secret_file() {
        let config = GoogleConfig {
            secret_file: "/tmp/key.json".to_string(),
            base_url: String::new(),
        };
        assert_eq!(config.secret_file().unwrap(), PathBuf::from("/tmp/key.json"));
    }
}
