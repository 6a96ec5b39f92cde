//! `config.toml` under the platform config directory (`liner-notes/`).
//!
//! Two sections: `[fetch]` for how pages are obtained (live or through
//! snapshots) and `[extract]` for the language plain queries resolve in.
//! Command-line flags win over the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::document::Language;
use crate::source::fetcher::USER_AGENT;

/// Settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page fetching settings
    pub fetch: FetchConfig,

    /// Extraction settings
    pub extract: ExtractConfig,
}

/// Page fetching settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Read and write page snapshots instead of always fetching
    pub cache_mode: bool,

    /// Snapshot directory (empty = user cache directory)
    pub cache_dir: Option<PathBuf>,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            cache_mode: false,
            cache_dir: None,
            user_agent: USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Language of plain queries when none is given
    pub default_language: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            default_language: Language::ENGLISH.to_string(),
        }
    }
}

impl ExtractConfig {
    pub fn language(&self) -> Language {
        Language::new(&self.default_language)
    }
}

/// `<platform config dir>/liner-notes`
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("liner-notes"))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Read the config file. A missing or broken file yields the defaults.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file, with the same fallbacks as
/// [`load`].
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file found, using defaults");
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to parse config file");
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read config file");
            Config::default()
        }
    }
}

/// Write the config file and return where it went.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Write `config` to `path` through a temporary sibling file.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!(path = %path.display(), "Saved config");
    Ok(())
}

/// Failures saving the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

impl From<ConfigError> for crate::error::Error {
    fn from(err: ConfigError) -> Self {
        crate::error::Error::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[fetch]"));
        assert!(toml.contains("[extract]"));
        assert!(toml.contains("timeout_secs = 30"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.fetch.cache_mode = true;
        config.fetch.cache_dir = Some(PathBuf::from("/tmp/pages"));
        config.extract.default_language = "fa".to_string();

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed, config);
        assert_eq!(parsed.extract.language(), Language::new("fa"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[fetch]
cache_mode = true
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert!(config.fetch.cache_mode);
        assert_eq!(config.fetch.user_agent, USER_AGENT);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(30));
        assert_eq!(config.extract.language(), Language::english());
    }

    #[test]
    fn test_save_and_load_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.fetch.timeout_secs = 5;
        save_to(&config, &path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(load_from(&path), config);
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[fetch\ncache_mode = ").unwrap();

        assert_eq!(load_from(&path), Config::default());
        assert_eq!(load_from(&temp.path().join("missing.toml")), Config::default());
    }

    #[test]
    fn test_save_under_a_file_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let err = save_to(&Config::default(), &blocker.join("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::CreateDir(..)));

        let err: crate::error::Error = err.into();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }
}
