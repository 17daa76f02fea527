//! Configuration file handling for gust
//!
//! The config is optional: a `.gust.yaml` (or `.json`) found in the current
//! directory or one of its parents can declare aliases, disabled commands,
//! and the external tool name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("unable to parse JSON config file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

/// List of supported configuration file names
const FILENAMES: [&str; 3] = [".gust.json", ".gust.yaml", ".gust.yml"];

/// Root configuration structure for gust
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// Command name to replacement token sequence, applied to the front of
    /// the argument vector before anything runs.
    #[serde(default)]
    pub aliases: HashMap<String, Vec<String>>,
    /// Command names that refuse to run.
    #[serde(default)]
    pub disabled: Vec<String>,
    /// External tool name override; the `GIT` environment variable wins.
    pub git: Option<String>,
}

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file cannot be read,
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails, or
    /// `ConfigError::Validation` for an empty alias expansion.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file)
            .map_err(|_| ConfigError::ConfigNotFound(file.to_path_buf()))?;
        let config: Config = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Searches for a configuration file in `start` and its parents.
    /// Absence of a config file is not an error.
    #[must_use]
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        let mut path = start.to_path_buf();
        debug!("Searching for config file in {}", start.display());
        loop {
            for file in &FILENAMES {
                let config_path = path.join(file);
                if config_path.exists() {
                    info!("Found config file: {}", config_path.display());
                    return Some(config_path);
                }
            }
            if !path.pop() {
                return None;
            }
        }
    }

    /// Load the configuration: an explicit path must exist, otherwise the
    /// file is auto-detected and its absence yields the default config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` for an explicit path that does
    /// not exist, `ConfigError::UnknownWorkingDirectory` if the cwd cannot
    /// be determined, or any `from_file` error.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
                }
                Self::from_file(path)
            }
            None => {
                let cwd = std::env::current_dir()
                    .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
                match Self::find_config(&cwd) {
                    Some(path) => Self::from_file(&path),
                    None => Ok(Config::default()),
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, expansion) in &self.aliases {
            if expansion.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "alias '{name}' has an empty expansion"
                )));
            }
        }
        if let Some(git) = &self.git
            && git.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "git tool name is empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_from_file_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            ".gust.yaml",
            r#"
aliases:
  st: [status, -sb]
disabled:
  - push
git: git
"#,
        );
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.aliases["st"], ["status", "-sb"]);
        assert_eq!(config.disabled, ["push"]);
        assert_eq!(config.git.as_deref(), Some("git"));
    }

    #[test]
    fn test_from_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            ".gust.json",
            r#"{"aliases": {"co": ["checkout"]}}"#,
        );
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.aliases["co"], ["checkout"]);
        assert!(config.disabled.is_empty());
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), ".gust.yaml", "aliases: [not, a, map]");
        let result = Config::from_file(&path);
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn test_empty_alias_expansion_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), ".gust.yaml", "aliases:\n  st: []\n");
        let result = Config::from_file(&path);
        match result {
            Err(ConfigError::Validation(msg)) => assert!(msg.contains("st")),
            other => panic!("Expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), ".gust.yaml", "{}");
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        let found = Config::find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(".gust.yaml"));
    }

    #[test]
    fn test_find_config_none_without_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::find_config(dir.path()).is_none());
    }

    #[test]
    fn test_load_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let result = Config::load(Some(&missing));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }
}
