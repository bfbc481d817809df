//! Configuration loading and management
//!
//! Handles parsing of `.tasks.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::DEFAULT_TASKS_FILE;

/// Name of the per-directory config file
pub const CONFIG_FILE: &str = ".tasks.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the task document
    #[serde(default = "default_file")]
    pub file: PathBuf,

    /// Longest accepted task description, in characters
    #[serde(default = "default_max_description_len")]
    pub max_description_len: usize,

    /// Copy a corrupt task document to `<file>.bak` before starting fresh
    #[serde(default = "default_backup_corrupt")]
    pub backup_corrupt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
            max_description_len: default_max_description_len(),
            backup_corrupt: default_backup_corrupt(),
        }
    }
}

fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_TASKS_FILE)
}

fn default_max_description_len() -> usize {
    200
}

fn default_backup_corrupt() -> bool {
    true
}

impl Config {
    /// Load configuration from a `.tasks.toml` file
    ///
    /// A relative `file` is resolved against the config file's directory.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.validate()?;
        if config.file.is_relative() {
            if let Some(dir) = path.parent() {
                config.file = dir.join(&config.file);
            }
        }
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.file.as_os_str().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "file cannot be empty".to_string(),
            ));
        }
        if self.max_description_len == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "max_description_len must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.file, PathBuf::from("tasks.json"));
        assert_eq!(cfg.max_description_len, 200);
        assert!(cfg.backup_corrupt);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        let content = r#"
file = "data/todo.json"
max_description_len = 80
backup_corrupt = false
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.file, dir.path().join("data/todo.json"));
        assert_eq!(cfg.max_description_len, 80);
        assert!(!cfg.backup_corrupt);
    }

    #[test]
    fn absolute_file_is_kept() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        let target = dir.path().join("elsewhere.json");
        fs::write(&path, format!("file = {:?}", target.display().to_string()))
            .expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.file, target);
    }

    #[test]
    fn zero_max_len_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "max_description_len = 0").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            crate::error::Error::InvalidConfig(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_from_dir_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg.file, PathBuf::from("tasks.json"));
    }

    #[test]
    fn load_from_dir_defaults_when_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "max_description_len = \"lots\"")
            .expect("write config");

        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg.max_description_len, 200);
    }

    #[test]
    fn load_from_dir_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "max_description_len = 10")
            .expect("write config");

        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg.max_description_len, 10);
    }

    #[test]
    fn save_writes_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.toml");
        let cfg = Config::default();
        cfg.save(&path).expect("save config");

        let written = fs::read_to_string(&path).expect("read config");
        assert!(written.contains("file = \"tasks.json\""));
        assert!(written.contains("max_description_len = 200"));
    }
}
