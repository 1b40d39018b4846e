use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for locating and editing the hosts file.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```json
/// { "hosts_path": "/etc/hosts", "editor": "nano" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostsConfig {
    #[serde(default = "default_hosts_path")]
    pub hosts_path: PathBuf,

    #[serde(default = "default_editor")]
    pub editor: String,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            hosts_path: default_hosts_path(),
            editor: default_editor(),
        }
    }
}

impl HostsConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Loads the config at `path`, falling back to defaults when no path is
    /// given or the file does not exist.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}

pub fn default_hosts_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

fn default_editor() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .ok()
        .filter(|editor| !editor.trim().is_empty())
        .unwrap_or_else(|| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config: HostsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.hosts_path, default_hosts_path());
        assert!(!config.editor.is_empty());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"hosts_path": "/tmp/hosts", "editor": "nano"}}"#).unwrap();

        let config = HostsConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.hosts_path, PathBuf::from("/tmp/hosts"));
        assert_eq!(config.editor, "nano");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HostsConfig::load(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config.hosts_path, default_hosts_path());

        assert_eq!(HostsConfig::load(None).unwrap().hosts_path, default_hosts_path());
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "hosts_path = 1").unwrap();

        let err = HostsConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
