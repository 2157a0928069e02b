//! TOML configuration for physiqued
//!
//! Every key is optional. Values resolve as: command-line flag or environment
//! variable, then config file, then the built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use physique_api::UploadLimits;
use serde::Deserialize;

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;
/// Default scratch directory
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-request timeout in seconds (unset = none)
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout_secs: None,
        }
    }
}

/// `[uploads]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Scratch directory for in-flight uploads
    pub dir: PathBuf,
    /// Maximum request body size (unset = unlimited)
    pub max_bytes: Option<usize>,
    /// Remove staged files left by a previous run at startup
    pub purge_on_start: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_bytes: None,
            purge_on_start: true,
        }
    }
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub server: ServerConfig,
    pub uploads: UploadConfig,
}

/// Values given on the command line (or via environment)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub upload_dir: Option<PathBuf>,
    pub max_upload_bytes: Option<usize>,
}

impl DaemonConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command-line values over file values
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(dir) = overrides.upload_dir {
            self.uploads.dir = dir;
        }
        if let Some(max) = overrides.max_upload_bytes {
            self.uploads.max_bytes = Some(max);
        }
    }

    /// Upload limits for the API layer
    pub fn limits(&self) -> UploadLimits {
        UploadLimits {
            max_bytes: self.uploads.max_bytes,
            request_timeout: self.server.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = DaemonConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.uploads.dir, PathBuf::from("uploads"));
        assert_eq!(config.uploads.max_bytes, None);
        assert!(config.uploads.purge_on_start);
        assert_eq!(config.limits(), UploadLimits::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = DaemonConfig::from_toml_str("").unwrap();
        assert_eq!(config, DaemonConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = DaemonConfig::from_toml_str(
            r#"
[server]
port = 9090
request_timeout_secs = 15

[uploads]
max_bytes = 1048576
"#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.uploads.dir, PathBuf::from("uploads"));
        assert_eq!(
            config.limits(),
            UploadLimits {
                max_bytes: Some(1_048_576),
                request_timeout: Some(Duration::from_secs(15)),
            }
        );
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let err = DaemonConfig::from_toml_str("[server]\nport = \"eighty\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = DaemonConfig::from_toml_str(
            r#"
[server]
host = "127.0.0.1"
port = 9090

[uploads]
dir = "/var/lib/physique"
"#,
        )
        .unwrap();

        config.apply(Overrides {
            host: None,
            port: Some(8123),
            upload_dir: Some(PathBuf::from("scratch")),
            max_upload_bytes: Some(4096),
        });

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.uploads.dir, PathBuf::from("scratch"));
        assert_eq!(config.uploads.max_bytes, Some(4096));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("physiqued.toml");
        std::fs::write(&path, "[uploads]\npurge_on_start = false\n").unwrap();

        let config = DaemonConfig::load(&path).unwrap();
        assert!(!config.uploads.purge_on_start);

        let missing = DaemonConfig::load(&dir.path().join("missing.toml"));
        assert!(missing.is_err());
    }
}
