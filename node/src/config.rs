//! Node configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file
//! (`--config` or `./ssi.toml` when present), then `SSI_`-prefixed
//! environment variables using `__` between nested keys, e.g.
//! `SSI_STORAGE__PATH=/var/lib/ssi` or `SSI_DID__METHODS=key`.

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use ssi_service::{Method, UnsupportedMethod};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "ssi.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sled,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sled,
            path: PathBuf::from("data/ssi.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DidConfig {
    pub methods: Vec<String>,
}

impl Default for DidConfig {
    fn default() -> Self {
        Self {
            methods: vec![Method::Key.as_str().to_string()],
        }
    }
}

impl DidConfig {
    pub fn methods(&self) -> std::result::Result<Vec<Method>, UnsupportedMethod> {
        self.methods.iter().map(|m| m.parse()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_format: LogFormat,
    pub storage: StorageConfig,
    pub did: DidConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Plain,
            storage: StorageConfig::default(),
            did: DidConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(config_path_override: Option<&Path>) -> Result<Self> {
        let resolved_path = match config_path_override {
            Some(path) => {
                if !path.exists() {
                    bail!(
                        "Configuration file {} not found (specified via --config)",
                        path.display()
                    );
                }
                Some(path.to_path_buf())
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                path.exists().then_some(path)
            }
        };

        let mut builder = Config::builder();
        if let Some(path) = &resolved_path {
            builder = builder.add_source(ConfigFile::from(path.as_path()));
        }
        builder = builder.add_source(
            Environment::with_prefix("SSI")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("did.methods")
                .try_parsing(true),
        );

        let config = builder.build().context("failed to read configuration")?;
        config
            .try_deserialize()
            .context("failed to parse configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.storage.backend, StorageBackend::Sled);
        assert_eq!(config.did.methods().unwrap(), vec![Method::Key]);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("ssi.toml");
        fs::write(
            &path,
            r#"
log_level = "debug"
log_format = "pretty"

[storage]
backend = "memory"
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.path, PathBuf::from("data/ssi.db"));
        assert_eq!(config.did.methods, vec!["key".to_string()]);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn unknown_methods_are_reported() {
        let config = DidConfig {
            methods: vec!["key".to_string(), "ion".to_string()],
        };
        assert_eq!(
            config.methods().unwrap_err().to_string(),
            "unsupported DID method: ion"
        );
    }
}
