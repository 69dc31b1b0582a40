//! Configuration file support.
//!
//! Settings are read from a `.phpantom-solver.toml` file.  Every key is
//! optional; a missing file means "all defaults", which reproduce the
//! analyzer's standard behavior.
//!
//! ```toml
//! [resolver]
//! root_namespace_fallback = true
//! magic_getter = "__get"
//!
//! [classifier]
//! require_complete_index = true
//!
//! [log]
//! filter = "warn"
//! ```
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".phpantom-solver.toml";

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub classifier: ClassifierConfig,
    pub log: LogConfig,
}

/// Knobs of the type resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Retry an unknown namespaced function in the root namespace, the way
    /// PHP resolves unqualified function calls at runtime.
    pub root_namespace_fallback: bool,
    /// Magic method whose return type describes undeclared properties.
    /// An empty name disables the fallback.
    pub magic_getter: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            root_namespace_fallback: true,
            magic_getter: "__get".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Classify nothing until the index reports that indexing finished.
    pub require_complete_index: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            require_complete_index: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` filter directive used when `PHPANTOM_LOG` is not set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load the configuration from `path`.  A missing file yields the
    /// defaults; an unreadable or invalid one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load [`CONFIG_FILE_NAME`] from a project root.
    pub fn load_from_root(root: &Path) -> Result<Self, ConfigError> {
        Self::load(&root.join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.resolver.root_namespace_fallback);
        assert_eq!(config.resolver.magic_getter, "__get");
        assert!(config.classifier.require_complete_index);
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [resolver]
            root_namespace_fallback = false

            [log]
            filter = "phpantom_solver=trace"
            "#,
        )
        .unwrap();

        assert!(!config.resolver.root_namespace_fallback);
        assert_eq!(config.resolver.magic_getter, "__get");
        assert_eq!(config.log.filter, "phpantom_solver=trace");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Config::from_toml_str(
            r#"
            [resolver]
            magic_getters = "__get"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let config = Config::load_from_root(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_root() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[classifier]\nrequire_complete_index = false\n",
        )
        .expect("failed to write config");

        let config = Config::load_from_root(dir.path()).unwrap();
        assert!(!config.classifier.require_complete_index);
    }
}
