//! Client configuration
//!
//! ```yaml
//! insert_chunk_size: 1000
//! dump_page_size: 5000
//! upload_chunk_lines: 10000
//! prefixes:
//!   - short: ex
//!     long: http://example.org/
//! ```

use crate::rdf::{Prefix, PrefixError, PrefixRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid prefix in config: {0}")]
    Prefix(#[from] PrefixError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings shared by every backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphlyConfig {
    /// Maximum number of triples per `INSERT DATA` request
    pub insert_chunk_size: usize,
    /// Rows fetched per page when dumping a graph
    pub dump_page_size: usize,
    /// Statements per chunk when splitting a document for upload
    pub upload_chunk_lines: usize,
    /// Bindings seeding [`GraphlyConfig::registry`]
    pub prefixes: Vec<Prefix>,
}

impl Default for GraphlyConfig {
    fn default() -> Self {
        Self {
            insert_chunk_size: 5000,
            dump_page_size: 5000,
            upload_chunk_lines: 10_000,
            prefixes: Vec::new(),
        }
    }
}

impl GraphlyConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// A fresh registry holding the configured bindings, in order.
    ///
    /// The same short bound twice to different namespaces is a [`ConfigError::Prefix`].
    pub fn registry(&self) -> ConfigResult<PrefixRegistry> {
        Ok(PrefixRegistry::from_prefixes(self.prefixes.iter().cloned())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GraphlyConfig::default();
        assert_eq!(config.insert_chunk_size, 5000);
        assert_eq!(config.dump_page_size, 5000);
        assert_eq!(config.upload_chunk_lines, 10_000);
        assert!(config.registry().unwrap().is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GraphlyConfig::from_yaml_str(
            "insert_chunk_size: 10\nprefixes:\n  - short: ex\n    long: http://example.org/\n",
        )
        .unwrap();

        assert_eq!(config.insert_chunk_size, 10);
        assert_eq!(config.dump_page_size, 5000);
        let registry = config.registry().unwrap();
        assert_eq!(registry.namespace("ex"), Some("http://example.org/"));
    }

    #[test]
    fn test_conflicting_prefixes() {
        let config = GraphlyConfig::from_yaml_str(
            "prefixes:\n  - {short: ex, long: 'http://a.org/'}\n  - {short: ex, long: 'http://b.org/'}\n",
        )
        .unwrap();
        assert!(matches!(config.registry(), Err(ConfigError::Prefix(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            GraphlyConfig::from_yaml_str("insert_chunk_size: [oops"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
