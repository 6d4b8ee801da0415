//! Configuration types for the document store.
//!
//! Follows a builder pattern for complex configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Configuration for a document store rooted at one documentation tree.
///
/// The root's first-level subdirectories are the version namespaces.
/// A root that does not exist yet is valid configuration: reads index as
/// empty and the first write creates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the documentation root directory
    pub root: PathBuf,
    /// File extensions the indexer recognizes (with leading dot)
    pub allowed_extensions: HashSet<String>,
    /// Extension appended to logical paths that carry none
    pub default_extension: String,
    /// Directory names skipped during scans
    pub excluded_paths: HashSet<String>,
    /// Files larger than this are skipped by the indexer
    pub max_file_size: u64,
    /// Log level hint for the hosting binary
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            allowed_extensions: [".mdx", ".md"].iter().map(|s| s.to_string()).collect(),
            default_extension: ".mdx".to_string(),
            excluded_paths: [".git", ".DS_Store", "node_modules"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_size: 10 * 1024 * 1024, // 10MB
            log_level: "INFO".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create a new config with builder
    pub fn builder(root: impl Into<PathBuf>) -> StoreConfigBuilder {
        StoreConfigBuilder::new(root)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::config_error("Documentation root cannot be empty"));
        }

        if self.root.exists() && !self.root.is_dir() {
            return Err(Error::config_error(format!(
                "Documentation root is not a directory: {}",
                self.root.display()
            )));
        }

        if self.allowed_extensions.is_empty() {
            return Err(Error::config_error(
                "At least one allowed extension is required",
            ));
        }

        if !self.allowed_extensions.contains(&self.default_extension) {
            return Err(Error::config_error(format!(
                "Default extension '{}' is not in the allowed set",
                self.default_extension
            )));
        }

        Ok(())
    }

    /// Whether a file name carries one of the recognized extensions.
    pub fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.allowed_extensions.contains(&format!(".{}", ext)))
            .unwrap_or(false)
    }

    /// Save configuration to a YAML file (for persistence)
    pub async fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        tokio::fs::write(path, yaml).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to save config to {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing file yields the default configuration rather than an error,
    /// mirroring the store's lenient-read policy.
    pub async fn load(path: &Path) -> Result<StoreConfig> {
        if !path.exists() {
            return Ok(StoreConfig::default());
        }

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to load config from {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))
    }
}

/// Builder for StoreConfig
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Create a new builder
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            config: StoreConfig {
                root: root.into(),
                ..StoreConfig::default()
            },
        }
    }

    /// Replace the allowed extension set
    pub fn allowed_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.allowed_extensions = exts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default extension
    pub fn default_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.default_extension = ext.into();
        self
    }

    /// Add a directory name to skip during scans
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_paths.insert(name.into());
        self
    }

    /// Set the maximum indexable file size
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<StoreConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
