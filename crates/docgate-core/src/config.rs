//! Viewer configuration
//!
//! Every field has a default matching the stock site layout, so an empty
//! TOML file (or no file at all) is a valid configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Resource locations and display timings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Allow-list resource path, relative to the site
    pub allow_list_path: String,
    /// Document catalog resource path, relative to the site
    pub catalog_path: String,
    /// Directory documents are fetched from, relative to the site
    pub docs_root: String,
    /// How long a gate notice stays visible, in milliseconds
    pub notice_ttl_ms: u64,
    /// Text placed before the session tag in the watermark
    pub watermark_prefix: String,
}

impl ViewerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// With document root
    #[inline]
    #[must_use]
    pub fn with_docs_root(mut self, docs_root: impl Into<String>) -> Self {
        self.docs_root = docs_root.into();
        self
    }

    /// With allow-list path
    #[inline]
    #[must_use]
    pub fn with_allow_list_path(mut self, path: impl Into<String>) -> Self {
        self.allow_list_path = path.into();
        self
    }

    /// With catalog path
    #[inline]
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<String>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// With notice lifetime
    #[inline]
    #[must_use]
    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Notice lifetime
    #[inline]
    #[must_use]
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    /// Path of a document below the document root
    #[must_use]
    pub fn document_path(&self, filename: &str) -> String {
        let root = self.docs_root.trim_end_matches('/');
        if root.is_empty() {
            filename.to_string()
        } else {
            format!("{root}/{filename}")
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allow_list_path.trim().is_empty() {
            return Err(ConfigError::Invalid("allow_list_path is empty".to_string()));
        }
        if self.catalog_path.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog_path is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            allow_list_path: "allowed.json".to_string(),
            catalog_path: "documents.json".to_string(),
            docs_root: "docs".to_string(),
            notice_ttl_ms: 3_500,
            watermark_prefix: "Service#: ".to_string(),
        }
    }
}
