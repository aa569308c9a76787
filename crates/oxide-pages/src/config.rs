//! Page discovery configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where pages live and how their file names map to routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Root directory of the page files.
    pub pages_dir: PathBuf,
    /// Extension of page source files, without the dot.
    pub extension: String,
    /// File stem that maps to its parent directory (`blog/index` -> `/blog`).
    pub index_name: String,
    /// Follow symbolic links while walking the pages directory.
    pub follow_links: bool,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            extension: "rs".to_string(),
            index_name: "index".to_string(),
            follow_links: false,
        }
    }
}

impl PagesConfig {
    /// Creates a configuration for the given pages directory.
    #[must_use]
    pub fn new(pages_dir: impl Into<PathBuf>) -> Self {
        Self {
            pages_dir: pages_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the page file extension.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the index file stem.
    #[must_use]
    pub fn index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    /// Enables or disables following symbolic links.
    #[must_use]
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Config`](crate::RouteError::Config) if the JSON
    /// is invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or a config error if
    /// its contents are invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
