use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalogue::CatalogueItem;

/// Loan length used when none is configured
pub const DEFAULT_LOAN_LENGTH_DAYS: u32 = 10;

/// Catalogue capacity used when none is configured
pub const DEFAULT_CATALOGUE_CAPACITY: usize = 100;

/// Whether lending checks the remaining copy count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityPolicy {
    /// Lend whatever the copy count says
    #[default]
    Unchecked,
    /// Refuse to lend an item with no copies left
    RequireCopy,
}

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },
    /// The contents were not a valid configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings a library is built from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Library name shown in the catalogue banner
    pub name: String,
    /// Days between loan and due date
    pub loan_length_days: u32,
    /// Maximum number of catalogue entries; `None` means unbounded
    pub catalogue_capacity: Option<usize>,
    /// Copy availability check applied when lending
    pub availability: AvailabilityPolicy,
    /// Items added to the catalogue when the library is built
    pub catalogue: Vec<CatalogueItem>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: "Library".to_string(),
            loan_length_days: DEFAULT_LOAN_LENGTH_DAYS,
            catalogue_capacity: Some(DEFAULT_CATALOGUE_CAPACITY),
            availability: AvailabilityPolicy::default(),
            catalogue: Vec::new(),
        }
    }
}

impl LibraryConfig {
    /// Default settings under a different name
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    /// Parse a JSON configuration; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the JSON is malformed or mistyped
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are invalid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_json_str(&contents)
    }
}
