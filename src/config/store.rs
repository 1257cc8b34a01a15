use crate::config::profile::FilterProfile;
use crate::domain::model::Quote;
use crate::domain::ports::{ProfileStore, QuoteSource};
use crate::utils::error::{FilterError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Profile persistence over a single TOML or JSON file.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Result<FilterProfile> {
        FilterProfile::from_file(&self.path)
    }

    fn save(&self, profile: &FilterProfile) -> Result<()> {
        profile.to_file(&self.path)
    }
}

/// Quote source backed by a JSON array file, the shape the discovery
/// endpoint returns.
#[derive(Debug, Clone)]
pub struct JsonQuoteFile {
    path: PathBuf,
}

impl JsonQuoteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuoteSource for JsonQuoteFile {
    fn quotes(&self) -> Result<Vec<Quote>> {
        let content = fs::read_to_string(&self.path).map_err(|e| FilterError::ConfigError {
            message: format!("Cannot read quotes file {}: {}", self.path.display(), e),
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
