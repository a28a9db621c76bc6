//! Catalog configuration file (JSON)

use crate::error::{Error, Result};
use crate::export::DEFAULT_SHEET_NAME;
use crate::query::ViewState;
use crate::source::TextSource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for loading, viewing and exporting a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Text sources, tried in order
    pub sources: Vec<TextSource>,
    /// Initial filter and sort
    pub view: ViewState,
    /// Default export file
    pub export_path: PathBuf,
    /// Sheet name written into exports
    pub sheet_name: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            view: ViewState::default(),
            export_path: PathBuf::from("characters.csv"),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Load a config file, or the defaults if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the config to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
