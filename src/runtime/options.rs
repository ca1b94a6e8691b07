//! Builder configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Options for one builder instance. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Show only the blocks of this builder's modules in the block picker,
    /// hiding the host defaults (text, image, ...)
    pub restrict_block_categories: bool,
    /// Base URL editor asset paths are resolved against
    pub asset_base_url: String,
    /// Version string attached to editor assets
    pub asset_version: String,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            restrict_block_categories: true,
            asset_base_url: String::new(),
            asset_version: "1.0.0".to_string(),
        }
    }
}

impl BuilderOptions {
    /// Parse options from a JSON document
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(json).map_err(OptionsError::Parse)
    }

    /// Load options from a `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            return Err(OptionsError::UnsupportedFormat(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let options = Self::from_json(&content)?;
        log::info!("Loaded builder options from {}", path.display());
        Ok(options)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid options: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Options file must be .json: {0}")]
    UnsupportedFormat(String),
}
