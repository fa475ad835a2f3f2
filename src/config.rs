use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TreemapError, TreemapResult};
use crate::highlight::HighlightConfig;
use crate::layout::LayoutConfig;

/// Session settings. Every field is optional in the JSON form:
///
/// ```json
/// { "layout": { "min_area": 4.0 }, "highlight": { "mode": "raw", "hue": 210 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub highlight: HighlightConfig,
}

impl Config {
    pub fn from_json_str(text: &str) -> TreemapResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> TreemapResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TreemapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| TreemapError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
