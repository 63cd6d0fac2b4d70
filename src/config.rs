use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::registry::DataFormat;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "bikeshare.json";

/// Runtime settings.  Every field is optional in the JSON file.
///
/// ```json
/// { "data_dir": "./data", "format": "parquet", "max_attempts": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `chicago.csv`, `new_york_city.csv` and `washington.csv`.
    pub data_dir: PathBuf,
    /// Extension of the city files in `data_dir` (`"csv"` or `"parquet"`).
    pub format: DataFormat,
    /// Answers accepted per filter question before giving up.
    pub max_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            format: DataFormat::Csv,
            max_attempts: 10,
        }
    }
}

impl Config {
    /// Read `path` if it exists, otherwise fall back to defaults.
    /// A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        log::debug!("Loaded {config:?} from {}", path.display());
        Ok(config)
    }
}
