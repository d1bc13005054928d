//! Configuration for the proposal reports

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Spreadsheet read when no path is given on the command line or in the config
pub const DEFAULT_DATASET_PATH: &str = "public/proposal_dataset.xlsx";

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "proposals.toml";

/// Main report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Spreadsheet to load
    pub path: PathBuf,
    /// Identifier column used for duplicate detection
    pub id_column: String,
    /// Principal investigator column
    pub pi_column: String,
    pub duplicates: DuplicatesConfig,
    pub search: SearchConfig,
    pub preview: PreviewConfig,
}

impl ReportConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ReportConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, else `proposals.toml` when it exists, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject settings no report could run with
    pub fn validate(&self) -> Result<()> {
        if self.id_column.trim().is_empty() {
            anyhow::bail!("Configuration error: 'id_column' must not be empty");
        }
        if self.pi_column.trim().is_empty() {
            anyhow::bail!("Configuration error: 'pi_column' must not be empty");
        }
        if self.duplicates.sample_size == 0 {
            anyhow::bail!("Configuration error: 'duplicates.sample_size' must be at least 1");
        }
        if self.search.target.is_empty() {
            anyhow::bail!("Configuration error: 'search.target' must not be empty");
        }
        if self.search.title_columns.is_empty() {
            anyhow::bail!("Configuration error: 'search.title_columns' must list at least one column");
        }
        if self.preview.rows == 0 {
            anyhow::bail!("Configuration error: 'preview.rows' must be at least 1");
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET_PATH),
            id_column: "proposal_no".to_string(),
            pi_column: "PI".to_string(),
            duplicates: DuplicatesConfig::default(),
            search: SearchConfig::default(),
            preview: PreviewConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuplicatesConfig {
    /// Maximum number of duplicate rows listed
    pub sample_size: usize,
}

impl Default for DuplicatesConfig {
    fn default() -> Self {
        Self { sample_size: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Case-insensitive pattern tested against every cell
    pub target: String,
    /// Name shown in the report heading
    pub label: String,
    /// Title columns in order of preference
    pub title_columns: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target: "Tommy Dang".to_string(),
            label: "Dr. Tommy Dang".to_string(),
            title_columns: vec!["Project Title".to_string(), "title".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Number of leading rows shown
    pub rows: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { rows: 5 }
    }
}
