use crate::core::export::{ExportEncoding, ExportFormat, ExportOptions};
use crate::core::loader::LoadOptions;
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Column identifiers for the fields the pipeline reasons about. Matched
/// against headers after whitespace normalization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnConfig {
    pub name: String,
    pub category: String,
    pub amc: String,
    pub return_1yr: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            name: "MutualFundName".to_string(),
            category: "category".to_string(),
            amc: "AMC_name".to_string(),
            return_1yr: "return_1yr".to_string(),
        }
    }
}

/// What to do with rows whose 1-year return is missing or not a number.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingReturnPolicy {
    /// Keep the row and rank it below every numeric return.
    #[default]
    SortLast,
    /// Fail the load.
    Reject,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub encoding: ExportEncoding,
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            format: ExportFormat::Csv,
            encoding: ExportEncoding::Utf8,
            directory: ".".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: String,
    pub delimiter: char,
    pub columns: ColumnConfig,
    pub missing_returns: MissingReturnPolicy,
    pub top_n: usize,
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: "mutual_funds_india.csv".to_string(),
            delimiter: ',',
            columns: ColumnConfig::default(),
            missing_returns: MissingReturnPolicy::default(),
            top_n: 10,
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config at `config_path`, or the default config file if it
    /// exists, or built-in defaults otherwise.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_path(path);
        }

        let default_path = Self::default_config_path()?;
        if default_path.exists() {
            Self::load_from_path(&default_path)
        } else {
            debug!("No config at {}, using defaults", default_path.display());
            Ok(Self::default())
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fundex", "fundex")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn load_options(&self) -> Result<LoadOptions> {
        if !self.delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        Ok(LoadOptions {
            delimiter: self.delimiter as u8,
            columns: self.columns.clone(),
            missing_returns: self.missing_returns,
        })
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            format: self.export.format,
            encoding: self.export.encoding,
        }
    }
}
