//! Optional `bdsa.toml` configuration file.
//!
//! Every key has a default; command-line flags override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use bdsa_ingest::CsvOptions;
use bdsa_model::HistogramMode;
use bdsa_validate::ValidationOptions;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "bdsa.toml";

pub const DEFAULT_EXPORT_FILE: &str = "metadata_export.csv";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inputs: InputsConfig,
    pub ingest: IngestConfig,
    pub validation: ValidationConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    pub schema: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
    pub mapping: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub normalize_headers: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub stain_histogram: HistogramMode,
    pub region_histogram: HistogramMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE.to_string(),
        }
    }
}

impl Config {
    /// Load `explicit` (which must exist), else `bdsa.toml` in the working
    /// directory if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::load_from(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            normalize_headers: self.ingest.normalize_headers,
        }
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions::new()
            .with_stain_histogram(self.validation.stain_histogram)
            .with_region_histogram(self.validation.region_histogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.export.file_name, DEFAULT_EXPORT_FILE);
        assert_eq!(config.validation.stain_histogram, HistogramMode::Invalid);
    }

    #[test]
    fn parses_all_sections() {
        let config: Config = toml::from_str(
            r#"
            [inputs]
            schema = "schemaFiles/adrcNpSchema.json"
            dictionary = "shim-dictionary.json"

            [ingest]
            normalize_headers = true

            [validation]
            region_histogram = "valid"

            [export]
            file_name = "out.csv"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.inputs.schema.as_deref(),
            Some(Path::new("schemaFiles/adrcNpSchema.json"))
        );
        assert!(config.inputs.mapping.is_none());
        assert!(config.csv_options().normalize_headers);
        let options = config.validation_options();
        assert_eq!(options.region_histogram, HistogramMode::Valid);
        assert_eq!(options.stain_histogram, HistogramMode::Invalid);
        assert_eq!(config.export.file_name, "out.csv");
    }

    #[test]
    fn unknown_histogram_mode_is_rejected() {
        assert!(toml::from_str::<Config>("[validation]\nstain_histogram = \"all\"").is_err());
    }
}
