//! Configuration management and validation.
//!
//! Provides configuration structures for the sheet layout the record
//! assembler expects, the CSV source options, and collection labelling.
//! Configuration is layered: defaults, then an optional JSON file, then
//! command-line overrides.

use crate::constants;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Column names and header markers of the laboratory sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Column holding the sample name (non-empty on the first row of a block)
    pub sample_column: String,

    /// Column holding the composite run identifier
    pub run_id_column: String,

    /// RunID value closing each sample block
    pub end_sentinel: String,

    /// Header prefix of impedance columns
    pub impedance_prefix: String,

    /// Marker prepended to an impedance label to name its log-impedance column
    pub log_impedance_marker: String,

    /// Header prefix of LPR columns
    pub lpr_prefix: String,

    pub ecorr_column: String,
    pub icorr_column: String,
    pub beta_a_column: String,
    pub beta_c_column: String,
    pub fit_error_column: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            sample_column: constants::SAMPLE_COLUMN.to_string(),
            run_id_column: constants::RUN_ID_COLUMN.to_string(),
            end_sentinel: constants::BLOCK_END_SENTINEL.to_string(),
            impedance_prefix: constants::IMPEDANCE_PREFIX.to_string(),
            log_impedance_marker: constants::LOG_IMPEDANCE_MARKER.to_string(),
            lpr_prefix: constants::LPR_PREFIX.to_string(),
            ecorr_column: constants::ECORR_COLUMN.to_string(),
            icorr_column: constants::ICORR_COLUMN.to_string(),
            beta_a_column: constants::BETA_A_COLUMN.to_string(),
            beta_c_column: constants::BETA_C_COLUMN.to_string(),
            fit_error_column: constants::FIT_ERROR_COLUMN.to_string(),
        }
    }
}

impl AssemblerConfig {
    /// Use a different block end sentinel
    pub fn with_end_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.end_sentinel = sentinel.into();
        self
    }

    /// Use different impedance / LPR header prefixes
    pub fn with_prefixes(mut self, impedance: impl Into<String>, lpr: impl Into<String>) -> Self {
        self.impedance_prefix = impedance.into();
        self.lpr_prefix = lpr.into();
        self
    }

    /// Validate that names are set and prefixes cannot be confused with each other
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("sample_column", &self.sample_column),
            ("run_id_column", &self.run_id_column),
            ("end_sentinel", &self.end_sentinel),
            ("impedance_prefix", &self.impedance_prefix),
            ("log_impedance_marker", &self.log_impedance_marker),
            ("lpr_prefix", &self.lpr_prefix),
            ("ecorr_column", &self.ecorr_column),
            ("icorr_column", &self.icorr_column),
            ("beta_a_column", &self.beta_a_column),
            ("beta_c_column", &self.beta_c_column),
            ("fit_error_column", &self.fit_error_column),
        ];
        for (field, value) in named {
            if value.trim().is_empty() {
                return Err(Error::configuration(format!("{} cannot be empty", field)));
            }
        }

        if self.impedance_prefix.starts_with(&self.lpr_prefix)
            || self.lpr_prefix.starts_with(&self.impedance_prefix)
        {
            return Err(Error::configuration(format!(
                "Impedance prefix '{}' and LPR prefix '{}' overlap",
                self.impedance_prefix, self.lpr_prefix
            )));
        }

        Ok(())
    }
}

/// How a CSV export of the sheet is read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// CSV rows dropped from the top of the file before the header (or data, with `header`)
    pub skip_rows: usize,

    /// Column names replacing the file's header; when set, every remaining line is data
    pub header: Option<Vec<String>>,

    /// Field delimiter
    pub delimiter: char,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            header: None,
            delimiter: ',',
        }
    }
}

impl SourceConfig {
    /// Preset for the laboratory sheet export: two header lines replaced by the standard header
    pub fn lab_sheet() -> Self {
        Self {
            skip_rows: constants::DEFAULT_SKIP_ROWS,
            header: Some(
                constants::DEFAULT_HEADER
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
            ),
            delimiter: ',',
        }
    }

    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.header = Some(header);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }

        if let Some(header) = &self.header {
            if header.is_empty() {
                return Err(Error::configuration("Header override cannot be empty"));
            }
            if let Some(blank) = header.iter().position(|name| name.trim().is_empty()) {
                return Err(Error::configuration(format!(
                    "Header override has an empty column name at position {}",
                    blank
                )));
            }
        }

        Ok(())
    }
}

/// Global configuration for loading laboratory sheets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sheet layout expected by the record assembler
    pub assembler: AssemblerConfig,

    /// CSV source options
    pub source: SourceConfig,

    /// Label prefix for instances added to a collection
    pub label_prefix: LabelPrefix,
}

/// Collection label prefix, `sample` by default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelPrefix(pub String);

impl Default for LabelPrefix {
    fn default() -> Self {
        Self(constants::COLLECTION_LABEL_PREFIX.to_string())
    }
}

impl LabelPrefix {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Config {
    /// Load configuration from a JSON file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::json(format!("Invalid config file {}", path.display()), e)
        })?;

        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Replace the CSV source options
    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.source = source;
        self
    }

    /// Replace the sheet layout
    pub fn with_assembler(mut self, assembler: AssemblerConfig) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.assembler.validate()?;
        self.source.validate()?;

        if self.label_prefix.as_str().trim().is_empty() {
            return Err(Error::configuration("Label prefix cannot be empty"));
        }

        Ok(())
    }
}
