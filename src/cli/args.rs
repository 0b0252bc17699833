//! Command-line argument definitions for the corrosion rawdata loader
//!
//! This module defines the CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the corrosion rawdata loader
///
/// Loads CSV exports of laboratory corrosion sheets (impedance, LPR and
/// Tafel fit results) into typed sample records of the sample data model.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "corrosion-rawdata",
    version,
    about = "Load laboratory corrosion spreadsheets into typed sample records",
    long_about = "Reads CSV exports of laboratory corrosion sheets, groups the rows of each \
                  sample into a block, decodes run identifiers and time-encoded column headers, \
                  and assembles impedance and LPR readings into time-major tables bound to the \
                  sample data model."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load one or more sheets and report the assembled samples
    Load(LoadArgs),
    /// Print the sample data model schema as JSON
    Schema(SchemaArgs),
}

/// Arguments for the load command
#[derive(Debug, Clone, Parser)]
pub struct LoadArgs {
    /// CSV files, or directories searched recursively for `*.csv`
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    ///
    /// JSON file with `assembler`, `source` and `label_prefix` sections.
    /// Fields that are left out keep their defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// CSV rows dropped from the top of each file before the header
    #[arg(long = "skip-rows", value_name = "N")]
    pub skip_rows: Option<usize>,

    /// Column names replacing each file's header (comma-separated)
    ///
    /// When given, every line after the skipped rows is data.
    #[arg(long = "header", value_name = "LIST")]
    pub header: Option<ColumnList>,

    /// Read the standard laboratory sheet export
    ///
    /// Skips the two title rows and applies the standard 19-column header.
    #[arg(
        long = "lab-sheet",
        conflicts_with_all = ["skip_rows", "header"],
        help = "Skip the two title rows and apply the standard header"
    )]
    pub lab_sheet: bool,

    /// Label prefix for samples in each collection
    #[arg(long = "label-prefix", value_name = "PREFIX")]
    pub label_prefix: Option<String>,

    /// Write the loaded collections as JSON, keyed by input file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Stop at the first file that fails to load
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors and the final report
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Format of the load report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the load report"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the schema command
#[derive(Debug, Clone, Parser)]
pub struct SchemaArgs {
    /// Write the schema to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_file: Option<PathBuf>,
}

/// Output format options for the load report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Wrapper for parsing comma-separated column names
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnList {
    pub columns: Vec<String>,
}

impl FromStr for ColumnList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let columns: Vec<String> = s.split(',').map(|s| s.trim().to_string()).collect();

        if columns.iter().all(|c| c.is_empty()) {
            return Err(Error::configuration("Column list cannot be empty"));
        }
        if let Some(position) = columns.iter().position(|c| c.is_empty()) {
            return Err(Error::configuration(format!(
                "Column list has an empty name at position {}",
                position
            )));
        }

        Ok(ColumnList { columns })
    }
}

impl LoadArgs {
    /// Validate the load command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        for path in &self.paths {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Input path does not exist: {}",
                    path.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(prefix) = &self.label_prefix {
            if prefix.trim().is_empty() {
                return Err(Error::configuration("Label prefix cannot be empty"));
            }
        }

        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Get the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl Default for LoadArgs {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            config_file: None,
            skip_rows: None,
            header: None,
            lab_sheet: false,
            label_prefix: None,
            output_file: None,
            fail_fast: false,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}
