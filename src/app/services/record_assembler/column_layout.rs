//! Column layout analysis for laboratory sheets
//!
//! Validates the table's columns once per table: required columns, the
//! ordered impedance columns with their paired log-impedance columns, and
//! the ordered LPR columns. Time labels are decoded here so per-block
//! assembly never re-derives them.

use crate::app::models::RawTable;
use crate::app::services::label_parser::parse_time_label;
use crate::config::AssemblerConfig;
use crate::constants;
use crate::{Error, Result};

/// A column located by name
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColumn {
    pub name: String,
    pub index: usize,
}

/// A measurement column whose header encodes a duration
#[derive(Debug, Clone, PartialEq)]
pub struct TimeColumn {
    pub name: String,
    pub index: usize,
    /// Decoded duration in hours
    pub hours: f64,
}

/// An impedance column and its paired log-impedance column
#[derive(Debug, Clone, PartialEq)]
pub struct ImpedanceColumn {
    pub impedance: TimeColumn,
    pub log_impedance: NamedColumn,
}

/// Validated description of a sheet's columns
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub sample: NamedColumn,
    pub run_id: NamedColumn,
    pub ecorr: NamedColumn,
    pub icorr: NamedColumn,
    pub beta_a: NamedColumn,
    pub beta_c: NamedColumn,
    pub fit_error: NamedColumn,

    /// Impedance columns in sheet order
    pub impedance: Vec<ImpedanceColumn>,

    /// LPR columns in sheet order
    pub lpr: Vec<TimeColumn>,
}

impl ColumnLayout {
    /// Analyze the table's header against the expected sheet layout
    pub fn from_table(table: &RawTable, config: &AssemblerConfig) -> Result<Self> {
        let require = |name: &str| -> Result<NamedColumn> {
            table
                .column_index(name)
                .map(|index| NamedColumn {
                    name: name.to_string(),
                    index,
                })
                .ok_or_else(|| Error::format(format!("Missing column '{}'", name)))
        };

        let mut impedance = Vec::new();
        let mut lpr = Vec::new();

        for (index, name) in table.column_names().iter().enumerate() {
            if name.starts_with(&config.impedance_prefix) {
                let hours = parse_time_label(name, &config.impedance_prefix)?;
                let log_name = constants::log_impedance_column(&config.log_impedance_marker, name);
                let log_impedance = require(&log_name).map_err(|_| {
                    Error::format(format!(
                        "Impedance column '{}' has no paired log-impedance column '{}'",
                        name, log_name
                    ))
                })?;

                impedance.push(ImpedanceColumn {
                    impedance: TimeColumn {
                        name: name.clone(),
                        index,
                        hours,
                    },
                    log_impedance,
                });
            } else if name.starts_with(&config.lpr_prefix) {
                let hours = parse_time_label(name, &config.lpr_prefix)?;
                lpr.push(TimeColumn {
                    name: name.clone(),
                    index,
                    hours,
                });
            }
        }

        Ok(Self {
            sample: require(&config.sample_column)?,
            run_id: require(&config.run_id_column)?,
            ecorr: require(&config.ecorr_column)?,
            icorr: require(&config.icorr_column)?,
            beta_a: require(&config.beta_a_column)?,
            beta_c: require(&config.beta_c_column)?,
            fit_error: require(&config.fit_error_column)?,
            impedance,
            lpr,
        })
    }

    /// Number of impedance measurements per run
    pub fn nimp(&self) -> usize {
        self.impedance.len()
    }

    /// Number of LPR measurements per run
    pub fn nlpr(&self) -> usize {
        self.lpr.len()
    }

    /// Duration of each impedance measurement in hours
    pub fn impedance_time(&self) -> Vec<f64> {
        self.impedance.iter().map(|column| column.impedance.hours).collect()
    }

    /// Time of each LPR measurement in hours
    pub fn lpr_time(&self) -> Vec<f64> {
        self.lpr.iter().map(|column| column.hours).collect()
    }

    /// Per-run scalar columns: Ecorr, icorr, Beta_a, Beta_c, fit_error
    pub fn scalar_columns(&self) -> [&NamedColumn; 5] {
        [
            &self.ecorr,
            &self.icorr,
            &self.beta_a,
            &self.beta_c,
            &self.fit_error,
        ]
    }
}
