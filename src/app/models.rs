//! Data models for corrosion spreadsheet loading
//!
//! This module contains the core data structures: the raw rectangular table
//! handed over by a table provider, the decoded run identifier, the dense
//! numeric matrix used for time-major measurement tables, and the assembled
//! per-sample record.

use crate::constants;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Raw Table
// =============================================================================

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Interpret a raw cell text: blanks and `nan` are empty, numeric text becomes a number
    pub fn from_text(text: &str) -> Self {
        if constants::is_empty_cell_text(text) {
            return CellValue::Empty;
        }

        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if !value.is_nan() => CellValue::Number(value),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    /// Check if the cell holds no value
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => constants::is_empty_cell_text(text),
            CellValue::Number(value) => value.is_nan(),
        }
    }

    /// Cell content as text, `None` for empty cells
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }

    /// Cell content as a float; empty cells are NaN, non-numeric text is `None`
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            CellValue::Empty => Some(f64::NAN),
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) if constants::is_empty_cell_text(text) => Some(f64::NAN),
            CellValue::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => write!(f, "{}", text),
            // Spreadsheet readers hand integral labels back as floats ("12.0")
            CellValue::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            CellValue::Number(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Rectangular array of named columns, one row per spreadsheet line
///
/// Column names are unique and keep their sheet order; all columns have the
/// same length.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    names: Vec<String>,
    columns: Vec<Vec<CellValue>>,
    index: HashMap<String, usize>,
    nrows: usize,
}

impl RawTable {
    /// Create a table from named columns, validating names and column lengths
    pub fn new(columns: Vec<(String, Vec<CellValue>)>) -> Result<Self> {
        let nrows = columns.first().map(|(_, cells)| cells.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut cells = Vec::with_capacity(columns.len());
        let mut index = HashMap::with_capacity(columns.len());

        for (name, column) in columns {
            if column.len() != nrows {
                return Err(Error::format(format!(
                    "Column '{}' has {} rows, expected {}",
                    name,
                    column.len(),
                    nrows
                )));
            }
            if index.insert(name.clone(), names.len()).is_some() {
                return Err(Error::format(format!("Duplicate column name '{}'", name)));
            }
            names.push(name);
            cells.push(column);
        }

        Ok(Self {
            names,
            columns: cells,
            index,
            nrows,
        })
    }

    /// Create a table from a header and row-oriented cells
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut columns: Vec<Vec<CellValue>> =
            header.iter().map(|_| Vec::with_capacity(rows.len())).collect();

        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != header.len() {
                return Err(Error::format(format!(
                    "Row {} has {} cells, expected {}",
                    row_index,
                    row.len(),
                    header.len()
                )));
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.push(cell);
            }
        }

        Self::new(header.into_iter().zip(columns).collect())
    }

    /// Column names in sheet order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Cells of a named column
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.column_index(name).map(|index| self.columns[index].as_slice())
    }

    /// Cells of the column at `index`
    pub fn column_at(&self, index: usize) -> &[CellValue] {
        &self.columns[index]
    }

    /// Cell at (`column`, `row`)
    pub fn cell(&self, column: usize, row: usize) -> &CellValue {
        &self.columns[column][row]
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.names.len()
    }
}

// =============================================================================
// Run Identifier
// =============================================================================

/// Decoded `date_composition[_composition2][_substrate]_suffix` run identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunIdentifier {
    pub date: String,
    pub composition: String,
    /// Empty when the identifier carries no substrate token
    pub substrate: String,
}

impl RunIdentifier {
    /// Split into a `(date, composition, substrate)` tuple
    pub fn into_parts(self) -> (String, String, String) {
        (self.date, self.composition, self.substrate)
    }
}

// =============================================================================
// Matrix
// =============================================================================

/// Dense row-major table of floats
///
/// Measurement tables are time-major: rows index the measurement time,
/// columns index the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a zero-filled matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create a matrix from equally long rows; `cols` is used when `rows` is empty
    pub fn from_rows(rows: Vec<Vec<f64>>, cols: usize) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(cols);
        let mut data = Vec::with_capacity(nrows * ncols);

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::format(format!(
                    "Matrix row {} has {} values, expected {}",
                    index,
                    row.len(),
                    ncols
                )));
            }
            data.extend(row);
        }

        Ok(Self {
            rows: nrows,
            cols: ncols,
            data,
        })
    }

    /// `[rows, cols]`
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Values of one row (one measurement time across all runs)
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Mutable values of one row
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Row-major backing storage
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

// =============================================================================
// Sample Record
// =============================================================================

/// Fully parsed measurements for one sample block
///
/// Per-run vectors have length `nruns`; `impedance`, `log_impedance` have
/// shape `[nimp, nruns]` and `lpr` has shape `[nlpr, nruns]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Sample name from the first row of the block
    pub sample: String,

    pub run_ids: Vec<String>,
    pub dates: Vec<String>,
    pub compositions: Vec<String>,
    pub substrates: Vec<String>,

    /// Duration of each impedance measurement in hours
    pub impedance_time: Vec<f64>,
    /// log(Ohm)
    pub log_impedance: Matrix,
    /// Ohm
    pub impedance: Matrix,

    /// Corrosion potential per run (mV)
    pub ecorr: Vec<f64>,
    /// Corrosion current per run (uA)
    pub icorr: Vec<f64>,
    /// Anodic Tafel slope per run (mV)
    pub beta_a: Vec<f64>,
    /// Cathodic Tafel slope per run (mV)
    pub beta_c: Vec<f64>,
    pub fit_error: Vec<f64>,

    /// Time of each LPR measurement in hours
    pub lpr_time: Vec<f64>,
    pub lpr: Matrix,
}

impl SampleRecord {
    pub fn nruns(&self) -> usize {
        self.run_ids.len()
    }

    pub fn nimp(&self) -> usize {
        self.impedance_time.len()
    }

    pub fn nlpr(&self) -> usize {
        self.lpr_time.len()
    }

    /// Check that every vector and table agrees with `nruns`, `nimp` and `nlpr`
    pub fn validate(&self) -> Result<()> {
        let nruns = self.nruns();
        let per_run = [
            ("date", self.dates.len()),
            ("composition", self.compositions.len()),
            ("substrate", self.substrates.len()),
            ("Ecorr", self.ecorr.len()),
            ("icorr", self.icorr.len()),
            ("Beta_a", self.beta_a.len()),
            ("Beta_c", self.beta_c.len()),
            ("fit_error", self.fit_error.len()),
        ];
        for (name, len) in per_run {
            if len != nruns {
                return Err(Error::format(format!(
                    "Sample '{}': {} has {} values for {} runs",
                    self.sample, name, len, nruns
                )));
            }
        }

        let tables = [
            ("impedance", &self.impedance, self.nimp()),
            ("log_impedance", &self.log_impedance, self.nimp()),
            ("LPR", &self.lpr, self.nlpr()),
        ];
        for (name, table, rows) in tables {
            if table.shape() != [rows, nruns] {
                return Err(Error::format(format!(
                    "Sample '{}': {} has shape {:?}, expected [{}, {}]",
                    self.sample,
                    name,
                    table.shape(),
                    rows,
                    nruns
                )));
            }
        }

        Ok(())
    }
}
