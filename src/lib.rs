//! Corrosion Rawdata Library
//!
//! A Rust library for loading laboratory spreadsheets of electrochemical
//! corrosion measurements into typed, dimensioned sample records.
//!
//! This library provides tools for:
//! - Decoding run identifiers and time-encoded column headers
//! - Grouping spreadsheet rows into per-sample blocks delimited by `AVG` rows
//! - Assembling impedance and LPR readings into time-major numeric tables
//! - Binding assembled records to a declarative data model schema
//! - Loading CSV exports of the laboratory sheet

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod pipeline;
    pub mod services {
        pub mod label_parser;
        pub mod record_assembler;
        pub mod schema_binder;
    }
    pub mod adapters {
        pub mod csv_table;
        pub mod table_provider;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::adapters::csv_table::CsvTableProvider;
pub use app::adapters::table_provider::TableProvider;
pub use app::models::{CellValue, Matrix, RawTable, RunIdentifier, SampleRecord};
pub use app::pipeline::{LoadSummary, SampleLoader, load_samples};
pub use app::services::label_parser::{
    TimeUnit, parse_run_identifier, parse_time_label, time_unit_to_seconds,
};
pub use app::services::record_assembler::{ColumnLayout, RecordAssembler, assemble};
pub use app::services::schema_binder::{
    Collection, CollectionSink, EntityInstance, EntitySchema, Instance, InstanceFactory,
    MemoryFactory, PropertyValue, bind_sample, sample_schema,
};
pub use config::Config;

/// Result type alias for corrosion rawdata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for spreadsheet loading and schema binding
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The spreadsheet does not have the expected layout or cell contents
    #[error("Unexpected spreadsheet format: {message}")]
    Format { message: String },

    /// A format error raised while assembling one sample block.
    ///
    /// `row` is the 0-based index into the table's data rows, counted after
    /// any skipped title rows and the header row. It is not the line number
    /// of the CSV file.
    #[error("Sample block {block} (data row {row}, column '{column}'): {source}")]
    BlockFormat {
        block: usize,
        row: usize,
        column: String,
        #[source]
        source: Box<Error>,
    },

    /// Declarative schema is inconsistent
    #[error("Invalid schema '{uri}': {message}")]
    Schema { uri: String, message: String },

    /// Assignment to a property the schema does not declare
    #[error("Unknown property '{property}' for schema '{uri}'")]
    UnknownProperty { uri: String, property: String },

    /// Assigned value does not match the declared type or shape
    #[error("Shape mismatch for property '{property}': expected {expected}, found {found}")]
    ShapeMismatch {
        property: String,
        expected: String,
        found: String,
    },

    /// A collection already holds an instance under this label
    #[error("Duplicate collection label: {label}")]
    DuplicateLabel { label: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an unexpected-format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Attach sample block context to an error raised while assembling a block
    pub fn in_block(self, block: usize, row: usize, column: impl Into<String>) -> Self {
        Self::BlockFormat {
            block,
            row,
            column: column.into(),
            source: Box::new(self),
        }
    }

    /// Create a schema error
    pub fn schema(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// Create an unknown property error
    pub fn unknown_property(uri: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            uri: uri.into(),
            property: property.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(
        property: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            property: property.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a duplicate label error
    pub fn duplicate_label(label: impl Into<String>) -> Self {
        Self::DuplicateLabel {
            label: label.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for unexpected-format errors, including ones wrapped with block context
    pub fn is_format(&self) -> bool {
        match self {
            Self::Format { .. } => true,
            Self::BlockFormat { source, .. } => source.is_format(),
            _ => false,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
