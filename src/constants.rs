//! Application constants for the corrosion rawdata loader
//!
//! This module contains the column names, header markers, time units and
//! data model identifiers used throughout the loader.

// =============================================================================
// Spreadsheet Columns
// =============================================================================

/// Column holding the sample name on the first row of each sample block
pub const SAMPLE_COLUMN: &str = "Sample";

/// Column holding the composite run identifier
pub const RUN_ID_COLUMN: &str = "RunID";

/// Per-run corrosion fit columns
pub const ECORR_COLUMN: &str = "Ecorr";
pub const ICORR_COLUMN: &str = "icorr";
pub const BETA_A_COLUMN: &str = "Beta_a";
pub const BETA_C_COLUMN: &str = "Beta_c";
pub const FIT_ERROR_COLUMN: &str = "fit_error";

/// RunID value of the synthetic summary row that closes a sample block
pub const BLOCK_END_SENTINEL: &str = "AVG";

/// Header prefix of impedance columns (e.g. `imp24h`)
pub const IMPEDANCE_PREFIX: &str = "imp";

/// Marker prepended to an impedance label to name its log-impedance column (e.g. `limp24h`)
pub const LOG_IMPEDANCE_MARKER: &str = "l";

/// Header prefix of LPR columns (e.g. `LPR30min`)
pub const LPR_PREFIX: &str = "LPR";

/// Label prefix for instances added to a collection (`sample0`, `sample1`, ...)
pub const COLLECTION_LABEL_PREFIX: &str = "sample";

/// Header used for the laboratory sheet when its own header rows are skipped
pub const DEFAULT_HEADER: &[&str] = &[
    "Sample",
    "RunID",
    "limp24h",
    "imp24h",
    "limp2h",
    "imp2h",
    "Ecorr",
    "icorr",
    "Beta_a",
    "Beta_c",
    "fit_error",
    "LPR30min",
    "LPR1h",
    "LPR2h",
    "LPR3h",
    "LPR6h",
    "LPR12h",
    "LPR18h",
    "LPR24h",
];

/// Title rows above the first data row in the laboratory sheet export
pub const DEFAULT_SKIP_ROWS: usize = 2;

/// Cell texts treated as empty (pandas writes missing cells as `nan`)
pub const EMPTY_CELL_MARKERS: &[&str] = &["nan", "NaN", "NAN"];

// =============================================================================
// Time Units
// =============================================================================

/// Seconds per time unit
pub mod time_units {
    pub const SECOND: f64 = 1.0;
    pub const MINUTE: f64 = 60.0;
    pub const HOUR: f64 = 3600.0;
    pub const DAY: f64 = 86_400.0;

    /// 30-day month
    pub const MONTH: f64 = 2_592_000.0;

    /// 365.25-day year
    pub const YEAR: f64 = 31_557_600.0;
}

// =============================================================================
// Data Model
// =============================================================================

/// URI of the sample data model
pub const SAMPLE_SCHEMA_URI: &str = "http://vipcoat.eu/meta/0.1/sample";

/// Metadata schema the sample data model is an instance of
pub const ENTITY_SCHEMA_META: &str = "http://onto-ns.com/meta/0.3/EntitySchema";

/// Dimension names of the sample data model
pub mod dimensions {
    pub const NRUNS: &str = "nruns";
    pub const NIMP: &str = "nimp";
    pub const NLPR: &str = "nlpr";
}

/// Property names of the sample data model
pub mod properties {
    pub const SAMPLE: &str = "Sample";
    pub const RUN_ID: &str = "RunID";
    pub const DATE: &str = "date";
    pub const COMPOSITION: &str = "composition";
    pub const SUBSTRATE: &str = "substrate";
    pub const IMPEDANCE_TIME: &str = "impedance_time";
    pub const LOG_IMPEDANCE: &str = "log_impedance";
    pub const IMPEDANCE: &str = "impedance";
    pub const ECORR: &str = "Ecorr";
    pub const ICORR: &str = "icorr";
    pub const BETA_A: &str = "Beta_a";
    pub const BETA_C: &str = "Beta_c";
    pub const FIT_ERROR: &str = "fit_error";
    pub const LPR_TIME: &str = "LPR_time";
    pub const LPR: &str = "LPR";
}

/// Check whether a cell text counts as an empty cell
pub fn is_empty_cell_text(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || EMPTY_CELL_MARKERS.contains(&trimmed)
}

/// Name of the log-impedance column paired with an impedance column
pub fn log_impedance_column(marker: &str, impedance_label: &str) -> String {
    format!("{}{}", marker, impedance_label)
}

/// Collection label for the sample at `index`
pub fn collection_label(prefix: &str, index: usize) -> String {
    format!("{}{}", prefix, index)
}
