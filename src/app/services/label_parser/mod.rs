//! Label parser for laboratory spreadsheet headers and identifiers
//!
//! Pure functions that decode the textual parts of the sheet into typed values:
//! - [`run_id`] - composite run identifiers (`date_composition[_substrate]_suffix`)
//! - [`time_label`] - time units and time-encoded column headers (`imp24h`, `LPR30min`)
//!
//! Every failure is reported as [`crate::Error::Format`] carrying the offending text.

pub mod run_id;
pub mod time_label;

#[cfg(test)]
mod tests;

pub use run_id::parse_run_identifier;
pub use time_label::{TimeUnit, parse_time_label, time_unit_to_seconds};
