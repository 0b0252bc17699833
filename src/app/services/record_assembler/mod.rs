//! Record assembler for laboratory corrosion sheets
//!
//! Turns a [`RawTable`](crate::app::models::RawTable) into one
//! [`SampleRecord`](crate::app::models::SampleRecord) per sample block.
//!
//! ## Architecture
//!
//! - [`blocks`] - block boundary detection (sample label rows and `AVG` rows)
//! - [`column_layout`] - one-time validation of the table's columns and time labels
//! - [`assembler`] - per-block record assembly into time-major tables
//!
//! ## Sheet structure
//!
//! Runs of one physical sample occupy contiguous rows. The first row of a
//! sample carries its name in the `Sample` column; the sample ends with a
//! synthetic summary row whose `RunID` is `AVG`. Impedance and LPR readings
//! sit in columns whose headers encode the measurement duration
//! (`imp24h`, `limp24h`, `LPR30min`, ...). Every sample block of a table
//! shares the same set of measurement columns.
//!
//! ## Usage
//!
//! ```rust
//! use corrosion_rawdata::app::services::record_assembler::RecordAssembler;
//! use corrosion_rawdata::config::AssemblerConfig;
//! # fn example(table: &corrosion_rawdata::RawTable) -> corrosion_rawdata::Result<()> {
//! let assembler = RecordAssembler::new(AssemblerConfig::default())?;
//! for record in assembler.assemble(table)? {
//!     println!("{}: {} runs", record.sample, record.nruns());
//! }
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod blocks;
pub mod column_layout;

#[cfg(test)]
pub mod tests;

pub use assembler::RecordAssembler;
pub use blocks::{SampleBlock, find_blocks};
pub use column_layout::{ColumnLayout, ImpedanceColumn, NamedColumn, TimeColumn};

use crate::Result;
use crate::app::models::{RawTable, SampleRecord};
use crate::config::AssemblerConfig;

/// Assemble all sample records of a table using the default sheet layout
pub fn assemble(table: &RawTable) -> Result<Vec<SampleRecord>> {
    RecordAssembler::new(AssemblerConfig::default())?.assemble(table)
}
