//! Source of raw spreadsheet tables

use crate::Result;
use crate::app::models::RawTable;

/// Supplies the first worksheet of a spreadsheet as a [`RawTable`]
pub trait TableProvider {
    /// Human-readable name of the source, used in logs and reports
    fn source_name(&self) -> String;

    fn load_table(&self) -> Result<RawTable>;
}

/// An already loaded table
impl TableProvider for RawTable {
    fn source_name(&self) -> String {
        format!("in-memory table ({} rows)", self.nrows())
    }

    fn load_table(&self) -> Result<RawTable> {
        Ok(self.clone())
    }
}
