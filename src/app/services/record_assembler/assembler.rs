//! Per-block record assembly

use tracing::{debug, info};

use super::blocks::{SampleBlock, find_blocks};
use super::column_layout::{ColumnLayout, NamedColumn};
use crate::app::models::{Matrix, RawTable, SampleRecord};
use crate::app::services::label_parser::parse_run_identifier;
use crate::config::AssemblerConfig;
use crate::{Error, Result};

/// Assembles sample records from a raw laboratory table
///
/// The assembler holds only its configuration; every call works on the
/// table it is given, so one assembler can serve any number of tables.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    config: AssemblerConfig,
}

impl RecordAssembler {
    /// Create an assembler for the given sheet layout
    pub fn new(config: AssemblerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Assemble one record per sample block, in sheet order
    ///
    /// Any failure aborts the whole assembly; no partial results are returned.
    pub fn assemble(&self, table: &RawTable) -> Result<Vec<SampleRecord>> {
        let blocks = find_blocks(table, &self.config)?;
        let layout = ColumnLayout::from_table(table, &self.config)?;
        debug!(
            "Column layout: {} impedance, {} LPR columns; {} sample blocks",
            layout.nimp(),
            layout.nlpr(),
            blocks.len()
        );

        let records = blocks
            .iter()
            .map(|block| self.assemble_block(table, &layout, block))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Assembled {} samples with {} runs from {} rows",
            records.len(),
            records.iter().map(SampleRecord::nruns).sum::<usize>(),
            table.nrows()
        );

        Ok(records)
    }

    /// Assemble the record of a single block
    pub fn assemble_block(
        &self,
        table: &RawTable,
        layout: &ColumnLayout,
        block: &SampleBlock,
    ) -> Result<SampleRecord> {
        let nruns = block.nruns();

        let sample = table
            .cell(layout.sample.index, block.start)
            .as_text()
            .ok_or_else(|| {
                Error::format("Empty sample name").in_block(
                    block.index,
                    block.start,
                    &layout.sample.name,
                )
            })?;

        let mut run_ids = Vec::with_capacity(nruns);
        let mut dates = Vec::with_capacity(nruns);
        let mut compositions = Vec::with_capacity(nruns);
        let mut substrates = Vec::with_capacity(nruns);

        for row in block.rows() {
            let in_block = |e: Error| e.in_block(block.index, row, &layout.run_id.name);

            let run_id = table
                .cell(layout.run_id.index, row)
                .as_text()
                .ok_or_else(|| in_block(Error::format("Empty runid")))?;
            let (date, composition, substrate) =
                parse_run_identifier(&run_id).map_err(in_block)?.into_parts();

            run_ids.push(run_id);
            dates.push(date);
            compositions.push(composition);
            substrates.push(substrate);
        }

        let mut impedance = Matrix::zeros(layout.nimp(), nruns);
        let mut log_impedance = Matrix::zeros(layout.nimp(), nruns);
        for (j, column) in layout.impedance.iter().enumerate() {
            let values = numeric_cells(table, &column.impedance.name, column.impedance.index, block)?;
            impedance.row_mut(j).copy_from_slice(&values);

            let values = numeric_cells(
                table,
                &column.log_impedance.name,
                column.log_impedance.index,
                block,
            )?;
            log_impedance.row_mut(j).copy_from_slice(&values);
        }

        let mut lpr = Matrix::zeros(layout.nlpr(), nruns);
        for (j, column) in layout.lpr.iter().enumerate() {
            let values = numeric_cells(table, &column.name, column.index, block)?;
            lpr.row_mut(j).copy_from_slice(&values);
        }

        let [ecorr, icorr, beta_a, beta_c, fit_error] = layout
            .scalar_columns()
            .map(|column| scalar_cells(table, column, block));

        let record = SampleRecord {
            sample,
            run_ids,
            dates,
            compositions,
            substrates,
            impedance_time: layout.impedance_time(),
            log_impedance,
            impedance,
            ecorr: ecorr?,
            icorr: icorr?,
            beta_a: beta_a?,
            beta_c: beta_c?,
            fit_error: fit_error?,
            lpr_time: layout.lpr_time(),
            lpr,
        };

        debug!(
            "Block {}: sample '{}' rows {}..{} ({} runs)",
            block.index, record.sample, block.start, block.end, nruns
        );

        Ok(record)
    }
}

fn scalar_cells(table: &RawTable, column: &NamedColumn, block: &SampleBlock) -> Result<Vec<f64>> {
    numeric_cells(table, &column.name, column.index, block)
}

/// Read one column across the block's rows as floats; empty cells are NaN
fn numeric_cells(
    table: &RawTable,
    name: &str,
    index: usize,
    block: &SampleBlock,
) -> Result<Vec<f64>> {
    block
        .rows()
        .map(|row| {
            let cell = table.cell(index, row);
            cell.to_f64().ok_or_else(|| {
                Error::format(format!("Non-numeric value '{}'", cell)).in_block(
                    block.index,
                    row,
                    name,
                )
            })
        })
        .collect()
}
