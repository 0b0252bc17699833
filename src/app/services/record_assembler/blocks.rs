//! Sample block boundary detection

use crate::app::models::RawTable;
use crate::config::AssemblerConfig;
use crate::{Error, Result};
use std::ops::Range;

/// Contiguous row range `[start, end)` holding the runs of one sample
///
/// `start` is the row carrying the sample name, `end` the row of the
/// closing `AVG` summary row (excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleBlock {
    /// Position of the block in the table
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl SampleBlock {
    pub fn nruns(&self) -> usize {
        self.end - self.start
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Locate sample blocks from the sample-name and end-sentinel markers
///
/// Fails if the number of sample labels differs from the number of sentinel
/// rows, or if the markers do not pair up into ordered, non-overlapping,
/// non-empty blocks.
pub fn find_blocks(table: &RawTable, config: &AssemblerConfig) -> Result<Vec<SampleBlock>> {
    let samples = table.column(&config.sample_column).ok_or_else(|| {
        Error::format(format!("Missing column '{}'", config.sample_column))
    })?;
    let run_ids = table.column(&config.run_id_column).ok_or_else(|| {
        Error::format(format!("Missing column '{}'", config.run_id_column))
    })?;

    let starts: Vec<usize> = samples
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(row, _)| row)
        .collect();

    let ends: Vec<usize> = run_ids
        .iter()
        .enumerate()
        .filter(|(_, cell)| {
            cell.as_text()
                .is_some_and(|text| text.trim() == config.end_sentinel)
        })
        .map(|(row, _)| row)
        .collect();

    if starts.len() != ends.len() {
        return Err(Error::format(format!(
            "Number of sample labels (={}) does not match number of {} \"{}\" strings (={})",
            starts.len(),
            config.run_id_column,
            config.end_sentinel,
            ends.len()
        )));
    }

    let mut blocks = Vec::with_capacity(starts.len());
    let mut previous_end: Option<usize> = None;

    for (index, (start, end)) in starts.into_iter().zip(ends).enumerate() {
        if end <= start {
            return Err(Error::format(format!(
                "Sample block {} has no runs: sample label at row {}, \"{}\" row at {}",
                index, start, config.end_sentinel, end
            )));
        }
        if let Some(previous_end) = previous_end {
            if start <= previous_end {
                return Err(Error::format(format!(
                    "Sample block {} starts at row {} before the previous block ends at row {}",
                    index, start, previous_end
                )));
            }
        }

        previous_end = Some(end);
        blocks.push(SampleBlock { index, start, end });
    }

    Ok(blocks)
}
