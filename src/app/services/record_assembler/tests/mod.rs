//! Test fixtures for record assembly
//!
//! Builds known sample records and flattens them back into the row layout of
//! the laboratory sheet, so assembled output can be compared field for field.

use crate::app::models::{CellValue, Matrix, RawTable, SampleRecord};
use crate::app::services::label_parser::parse_run_identifier;

mod block_tests;

/// Impedance headers used by the fixtures, with their durations in hours
pub const IMPEDANCE_LABELS: &[(&str, f64)] = &[("imp24h", 24.0), ("imp2h", 2.0)];

/// LPR headers used by the fixtures, with their durations in hours
pub const LPR_LABELS: &[(&str, f64)] = &[("LPR30min", 0.5), ("LPR1h", 1.0), ("LPR2day", 48.0)];

/// Header of the fixture sheet, in laboratory column order
pub fn fixture_header() -> Vec<String> {
    let mut header = vec!["Sample".to_string(), "RunID".to_string()];
    for (label, _) in IMPEDANCE_LABELS {
        header.push(format!("l{}", label));
        header.push(label.to_string());
    }
    for name in ["Ecorr", "icorr", "Beta_a", "Beta_c", "fit_error"] {
        header.push(name.to_string());
    }
    for (label, _) in LPR_LABELS {
        header.push(label.to_string());
    }
    header
}

/// Build a record whose values are derived from `seed` so every cell is distinct
pub fn make_record(sample: &str, run_ids: &[&str], seed: f64) -> SampleRecord {
    let nruns = run_ids.len();
    let parsed: Vec<_> = run_ids
        .iter()
        .map(|id| parse_run_identifier(id).unwrap())
        .collect();

    let table = |rows: usize, offset: f64| {
        let values = (0..rows)
            .map(|i| {
                (0..nruns)
                    .map(|r| seed + offset + i as f64 * 10.0 + r as f64)
                    .collect()
            })
            .collect();
        Matrix::from_rows(values, nruns).unwrap()
    };
    let per_run = |offset: f64| -> Vec<f64> {
        (0..nruns).map(|r| seed + offset + r as f64 * 0.5).collect()
    };

    SampleRecord {
        sample: sample.to_string(),
        run_ids: run_ids.iter().map(|id| id.to_string()).collect(),
        dates: parsed.iter().map(|p| p.date.clone()).collect(),
        compositions: parsed.iter().map(|p| p.composition.clone()).collect(),
        substrates: parsed.iter().map(|p| p.substrate.clone()).collect(),
        impedance_time: IMPEDANCE_LABELS.iter().map(|(_, h)| *h).collect(),
        log_impedance: table(IMPEDANCE_LABELS.len(), 0.25),
        impedance: table(IMPEDANCE_LABELS.len(), 1000.0),
        ecorr: per_run(-600.0),
        icorr: per_run(0.125),
        beta_a: per_run(80.0),
        beta_c: per_run(-120.0),
        fit_error: per_run(0.01),
        lpr_time: LPR_LABELS.iter().map(|(_, h)| *h).collect(),
        lpr: table(LPR_LABELS.len(), 5000.0),
    }
}

/// Three samples with 3, 4 and 5 token run identifiers
pub fn known_records() -> Vec<SampleRecord> {
    vec![
        make_record(
            "ZnMg coated",
            &["20210301_ZnMg_01", "20210301_ZnMg_02", "20210302_ZnMg_03"],
            1.0,
        ),
        make_record("Bare AA2024", &["20210305_none_AA2024_01"], 2.0),
        make_record(
            "ZnMg Ce",
            &["20210310_ZnMg_Ce_AA2024_01", "20210310_ZnMg_Ce_AA2024_02"],
            3.0,
        ),
    ]
}

/// Flatten records into sheet rows: one row per run followed by an `AVG` row
///
/// A blank spacer row is inserted between samples when `spacers` is set.
pub fn flatten(records: &[SampleRecord], spacers: bool) -> RawTable {
    let header = fixture_header();
    let mut rows = Vec::new();

    for (i, record) in records.iter().enumerate() {
        if spacers && i > 0 {
            rows.push(vec![CellValue::Empty; header.len()]);
        }

        for run in 0..record.nruns() {
            let mut row = Vec::with_capacity(header.len());
            row.push(if run == 0 {
                CellValue::from(record.sample.as_str())
            } else {
                CellValue::Empty
            });
            row.push(CellValue::from(record.run_ids[run].as_str()));
            for j in 0..record.nimp() {
                row.push(CellValue::Number(record.log_impedance.row(j)[run]));
                row.push(CellValue::Number(record.impedance.row(j)[run]));
            }
            for values in [
                &record.ecorr,
                &record.icorr,
                &record.beta_a,
                &record.beta_c,
                &record.fit_error,
            ] {
                row.push(CellValue::Number(values[run]));
            }
            for j in 0..record.nlpr() {
                row.push(CellValue::Number(record.lpr.row(j)[run]));
            }
            rows.push(row);
        }

        let mut avg = vec![CellValue::Empty; header.len()];
        avg[1] = CellValue::from("AVG");
        avg[2] = CellValue::Number(-1.0);
        rows.push(avg);
    }

    RawTable::from_rows(header, rows).unwrap()
}

/// Replace one cell of a table, addressed by column name and row
pub fn with_cell(table: &RawTable, column: &str, row: usize, value: CellValue) -> RawTable {
    let columns = table
        .column_names()
        .iter()
        .map(|name| {
            let mut cells = table.column(name).unwrap().to_vec();
            if name == column {
                cells[row] = value.clone();
            }
            (name.clone(), cells)
        })
        .collect();
    RawTable::new(columns).unwrap()
}

/// Drop a column from a table
pub fn without_column(table: &RawTable, column: &str) -> RawTable {
    let columns = table
        .column_names()
        .iter()
        .filter(|name| name.as_str() != column)
        .map(|name| (name.clone(), table.column(name).unwrap().to_vec()))
        .collect();
    RawTable::new(columns).unwrap()
}
