//! Tests for sample block detection

use super::*;
use crate::app::services::record_assembler::blocks::{SampleBlock, find_blocks};
use crate::config::AssemblerConfig;

fn marker_table(samples: &[&str], run_ids: &[&str]) -> RawTable {
    let cell = |text: &&str| {
        if text.is_empty() {
            CellValue::Empty
        } else {
            CellValue::from(*text)
        }
    };
    RawTable::new(vec![
        ("Sample".to_string(), samples.iter().map(cell).collect()),
        ("RunID".to_string(), run_ids.iter().map(cell).collect()),
    ])
    .unwrap()
}

#[test]
fn test_blocks_from_known_records() {
    let records = known_records();
    let table = flatten(&records, false);

    let blocks = find_blocks(&table, &AssemblerConfig::default()).unwrap();

    assert_eq!(
        blocks,
        vec![
            SampleBlock { index: 0, start: 0, end: 3 },
            SampleBlock { index: 1, start: 4, end: 5 },
            SampleBlock { index: 2, start: 6, end: 8 },
        ]
    );
    for (block, record) in blocks.iter().zip(&records) {
        assert_eq!(block.nruns(), record.nruns());
    }
}

#[test]
fn test_blocks_skip_spacer_rows() {
    let table = flatten(&known_records(), true);
    let blocks = find_blocks(&table, &AssemblerConfig::default()).unwrap();

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[1].start, 5);
    assert_eq!(blocks[2].rows(), 8..10);
}

#[test]
fn test_more_labels_than_sentinels() {
    let table = marker_table(&["A", "", "B", ""], &["a_b_1", "AVG", "a_b_2", "a_b_3"]);
    let error = find_blocks(&table, &AssemblerConfig::default()).unwrap_err();

    assert!(error.is_format());
    assert!(error.to_string().contains("(=2)"));
    assert!(error.to_string().contains("(=1)"));
}

#[test]
fn test_sentinel_before_label() {
    let table = marker_table(&["", "A"], &["AVG", "a_b_1"]);
    let error = find_blocks(&table, &AssemblerConfig::default()).unwrap_err();
    assert!(error.is_format());
}

#[test]
fn test_interleaved_blocks_rejected() {
    let table = marker_table(&["A", "B", "", ""], &["a_b_1", "a_b_2", "AVG", "AVG"]);
    let error = find_blocks(&table, &AssemblerConfig::default()).unwrap_err();
    assert!(error.is_format());
}

#[test]
fn test_no_blocks() {
    let table = marker_table(&["", ""], &["", "note"]);
    assert!(find_blocks(&table, &AssemblerConfig::default()).unwrap().is_empty());
}

#[test]
fn test_missing_marker_columns() {
    let table = RawTable::new(vec![("Sample".to_string(), vec![CellValue::Empty])]).unwrap();
    let error = find_blocks(&table, &AssemblerConfig::default()).unwrap_err();
    assert!(error.to_string().contains("RunID"));
}

#[test]
fn test_custom_sentinel() {
    let table = marker_table(&["A", "", ""], &["a_b_1", "a_b_2", "MEAN"]);
    let config = AssemblerConfig::default().with_end_sentinel("MEAN");

    let blocks = find_blocks(&table, &config).unwrap();
    assert_eq!(blocks, vec![SampleBlock { index: 0, start: 0, end: 2 }]);
}
