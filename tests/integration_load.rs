//! Integration tests for loading laboratory sheets end to end
//!
//! These tests write CSV exports of the laboratory sheet to temporary files
//! and run them through the CSV provider, record assembler and schema binder.

use corrosion_rawdata::config::{Config, SourceConfig};
use corrosion_rawdata::{
    Collection, CsvTableProvider, EntityInstance, Error, MemoryFactory, PropertyValue,
    RecordAssembler, SampleLoader, load_samples, sample_schema,
};
use std::io::Write;
use tempfile::NamedTempFile;

const TITLE_LINES: &str = "\
Corrosion test results,,,,,,,,,,,,,,,,,,
,,Impedance,,,,Tafel fit,,,,,LPR,,,,,,,
";

const HEADER: &str = "Sample,RunID,limp24h,imp24h,limp2h,imp2h,Ecorr,icorr,Beta_a,Beta_c,fit_error,\
LPR30min,LPR1h,LPR2h,LPR3h,LPR6h,LPR12h,LPR18h,LPR24h";

/// Two samples: two ZnMg runs on AA2024, then a numbered Ce sample with one run
const DATA_ROWS: &str = "\
ZnMg coated,20210301_ZnMg_AA2024_01,5.1,125000,4.2,15800,-612.5,0.25,80.1,-120.3,0.01,1000,1100,1200,1300,1400,1500,1600,1700
,20210301_ZnMg_AA2024_02,5.2,158000,4.3,19900,-615,0.3,81,-121,0.02,1010,1110,1210,1310,1410,1510,1610,1710
,AVG,5.15,141500,4.25,17850,-613.75,0.275,80.55,-120.65,0.015,1005,1105,1205,1305,1405,1505,1605,1705
,,,,,,,,,,,,,,,,,,
17,20210305_ZnMg_Ce_AA2024_01,3.9,7900,3.1,1260,-700,1.5,60,-90,0.05,200,210,220,,240,250,260,270
,AVG,3.9,7900,3.1,1260,-700,1.5,60,-90,0.05,200,210,220,,240,250,260,270
";

fn write_sheet(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn matrix(instance: &EntityInstance, name: &str) -> corrosion_rawdata::Matrix {
    match instance.get(name) {
        Some(PropertyValue::FloatMatrix(matrix)) => matrix.clone(),
        other => panic!("{} is not a matrix: {:?}", name, other),
    }
}

fn floats(instance: &EntityInstance, name: &str) -> Vec<f64> {
    match instance.get(name) {
        Some(PropertyValue::FloatArray(values)) => values.clone(),
        other => panic!("{} is not a float array: {:?}", name, other),
    }
}

fn strings(instance: &EntityInstance, name: &str) -> Vec<String> {
    match instance.get(name) {
        Some(PropertyValue::TextArray(values)) => values.clone(),
        other => panic!("{} is not a string array: {:?}", name, other),
    }
}

/// Load the standard laboratory export: title rows replaced by the standard header
#[test]
fn test_load_lab_sheet_export() {
    let file = write_sheet(&format!("{}{}", TITLE_LINES, DATA_ROWS));
    let config = Config::default().with_source(SourceConfig::lab_sheet());
    let loader = SampleLoader::from_config(&config).unwrap();

    let provider = CsvTableProvider::new(file.path(), config.source.clone());
    let mut collection: Collection<EntityInstance> = Collection::new();
    let summary = loader
        .load(&provider, &MemoryFactory, &mut collection)
        .unwrap();

    assert_eq!(summary.samples, 2);
    assert_eq!(summary.runs, 3);
    assert_eq!(summary.nimp, 2);
    assert_eq!(summary.nlpr, 8);
    assert_eq!(summary.rows, 6);

    let first = collection.get("sample0").unwrap();
    assert!(first.is_complete());
    assert_eq!(
        first.get("Sample"),
        Some(&PropertyValue::Text("ZnMg coated".to_string()))
    );
    assert_eq!(strings(first, "date"), ["20210301", "20210301"]);
    assert_eq!(strings(first, "composition"), ["ZnMg", "ZnMg"]);
    assert_eq!(strings(first, "substrate"), ["AA2024", "AA2024"]);
    assert_eq!(floats(first, "impedance_time"), [24.0, 2.0]);
    assert_eq!(
        floats(first, "LPR_time"),
        [0.5, 1.0, 2.0, 3.0, 6.0, 12.0, 18.0, 24.0]
    );
    assert_eq!(floats(first, "Ecorr"), [-612.5, -615.0]);

    let impedance = matrix(first, "impedance");
    assert_eq!(impedance.shape(), [2, 2]);
    assert_eq!(impedance.row(0), [125000.0, 158000.0]);
    assert_eq!(impedance.row(1), [15800.0, 19900.0]);
    assert_eq!(matrix(first, "log_impedance").row(1), [4.2, 4.3]);

    let second = collection.get("sample1").unwrap();
    assert_eq!(
        second.get("Sample"),
        Some(&PropertyValue::Text("17".to_string()))
    );
    assert_eq!(strings(second, "composition"), ["ZnMg_Ce"]);
    let lpr = matrix(second, "LPR");
    assert_eq!(lpr.shape(), [8, 1]);
    assert_eq!(lpr.row(2), [220.0]);
    assert!(lpr.row(3)[0].is_nan());
}

/// A sheet that carries its own header row loads with the default options
#[test]
fn test_load_sheet_with_own_header() {
    let file = write_sheet(&format!("{}\n{}", HEADER, DATA_ROWS));
    let provider = CsvTableProvider::new(file.path(), SourceConfig::default());
    let assembler = RecordAssembler::new(Default::default()).unwrap();
    let mut collection: Collection<EntityInstance> = Collection::new();

    let summary = load_samples(
        &provider,
        &assembler,
        &sample_schema(),
        &MemoryFactory,
        &mut collection,
    )
    .unwrap();

    assert_eq!(summary.labels, ["sample0", "sample1"]);
    assert_eq!(collection.len(), 2);
}

#[test]
fn test_bad_run_identifier_names_block() {
    let rows = DATA_ROWS.replace("20210305_ZnMg_Ce_AA2024_01", "20210305-ZnMg");
    let file = write_sheet(&format!("{}\n{}", HEADER, rows));
    let config = Config::default();
    let loader = SampleLoader::from_config(&config).unwrap();

    let provider = CsvTableProvider::new(file.path(), config.source.clone());
    let mut collection: Collection<EntityInstance> = Collection::new();
    let error = loader
        .load(&provider, &MemoryFactory, &mut collection)
        .unwrap_err();

    assert!(error.is_format());
    assert!(matches!(error, Error::BlockFormat { block: 1, .. }));
    assert!(error.to_string().contains("20210305-ZnMg"));
    assert!(collection.is_empty());
}

#[test]
fn test_missing_block_end_fails() {
    let rows: Vec<&str> = DATA_ROWS.lines().filter(|line| !line.starts_with(",AVG,5.15")).collect();
    let file = write_sheet(&format!("{}\n{}\n", HEADER, rows.join("\n")));
    let config = Config::default();
    let loader = SampleLoader::from_config(&config).unwrap();

    let provider = CsvTableProvider::new(file.path(), config.source.clone());
    let mut collection: Collection<EntityInstance> = Collection::new();
    let error = loader
        .load(&provider, &MemoryFactory, &mut collection)
        .unwrap_err();

    assert!(error.is_format());
    assert!(error.to_string().contains("does not match"));
}

#[test]
fn test_collection_json_output() {
    let file = write_sheet(&format!("{}{}", TITLE_LINES, DATA_ROWS));
    let config = Config::default().with_source(SourceConfig::lab_sheet());
    let loader = SampleLoader::from_config(&config).unwrap();

    let provider = CsvTableProvider::new(file.path(), config.source.clone());
    let mut collection: Collection<EntityInstance> = Collection::new();
    loader
        .load(&provider, &MemoryFactory, &mut collection)
        .unwrap();

    let json = serde_json::to_value(&collection).unwrap();
    assert_eq!(json["sample0"]["dimensions"]["nruns"], 2);
    assert_eq!(json["sample1"]["properties"]["RunID"][0], "20210305_ZnMg_Ce_AA2024_01");
    assert!(json["sample1"]["properties"]["LPR"]["data"][3].is_null());
}
